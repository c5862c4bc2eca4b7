#![forbid(unsafe_code)]

pub mod assets;
pub mod compose;
pub mod config;
pub mod foundation;
pub mod render;
pub mod runtime;

pub use compose::{
    ambient::{AmbientSnapshot, AmbientState},
    carousel::Carousel,
    composer::{Composer, RunFlags},
    directive::Directive,
    options::{OptionEntry, build_options, read_options, select_startup},
    vars::VariableStore,
};
pub use config::ini::{DirectiveLine, parse_directives, read_directives};
pub use foundation::core::{Offset, Rect, Rgba8, Size};
pub use foundation::error::{ShowError, ShowResult};
pub use render::{
    backend::{DrawableBackend, FontId, Texture, TextureId},
    cpu::{CpuBackend, CpuBackendOpts},
    headless::HeadlessBackend,
    stack::{Element, RenderStack, TextureRef},
};
pub use runtime::{
    input::{Button, InputEvent, InputSource, NoInput, ScriptedInput, StdinInput},
    run_loop::{LoopExit, LoopOptions, run},
    watch::{PgrepProbe, ProcessProbe, ScriptedProbe},
};
