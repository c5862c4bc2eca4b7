use std::path::Path;

use crate::{
    compose::text::TextBlock,
    foundation::{
        core::{Rect, Rgba8, Size},
        error::ShowResult,
    },
};

/// Opaque handle to a backend texture (decoded image or rasterised text block).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct TextureId(pub u32);

/// Opaque handle to a backend font at a fixed pixel size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct FontId(pub u32);

/// A freshly created texture and its natural size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Texture {
    /// Handle used for drawing and release.
    pub id: TextureId,
    /// Natural size in pixels.
    pub size: Size,
}

/// The narrow surface the composition engine draws through.
///
/// Resources created here are released exactly once through [`DrawableBackend::release_texture`]
/// and [`DrawableBackend::release_font`]; the composition layer tracks ownership.
pub trait DrawableBackend {
    /// Size of the fullscreen surface.
    fn surface_size(&self) -> Size;

    /// Decode an image file into a texture.
    fn load_image(&mut self, path: &Path) -> ShowResult<Texture>;

    /// Open a font at `size_px` pixels.
    fn load_font(&mut self, path: &Path, size_px: u32) -> ShowResult<FontId>;

    /// Measure a single line of text.
    fn measure_text(&mut self, font: FontId, line: &str) -> ShowResult<Size>;

    /// Vertical distance between consecutive baselines.
    fn line_skip(&mut self, font: FontId) -> ShowResult<i32>;

    /// Rasterise an already laid-out block as white glyphs on transparency.
    fn render_text(&mut self, font: FontId, block: &TextBlock) -> ShowResult<Texture>;

    /// Start a new frame.
    fn begin_frame(&mut self);

    /// Draw `texture` scaled into `rect`, colour-modulated by `tint`.
    fn draw(&mut self, texture: TextureId, rect: Rect, tint: Rgba8);

    /// Finish the frame and make it visible.
    fn present(&mut self) -> ShowResult<()>;

    fn release_texture(&mut self, texture: TextureId);

    fn release_font(&mut self, font: FontId);
}
