//! Directive dispatch onto ambient state and render stacks.

use std::path::Path;

use crate::{
    compose::{
        ambient::{AmbientSnapshot, AmbientState, LoadedFont},
        carousel::Carousel,
        directive::Directive,
        options::split_aliases,
        text::{TextAlign, layout_block, split_lines},
        vars::VariableStore,
    },
    config::{
        ini::DirectiveLine,
        values::{parse_bool, parse_leading_int, scan_offset, scan_rect, scan_rgb},
    },
    foundation::{
        core::{Rgba8, Size},
        error::{ShowError, ShowResult},
    },
    render::{
        backend::DrawableBackend,
        geometry::{Frame, Position, SizeMode},
        stack::{Element, RenderStack, TextureRef},
    },
};

/// Loop behaviour toggled by directives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RunFlags {
    /// Draw once, then stop redrawing.
    pub quiet: bool,
    /// Stop after the first frame.
    pub quit: bool,
    /// Stop on any button release.
    pub wait_quit: bool,
    /// Stop after too many button presses.
    pub keypress_quit: bool,
}

/// Whether the last load in each fallback family failed.
#[derive(Clone, Copy, Debug, Default)]
struct FallbackState {
    image_failed: bool,
    font_failed: bool,
}

/// Owns the backend and every piece of composition state.
///
/// Directives land on the global stack unless an option is being built, in which case they
/// land on that option's scoped stack.
pub struct Composer<B: DrawableBackend> {
    backend: B,
    vars: VariableStore,
    ambient: AmbientState,
    flags: RunFlags,
    fallback: FallbackState,
    global: RenderStack,
    scoped: Option<RenderStack>,
    carousel: Carousel,
}

impl<B: DrawableBackend> Composer<B> {
    /// Composer reading missing variables from the environment.
    pub fn new(backend: B) -> Self {
        Self::with_vars(backend, VariableStore::new())
    }

    /// Seeds `width` and `height` from the backend surface.
    pub fn with_vars(backend: B, vars: VariableStore) -> Self {
        let mut out = Self {
            backend,
            vars,
            ambient: AmbientState::default(),
            flags: RunFlags::default(),
            fallback: FallbackState::default(),
            global: RenderStack::new(),
            scoped: None,
            carousel: Carousel::new(),
        };
        let screen = out.screen();
        out.vars.set("width", screen.w.to_string());
        out.vars.set("height", screen.h.to_string());
        out
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn vars(&self) -> &VariableStore {
        &self.vars
    }

    pub fn vars_mut(&mut self) -> &mut VariableStore {
        &mut self.vars
    }

    pub fn ambient(&self) -> &AmbientState {
        &self.ambient
    }

    pub fn flags(&self) -> RunFlags {
        self.flags
    }

    pub fn global_stack(&self) -> &RenderStack {
        &self.global
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    /// The stack drawn each frame: the selected option's, or the global one.
    pub fn active_stack(&self) -> &RenderStack {
        self.carousel.selected_stack().unwrap_or(&self.global)
    }

    /// Clear, draw the active stack and present.
    pub fn draw_frame(&mut self) -> ShowResult<()> {
        self.backend.begin_frame();
        let stack = self.carousel.selected_stack().unwrap_or(&self.global);
        stack.draw_all(&mut self.backend);
        self.backend.present()
    }

    fn screen(&self) -> Size {
        self.backend.surface_size()
    }

    fn frame(&self) -> Frame {
        Frame::new(self.screen(), self.ambient.margins)
    }

    fn target(&mut self) -> &mut RenderStack {
        match &mut self.scoped {
            Some(stack) => stack,
            None => &mut self.global,
        }
    }

    /// Apply a directive by key. Unknown keys are logged and reported as failure.
    pub fn dispatch(&mut self, key: &str, value: &str) -> bool {
        match Directive::lookup(key) {
            Some(directive) => self.apply(directive, value),
            None => {
                tracing::warn!(key, value, "unknown directive");
                false
            }
        }
    }

    /// Dispatch every line in order.
    pub fn apply_lines(&mut self, lines: &[DirectiveLine]) {
        for l in lines {
            self.dispatch(&l.key, &l.value);
        }
    }

    /// Apply one directive. The result only drives fallback chaining and logging.
    pub fn apply(&mut self, directive: Directive, value: &str) -> bool {
        match directive {
            Directive::Image => {
                let ok = self.load_image(value);
                self.fallback.image_failed = !ok;
                ok
            }
            Directive::ImageFallback => {
                if !self.fallback.image_failed {
                    tracing::debug!(value, "image_fallback skipped");
                    return true;
                }
                let ok = self.load_image(value);
                self.fallback.image_failed = !ok;
                ok
            }
            Directive::Font => {
                let ok = self.load_font(value);
                self.fallback.font_failed = !ok;
                ok
            }
            Directive::FontFallback => {
                if !self.fallback.font_failed {
                    tracing::debug!(value, "font_fallback skipped");
                    return true;
                }
                let ok = self.load_font(value);
                self.fallback.font_failed = !ok;
                ok
            }
            Directive::ImagePosition => {
                self.ambient.image_position = parse_position(value);
                true
            }
            Directive::ImageStretch => {
                self.ambient.image_size = SizeMode::from_name(value).unwrap_or_default();
                true
            }
            Directive::TextPosition => {
                self.ambient.text_position = parse_position(value);
                true
            }
            Directive::TextAlign => {
                self.ambient.text_align = TextAlign::from_name(value).unwrap_or_default();
                true
            }
            Directive::Text => self.render_text(value),
            Directive::FontSize => self.set_font_size(value),
            Directive::ScreenMargin => scan_rect(value, &mut self.ambient.margins) > 0,
            Directive::TextColor => scan_rgb(value, &mut self.ambient.text_color) > 0,
            Directive::ShadowColor => {
                self.ambient.shadow = true;
                scan_rgb(value, &mut self.ambient.shadow_color) > 0
            }
            Directive::ShadowOffset => {
                self.ambient.shadow = true;
                scan_offset(value, &mut self.ambient.shadow_offset) > 0
            }
            Directive::Shadow => {
                self.ambient.shadow = parse_bool(value, false);
                true
            }
            Directive::Quiet => {
                self.flags.quiet = parse_bool(value, false);
                true
            }
            Directive::Quit => {
                self.flags.quit = parse_bool(value, false);
                true
            }
            Directive::WaitQuit => {
                self.flags.wait_quit = parse_bool(value, false);
                true
            }
            Directive::KeypressQuit => {
                self.flags.keypress_quit = parse_bool(value, false);
                true
            }
            Directive::DisableFontScale => {
                self.ambient.disable_font_scale = parse_bool(value, false);
                self.reload_font();
                true
            }
            Directive::Set => self.vars.set_assignment(value, true),
            Directive::SetStrict => self.vars.set_assignment(value, false),
        }
    }

    /// Load an image, size and place it per the ambient modes, and push an owning element.
    pub fn load_image(&mut self, path: &str) -> bool {
        let path = self.vars.expand(path);
        match self.try_load_image(Path::new(&path)) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "load_image failed");
                false
            }
        }
    }

    fn try_load_image(&mut self, path: &Path) -> ShowResult<()> {
        if !path.exists() {
            return Err(ShowError::asset(format!(
                "{}: file doesn't exist",
                path.display()
            )));
        }
        let texture = self.backend.load_image(path)?;
        let rect = self.frame().place(
            texture.size,
            self.ambient.image_size,
            self.ambient.image_position,
        );
        tracing::debug!(path = %path.display(), ?rect, "image placed");
        self.target().push(Element::new(
            TextureRef::Owned(texture.id),
            rect,
            Rgba8::WHITE,
        ));
        Ok(())
    }

    /// Open a font at the ambient size, replacing (and releasing) the current one.
    pub fn load_font(&mut self, path: &str) -> bool {
        let path = self.vars.expand(path);
        match self.open_font(Path::new(&path)) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "load_font failed");
                false
            }
        }
    }

    fn open_font(&mut self, path: &Path) -> ShowResult<()> {
        if !path.exists() {
            return Err(ShowError::asset(format!(
                "{}: file doesn't exist",
                path.display()
            )));
        }
        let size_px = self.ambient.scaled_font_px(self.screen().h);
        let id = self.backend.load_font(path, size_px)?;
        let loaded = LoadedFont {
            path: path.to_path_buf(),
            size_px,
            id,
        };
        if let Some(old) = self.ambient.font.replace(loaded) {
            self.backend.release_font(old.id);
        }
        tracing::debug!(path = %path.display(), size_px, "font opened");
        Ok(())
    }

    /// Reopen the current font, e.g. after its size or scaling changed.
    fn reload_font(&mut self) {
        let Some(path) = self.ambient.font.as_ref().map(|f| f.path.clone()) else {
            return;
        };
        if let Err(e) = self.open_font(&path) {
            tracing::warn!(path = %path.display(), error = %e, "font reload failed");
        }
    }

    /// Set the logical font size; sizes below 1 are ignored.
    pub fn set_font_size(&mut self, value: &str) -> bool {
        let size = parse_leading_int(value).unwrap_or(0);
        if size < 1 {
            tracing::debug!(value, "font_size ignored");
            return false;
        }
        self.ambient.font_size = size as u32;
        self.reload_font();
        true
    }

    /// Expand, lay out and rasterise text, pushing a shadow element first when enabled.
    pub fn render_text(&mut self, text: &str) -> bool {
        let expanded = self.vars.expand(text);
        match self.try_render_text(&expanded) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(text, expanded = %expanded, error = %e, "render_text failed");
                false
            }
        }
    }

    fn try_render_text(&mut self, text: &str) -> ShowResult<()> {
        let font = self
            .ambient
            .font_id()
            .ok_or_else(|| ShowError::config("no fonts loaded"))?;
        let lines = split_lines(text);
        if lines.is_empty() {
            return Err(ShowError::config("text has no lines"));
        }
        for line in &lines {
            tracing::debug!(line, "render_text");
        }

        let line_skip = self.backend.line_skip(font)?;
        let backend = &mut self.backend;
        let block = layout_block(&lines, self.ambient.text_align, line_skip, |l| {
            backend.measure_text(font, l)
        })?;
        let texture = self.backend.render_text(font, &block)?;

        let rect = self.frame().place(
            texture.size,
            SizeMode::Original,
            self.ambient.text_position,
        );
        let AmbientState {
            shadow,
            shadow_offset,
            shadow_color,
            text_color,
            ..
        } = self.ambient;
        if shadow {
            self.target().push(Element::new(
                TextureRef::Shared(texture.id),
                rect.translated(shadow_offset),
                opaque(shadow_color),
            ));
        }
        self.target().push(Element::new(
            TextureRef::Owned(texture.id),
            rect,
            opaque(text_color),
        ));
        Ok(())
    }

    /// Save the ambient state.
    pub fn snapshot(&self) -> AmbientSnapshot {
        self.ambient.snapshot()
    }

    /// Restore a saved ambient state.
    ///
    /// The saved font is reopened when the current one differs in path or size; when the
    /// snapshot had no font, or reopening fails, the current one is released.
    pub fn restore(&mut self, snapshot: &AmbientSnapshot) {
        self.ambient.restore_settings(snapshot);
        match snapshot.font_path() {
            Some(path) => {
                let size_px = self.ambient.scaled_font_px(self.screen().h);
                let same = self
                    .ambient
                    .font
                    .as_ref()
                    .is_some_and(|f| f.path.as_path() == path && f.size_px == size_px);
                if !same {
                    let path = path.to_path_buf();
                    if let Err(e) = self.open_font(&path) {
                        tracing::warn!(path = %path.display(), error = %e, "font restore failed");
                        self.drop_font();
                    }
                }
            }
            None => self.drop_font(),
        }
    }

    fn drop_font(&mut self) {
        if let Some(f) = self.ambient.font.take() {
            self.backend.release_font(f.id);
        }
    }

    /// Build one option from the global stack and the display template.
    ///
    /// Sets `id`, applies `aliases` (`;;`-separated assignments, always substituted), replays
    /// `template` onto a template clone of the global stack, then restores the ambient state
    /// so nothing leaks into the next option.
    #[tracing::instrument(skip(self, template))]
    pub fn add_option(&mut self, id: &str, aliases: &str, template: &[DirectiveLine]) {
        self.vars.set("id", id);
        for piece in split_aliases(aliases) {
            self.vars.set_assignment(piece, true);
        }

        let prior = self.scoped.replace(self.global.clone_as_template());
        let saved = self.snapshot();
        self.apply_lines(template);
        self.restore(&saved);

        let built = std::mem::replace(&mut self.scoped, prior).unwrap_or_default();
        tracing::debug!(elements = built.len(), "option built");
        self.carousel.push(id, built);
    }

    /// Release every owned texture and the open font exactly once; hands the backend back.
    pub fn shutdown(self) -> B {
        let Self {
            mut backend,
            ambient,
            global,
            scoped,
            carousel,
            ..
        } = self;
        let mut released = carousel.release(&mut backend);
        if let Some(stack) = scoped {
            released += stack.release(&mut backend);
        }
        released += global.release(&mut backend);
        if let Some(f) = ambient.font {
            backend.release_font(f.id);
        }
        tracing::debug!(released, "composer shut down");
        backend
    }
}

fn parse_position(value: &str) -> Position {
    Position::from_name(value).unwrap_or(Position::Center)
}

fn opaque(color: Rgba8) -> Rgba8 {
    Rgba8 { a: 255, ..color }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composer.rs"]
mod tests;
