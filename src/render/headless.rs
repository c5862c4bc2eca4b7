//! Composition-only backend: real image dimensions, synthetic text metrics, recorded draws.

use std::path::Path;

use crate::{
    assets::decode::is_svg_path,
    compose::text::TextBlock,
    foundation::{
        core::{Rect, Rgba8, Size},
        error::{ShowError, ShowResult},
    },
    render::backend::{DrawableBackend, FontId, Texture, TextureId},
};

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DrawCall {
    pub texture: TextureId,
    pub source: String,
    pub rect: Rect,
    pub tint: Rgba8,
}

#[derive(Clone, Debug)]
struct HeadlessTexture {
    source: String,
}

#[derive(Clone, Debug)]
struct HeadlessFont {
    size_px: u32,
}

/// Backend that composes without rasterising.
///
/// Image sizes come from file headers, text advances `ceil(size/2)` pixels per character with a
/// line skip of `size + size/5`. Draws are recorded per frame and the last presented frame is
/// kept for inspection.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    surface: Size,
    textures: Vec<Option<HeadlessTexture>>,
    fonts: Vec<Option<HeadlessFont>>,
    current: Vec<DrawCall>,
    last_frame: Vec<DrawCall>,
    frames_presented: u64,
    bad_releases: u32,
}

impl HeadlessBackend {
    pub fn new(surface: Size) -> Self {
        Self {
            surface,
            ..Self::default()
        }
    }

    /// Draw calls of the most recently presented frame.
    pub fn last_frame(&self) -> &[DrawCall] {
        &self.last_frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Textures created and not yet released.
    pub fn live_textures(&self) -> usize {
        self.textures.iter().flatten().count()
    }

    /// Fonts opened and not yet released.
    pub fn live_fonts(&self) -> usize {
        self.fonts.iter().flatten().count()
    }

    /// Releases of handles that were unknown or already released.
    pub fn bad_releases(&self) -> u32 {
        self.bad_releases
    }

    /// Size of a live font, if any.
    pub fn font_size(&self, font: FontId) -> Option<u32> {
        self.font(font).ok().map(|f| f.size_px)
    }

    fn font(&self, font: FontId) -> ShowResult<&HeadlessFont> {
        self.fonts
            .get(font.0 as usize)
            .and_then(Option::as_ref)
            .ok_or_else(|| ShowError::backend(format!("unknown font {font:?}")))
    }

    fn insert_texture(&mut self, source: String, size: Size) -> Texture {
        let id = TextureId(self.textures.len() as u32);
        self.textures.push(Some(HeadlessTexture { source }));
        Texture { id, size }
    }
}

impl DrawableBackend for HeadlessBackend {
    fn surface_size(&self) -> Size {
        self.surface
    }

    fn load_image(&mut self, path: &Path) -> ShowResult<Texture> {
        let size = if is_svg_path(path) {
            let bytes = std::fs::read(path).map_err(|e| ShowError::io(path, e))?;
            let tree = crate::assets::decode::parse_svg(&bytes)?;
            let s = tree.size();
            Size::new(s.width().ceil() as i32, s.height().ceil() as i32)
        } else {
            let (w, h) = image::image_dimensions(path).map_err(|e| {
                ShowError::asset(format!("cannot read image '{}': {e}", path.display()))
            })?;
            Size::new(w as i32, h as i32)
        };
        Ok(self.insert_texture(path.display().to_string(), size))
    }

    fn load_font(&mut self, path: &Path, size_px: u32) -> ShowResult<FontId> {
        if size_px == 0 {
            return Err(ShowError::backend("font size must be > 0"));
        }
        let meta = std::fs::metadata(path).map_err(|e| ShowError::io(path, e))?;
        if !meta.is_file() {
            return Err(ShowError::asset(format!(
                "'{}' is not a font file",
                path.display()
            )));
        }
        let id = FontId(self.fonts.len() as u32);
        self.fonts.push(Some(HeadlessFont { size_px }));
        Ok(id)
    }

    fn measure_text(&mut self, font: FontId, line: &str) -> ShowResult<Size> {
        let px = i64::from(self.font(font)?.size_px);
        let width = line.chars().count() as i64 * ((px + 1) / 2);
        Ok(Size::new(to_px(width)?, to_px(px + px / 5)?))
    }

    fn line_skip(&mut self, font: FontId) -> ShowResult<i32> {
        let px = i64::from(self.font(font)?.size_px);
        to_px(px + px / 5)
    }

    fn render_text(&mut self, font: FontId, block: &TextBlock) -> ShowResult<Texture> {
        self.font(font)?;
        let joined = block
            .lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        Ok(self.insert_texture(format!("text:{joined}"), block.size))
    }

    fn begin_frame(&mut self) {
        self.current.clear();
    }

    fn draw(&mut self, texture: TextureId, rect: Rect, tint: Rgba8) {
        let Some(Some(t)) = self.textures.get(texture.0 as usize) else {
            tracing::warn!(?texture, "draw of unknown texture");
            return;
        };
        self.current.push(DrawCall {
            texture,
            source: t.source.clone(),
            rect,
            tint,
        });
    }

    fn present(&mut self) -> ShowResult<()> {
        self.frames_presented += 1;
        std::mem::swap(&mut self.last_frame, &mut self.current);
        self.current.clear();
        Ok(())
    }

    fn release_texture(&mut self, texture: TextureId) {
        match self.textures.get_mut(texture.0 as usize) {
            Some(slot) if slot.is_some() => *slot = None,
            _ => {
                tracing::warn!(?texture, "release of unknown texture");
                self.bad_releases += 1;
            }
        }
    }

    fn release_font(&mut self, font: FontId) {
        match self.fonts.get_mut(font.0 as usize) {
            Some(slot) if slot.is_some() => *slot = None,
            _ => {
                tracing::warn!(?font, "release of unknown font");
                self.bad_releases += 1;
            }
        }
    }
}

fn to_px(v: i64) -> ShowResult<i32> {
    i32::try_from(v).map_err(|_| ShowError::backend(format!("text extent {v}px out of range")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/headless.rs"]
mod tests;
