//! Ambient composition state: the defaults directives apply to whatever they add next.

use std::path::{Path, PathBuf};

use crate::{
    compose::text::TextAlign,
    foundation::core::{Offset, Rect, Rgba8},
    render::{
        backend::FontId,
        geometry::{Position, SizeMode},
    },
};

/// Logical font size before screen scaling.
pub const DEFAULT_FONT_SIZE: u32 = 32;

/// Font sizes are authored against this surface height.
pub const REFERENCE_HEIGHT: f32 = 480.0;

/// The currently open font.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedFont {
    /// Expanded path the font was opened from.
    pub path: PathBuf,
    /// Pixel size it was opened at.
    pub size_px: u32,
    pub id: FontId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmbientState {
    pub image_size: SizeMode,
    pub image_position: Position,
    pub text_position: Position,
    pub text_align: TextAlign,
    pub font_size: u32,
    pub font: Option<LoadedFont>,
    pub margins: Rect,
    pub text_color: Rgba8,
    pub shadow: bool,
    pub shadow_color: Rgba8,
    pub shadow_offset: Offset,
    pub disable_font_scale: bool,
}

impl Default for AmbientState {
    fn default() -> Self {
        Self {
            image_size: SizeMode::Vertical,
            image_position: Position::MidLeft,
            text_position: Position::Center,
            text_align: TextAlign::Left,
            font_size: DEFAULT_FONT_SIZE,
            font: None,
            margins: Rect::default(),
            text_color: Rgba8::BLACK,
            shadow: false,
            shadow_color: Rgba8::rgb(125, 125, 125),
            shadow_offset: Offset::new(10, 10),
            disable_font_scale: false,
        }
    }
}

impl AmbientState {
    /// Pixel size to open fonts at on a surface `screen_h` pixels tall.
    pub fn scaled_font_px(&self, screen_h: i32) -> u32 {
        if self.disable_font_scale {
            return self.font_size;
        }
        ((screen_h as f32 / REFERENCE_HEIGHT) * self.font_size as f32) as u32
    }

    pub fn font_id(&self) -> Option<FontId> {
        self.font.as_ref().map(|f| f.id)
    }

    /// Copy of every setting plus the path of the open font.
    pub fn snapshot(&self) -> AmbientSnapshot {
        AmbientSnapshot {
            settings: Self {
                font: None,
                ..self.clone()
            },
            font_path: self.font.as_ref().map(|f| f.path.clone()),
        }
    }

    /// Restore every setting except the open font, which needs the backend.
    pub(crate) fn restore_settings(&mut self, snapshot: &AmbientSnapshot) {
        let font = self.font.take();
        *self = Self {
            font,
            ..snapshot.settings.clone()
        };
    }
}

/// Opaque saved copy of [`AmbientState`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmbientSnapshot {
    settings: AmbientState,
    font_path: Option<PathBuf>,
}

impl AmbientSnapshot {
    pub fn font_path(&self) -> Option<&Path> {
        self.font_path.as_deref()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/ambient.rs"]
mod tests;
