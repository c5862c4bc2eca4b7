//! Multi-line text block layout.

use crate::foundation::{
    core::Size,
    error::{ShowError, ShowResult},
};

/// Token separating lines inside a `text` directive.
pub const LINE_SEPARATOR: &str = "||";

/// Lines beyond this count are dropped.
pub const MAX_LINES: usize = 10;

/// Horizontal alignment of each line against the widest one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub const ALL: [Self; 3] = [Self::Left, Self::Center, Self::Right];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(name))
    }

    fn offset(self, block_w: i32, line_w: i32) -> i32 {
        match self {
            Self::Left => 0,
            Self::Center => (block_w - line_w) / 2,
            Self::Right => block_w - line_w,
        }
    }
}

/// A line placed inside its block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedLine {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub size: Size,
}

/// Lines laid out relative to the block's top-left corner.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextBlock {
    pub size: Size,
    pub lines: Vec<PlacedLine>,
}

/// Split on [`LINE_SEPARATOR`], dropping empty pieces and anything past [`MAX_LINES`].
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split(LINE_SEPARATOR)
        .filter(|l| !l.is_empty())
        .take(MAX_LINES)
        .collect()
}

/// Measure every line, then align each against the widest; lines are `line_skip` apart.
pub fn layout_block(
    lines: &[&str],
    align: TextAlign,
    line_skip: i32,
    mut measure: impl FnMut(&str) -> ShowResult<Size>,
) -> ShowResult<TextBlock> {
    let mut sizes = Vec::with_capacity(lines.len());
    for line in lines {
        sizes.push(measure(line)?);
    }
    let width = sizes.iter().map(|s| s.w).max().unwrap_or(0);
    let height = line_offset(lines.len(), line_skip)?;

    let mut placed = Vec::with_capacity(lines.len());
    for (i, (text, size)) in lines.iter().zip(&sizes).enumerate() {
        placed.push(PlacedLine {
            text: (*text).to_owned(),
            x: align.offset(width, size.w),
            y: line_offset(i, line_skip)?,
            size: *size,
        });
    }

    Ok(TextBlock {
        size: Size::new(width, height),
        lines: placed,
    })
}

fn line_offset(index: usize, line_skip: i32) -> ShowResult<i32> {
    i32::try_from(index)
        .ok()
        .and_then(|i| i.checked_mul(line_skip))
        .ok_or_else(|| ShowError::config(format!("text block too tall ({index} x {line_skip}px)")))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/text.rs"]
mod tests;
