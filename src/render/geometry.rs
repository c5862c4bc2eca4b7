//! Size and position resolution against the surface and the margin rectangle.

use crate::foundation::core::{Rect, Size};

/// How a loaded image's natural size maps onto the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeMode {
    /// Scale down uniformly to fit inside the margins; never upscale.
    Fit,
    /// Fill the available height, keep aspect.
    #[default]
    Vertical,
    /// Fill the available width, keep aspect.
    Horizontal,
    /// Natural size.
    Original,
    /// Fill the available area exactly, ignoring aspect.
    Stretch,
}

impl SizeMode {
    /// Every mode, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Fit,
        Self::Vertical,
        Self::Horizontal,
        Self::Original,
        Self::Stretch,
    ];

    /// Directive spelling.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fit => "fit",
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
            Self::Original => "original",
            Self::Stretch => "stretch",
        }
    }

    /// Case-insensitive lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }
}

/// Nine-point anchor grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    TopLeft,
    TopCenter,
    TopRight,
    MidLeft,
    #[default]
    Center,
    MidRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Anchor {
    Start,
    Middle,
    End,
}

impl Position {
    /// Every position, row by row.
    pub const ALL: [Self; 9] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::MidLeft,
        Self::Center,
        Self::MidRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    /// Directive spelling.
    pub const fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "topleft",
            Self::TopCenter => "topcenter",
            Self::TopRight => "topright",
            Self::MidLeft => "midleft",
            Self::Center => "center",
            Self::MidRight => "midright",
            Self::BottomLeft => "bottomleft",
            Self::BottomCenter => "bottomcenter",
            Self::BottomRight => "bottomright",
        }
    }

    /// Case-insensitive lookup.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    fn horizontal(self) -> Anchor {
        match self {
            Self::TopLeft | Self::MidLeft | Self::BottomLeft => Anchor::Start,
            Self::TopCenter | Self::Center | Self::BottomCenter => Anchor::Middle,
            Self::TopRight | Self::MidRight | Self::BottomRight => Anchor::End,
        }
    }

    fn vertical(self) -> Anchor {
        match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => Anchor::Start,
            Self::MidLeft | Self::Center | Self::MidRight => Anchor::Middle,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => Anchor::End,
        }
    }
}

/// Surface dimensions plus the active margin rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Surface size.
    pub screen: Size,
    /// Margins: left (`x`), top (`y`), right (`w`), bottom (`h`).
    pub margins: Rect,
}

impl Frame {
    pub fn new(screen: Size, margins: Rect) -> Self {
        Self { screen, margins }
    }

    /// Area left inside the margins, clamped at zero.
    pub fn available(self) -> Size {
        let m = self.margins;
        let inner = |screen: i32, a: i32, b: i32| {
            clamp_px(i64::from(screen) - i64::from(a) - i64::from(b)).max(0)
        };
        Size::new(
            inner(self.screen.w, m.x, m.w),
            inner(self.screen.h, m.y, m.h),
        )
    }

    /// Resolve a natural size under `mode`.
    pub fn resolve_size(self, natural: Size, mode: SizeMode) -> Size {
        let avail = self.available();
        match mode {
            SizeMode::Original => natural,
            SizeMode::Stretch => avail,
            SizeMode::Vertical => Size::new(scale(natural.w, avail.h, natural.h), avail.h),
            SizeMode::Horizontal => Size::new(avail.w, scale(natural.h, avail.w, natural.w)),
            SizeMode::Fit => {
                let mut out = natural;
                if out.w > avail.w {
                    out = Size::new(avail.w, scale(natural.h, avail.w, natural.w));
                }
                if out.h > avail.h {
                    out = Size::new(scale(natural.w, avail.h, natural.h), avail.h);
                }
                out
            }
        }
    }

    /// Resolve the top-left corner of a `size` box under `position`; axes are independent.
    pub fn resolve_position(self, size: Size, position: Position) -> (i32, i32) {
        let anchor = |anchor: Anchor, screen: i32, len: i32, start: i32, end: i32| {
            let (screen, len) = (i64::from(screen), i64::from(len));
            clamp_px(match anchor {
                Anchor::Start => i64::from(start),
                Anchor::Middle => (screen - len) / 2,
                Anchor::End => screen - len - i64::from(end),
            })
        };
        let m = self.margins;
        (
            anchor(position.horizontal(), self.screen.w, size.w, m.x, m.w),
            anchor(position.vertical(), self.screen.h, size.h, m.y, m.h),
        )
    }

    /// Size then position in one step.
    pub fn place(self, natural: Size, mode: SizeMode, position: Position) -> Rect {
        let size = self.resolve_size(natural, mode);
        let (x, y) = self.resolve_position(size, position);
        Rect::new(x, y, size.w, size.h)
    }
}

/// `value * num / den` in 64-bit, zero when `den` is zero.
fn scale(value: i32, num: i32, den: i32) -> i32 {
    if den == 0 {
        return 0;
    }
    clamp_px(i64::from(value) * i64::from(num) / i64::from(den))
}

/// Saturate a 64-bit intermediate back into pixel range.
fn clamp_px(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
#[path = "../../tests/unit/render/geometry.rs"]
mod tests;
