/// Integer rectangle in surface pixel space.
///
/// The same shape doubles as the screen margin: `x` is the left margin, `y` the top margin,
/// `w` the right margin and `h` the bottom margin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub w: i32,
    /// Height.
    pub h: i32,
}

impl Rect {
    /// Construct a rectangle from its four components.
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Return the same rectangle moved by `offset`.
    pub fn translated(self, offset: Offset) -> Self {
        Self {
            x: self.x.saturating_add(offset.x),
            y: self.y.saturating_add(offset.y),
            ..self
        }
    }

    /// Width and height as a [`Size`].
    pub fn size(self) -> Size {
        Size::new(self.w, self.h)
    }
}

/// Pixel dimensions of a surface, texture or layout block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Size {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl Size {
    /// Construct a size.
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    /// Parse `"<w>x<h>"` (case-insensitive separator), both components positive.
    pub fn parse(s: &str) -> Option<Self> {
        let (w, h) = s.trim().split_once(['x', 'X'])?;
        let w: i32 = w.trim().parse().ok()?;
        let h: i32 = h.trim().parse().ok()?;
        (w > 0 && h > 0).then_some(Self { w, h })
    }
}

/// 2D integer offset (drop shadow vector).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Offset {
    /// Horizontal component.
    pub x: i32,
    /// Vertical component.
    pub y: i32,
}

impl Offset {
    /// Construct an offset.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Straight (non-premultiplied) RGBA8 colour used as a draw tint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white, the identity tint.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque colour from three channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Return `true` when this tint leaves colours unchanged.
    pub fn is_identity(self) -> bool {
        self == Self::WHITE
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::WHITE
    }
}
