//! Screen-space geometry for pointer handling.

/// A rectangle in viewport coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the center point, relative to the top-left corner.
    #[must_use]
    pub fn local_center(&self) -> (f32, f32) {
        (self.width * 0.5, self.height * 0.5)
    }

    /// Converts a viewport point into coordinates relative to the top-left corner.
    #[must_use]
    pub fn to_local(&self, x: f32, y: f32) -> (f32, f32) {
        (x - self.x, y - self.y)
    }

    /// Returns true if the rectangle has no area.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}
