//! Physical pixel coordinates for host events and picker hit-testing.
//!
//! Host layers report pointer and touch positions in client coordinates. They
//! arrive here as [`PxPosition`]s so gesture code never mixes them up with the
//! density-independent [`Dp`](crate::Dp) metrics pickers are declared in.
//!
//! Origin is the top-left corner of the host surface, y grows downward, and
//! negative coordinates are valid because a drag may leave the surface.
//!
//! ```
//! use somnia_ui::px::{Px, PxPosition, PxRect};
//!
//! let column = PxRect::new(Px(0), Px(0), Px(116), Px(208));
//! assert!(column.contains(PxPosition::new(Px(40), Px(100))));
//! assert!(!column.contains(PxPosition::new(Px(116), Px(100))));
//! ```

use std::ops::{Add, Div, Mul, Sub};

/// A physical pixel coordinate or length.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Px(pub i32);

impl Px {
    /// Zero pixels.
    pub const ZERO: Self = Self(0);

    /// Returns the raw i32 value.
    pub fn raw(self) -> i32 {
        self.0
    }

    /// Converts the pixel value to f32.
    pub fn to_f32(self) -> f32 {
        self.0 as f32
    }

    /// Creates a `Px` from an f32 value, truncating toward zero and
    /// saturating at the numeric bounds. NaN becomes zero.
    ///
    /// ```
    /// use somnia_ui::px::Px;
    ///
    /// assert_eq!(Px::saturating_from_f32(42.7), Px(42));
    /// assert_eq!(Px::saturating_from_f32(f32::MAX), Px(i32::MAX));
    /// ```
    pub fn saturating_from_f32(value: f32) -> Self {
        Px(value as i32)
    }

    /// Saturating addition, used for edges far out on the surface.
    pub fn saturating_add(self, rhs: Self) -> Self {
        Px(self.0.saturating_add(rhs.0))
    }
}

/// A position in physical pixel space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PxPosition {
    /// Horizontal coordinate.
    pub x: Px,
    /// Vertical coordinate.
    pub y: Px,
}

impl PxPosition {
    /// The surface origin.
    pub const ZERO: Self = Self {
        x: Px::ZERO,
        y: Px::ZERO,
    };

    /// Creates a position from x and y coordinates.
    pub const fn new(x: Px, y: Px) -> Self {
        Self { x, y }
    }
}

/// A size in physical pixel space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PxSize {
    /// Width in physical pixels.
    pub width: Px,
    /// Height in physical pixels.
    pub height: Px,
}

impl PxSize {
    /// Creates a size from width and height.
    pub const fn new(width: Px, height: Px) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in physical pixel space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PxRect {
    /// Left edge.
    pub x: Px,
    /// Top edge.
    pub y: Px,
    /// Width of the rectangle.
    pub width: Px,
    /// Height of the rectangle.
    pub height: Px,
}

impl PxRect {
    /// Creates a rectangle from its top-left corner and extent.
    pub const fn new(x: Px, y: Px, width: Px, height: Px) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from a top-left position and a size.
    pub fn from_position_size(position: PxPosition, size: PxSize) -> Self {
        Self::new(position.x, position.y, size.width, size.height)
    }

    /// Returns whether `point` lies inside the rectangle. The right and bottom
    /// edges are exclusive.
    pub fn contains(&self, point: PxPosition) -> bool {
        point.x >= self.x
            && point.x < self.x.saturating_add(self.width)
            && point.y >= self.y
            && point.y < self.y.saturating_add(self.height)
    }
}

impl Add for Px {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Px(self.0 + rhs.0)
    }
}

impl Sub for Px {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Px(self.0 - rhs.0)
    }
}

impl Mul<i32> for Px {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self::Output {
        Px(self.0 * rhs)
    }
}

impl Div<i32> for Px {
    type Output = Self;

    fn div(self, rhs: i32) -> Self::Output {
        Px(self.0 / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirds_of_a_frame_cover_its_width() {
        let frame = Px(350);
        let third = frame / 3;
        assert_eq!(third, Px(116));
        assert_eq!(frame - third * 2, Px(118));
        assert_eq!(third + third * 2 - frame, Px(-2));
    }

    #[test]
    fn float_conversion_truncates_and_saturates() {
        assert_eq!(Px::saturating_from_f32(-100.5), Px(-100));
        assert_eq!(Px::saturating_from_f32(f32::MIN), Px(i32::MIN));
        assert_eq!(Px::saturating_from_f32(f32::NAN), Px::ZERO);
        assert_eq!(Px(-48).to_f32(), -48.0);
    }

    #[test]
    fn rect_contains_is_half_open() {
        let rect = PxRect::new(Px(0), Px(0), Px(100), Px(50));
        assert!(rect.contains(PxPosition::ZERO));
        assert!(rect.contains(PxPosition::new(Px(99), Px(49))));
        assert!(!rect.contains(PxPosition::new(Px(100), Px(10))));
        assert!(!rect.contains(PxPosition::new(Px(10), Px(-1))));
    }

    #[test]
    fn rect_near_the_numeric_edge_does_not_overflow() {
        let origin = PxPosition::new(Px(i32::MAX - 10), Px(0));
        let rect = PxRect::from_position_size(origin, PxSize::new(Px(100), Px(100)));
        assert!(rect.contains(PxPosition::new(Px(i32::MAX - 1), Px(5))));
        assert!(!rect.contains(PxPosition::new(Px(i32::MAX), Px(100))));
    }
}
