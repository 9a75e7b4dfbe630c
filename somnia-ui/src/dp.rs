//! # Density-Independent Pixels (Dp)
//!
//! Picker metrics (slot pitch, drag item height, font sizes) are declared in
//! [`Dp`] and converted to physical pixels at event time with the global
//! [`SCALE_FACTOR`].
//!
//! ## Usage
//!
//! ```
//! use somnia_ui::Dp;
//!
//! let item_height = Dp(48.0);
//! let pixels = item_height.to_pixels_f32();
//! assert!(pixels > 0.0);
//! ```

use std::sync::OnceLock;

use parking_lot::RwLock;

use crate::Px;

/// Global scale factor for converting between density-independent pixels and
/// physical pixels.
///
/// Unset means 1.0. Hosts call [`set_scale_factor`] once they know the
/// surface density and again whenever it changes.
pub static SCALE_FACTOR: OnceLock<RwLock<f64>> = OnceLock::new();

/// Updates the global scale factor.
pub fn set_scale_factor(scale_factor: f64) {
    let lock = SCALE_FACTOR.get_or_init(|| RwLock::new(1.0));
    *lock.write() = scale_factor;
}

fn scale_factor() -> f64 {
    SCALE_FACTOR.get().map(|lock| *lock.read()).unwrap_or(1.0)
}

/// Density-independent pixels (dp) for UI scaling.
///
/// `Dp` wraps an `f64` measurement that is converted to physical pixels with
/// the global [`SCALE_FACTOR`] when gesture math or layout needs pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dp(pub f64);

impl Dp {
    /// Converts to physical pixels as `f32`.
    pub fn to_pixels_f32(&self) -> f32 {
        (self.0 * scale_factor()) as f32
    }

    /// Converts to [`Px`], truncating toward zero.
    pub fn to_px(&self) -> Px {
        Px::saturating_from_f32(self.to_pixels_f32())
    }
}
