//! Small numeric helpers shared by the display and history code.

/// Round to one decimal place, the precision measurements are shown at.
#[inline]
pub fn round_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Clamp into [0, 1]. Non-finite input maps to 0.
#[inline]
pub fn clamp_unit(x: f64) -> f64 {
    if x.is_finite() { x.clamp(0.0, 1.0) } else { 0.0 }
}
