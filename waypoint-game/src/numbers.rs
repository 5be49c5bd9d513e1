//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Floor a f64 and clamp it into the usize range, returning 0 for non-finite or negative values.
#[must_use]
pub fn floor_f64_to_usize(value: f64) -> usize {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    let max = cast::<usize, f64>(usize::MAX).unwrap_or(f64::MAX);
    cast::<f64, usize>(value.min(max).floor()).unwrap_or(0)
}

/// Round a f64 and clamp it into the u16 range, returning 0 for NaN values.
#[must_use]
pub fn round_f64_to_u16(value: f64) -> u16 {
    if value.is_nan() {
        return 0;
    }
    let clamped = value.round().clamp(0.0, f64::from(u16::MAX));
    cast::<f64, u16>(clamped).unwrap_or(0)
}

/// Convert usize to f64 while allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Convert u64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn u64_to_f64(value: u64) -> f64 {
    cast::<u64, f64>(value).unwrap_or(0.0)
}
