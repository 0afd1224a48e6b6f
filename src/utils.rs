//! Utility functions for coordinate transformations.

pub mod safe_cast;

/// Map `value` linearly from `[from_min, from_max]` onto `[to_min, to_max]`.
///
/// Values outside the source range extrapolate; clamping is left to the
/// input sink. A degenerate source range maps everything to `to_min`.
#[must_use]
pub fn interp(value: f64, (from_min, from_max): (f64, f64), (to_min, to_max): (f64, f64)) -> f64 {
    let span = from_max - from_min;
    if span.abs() < f64::EPSILON {
        return to_min;
    }
    to_min + (value - from_min) * (to_max - to_min) / span
}

/// Mirror a coordinate across an axis of the given extent
#[must_use]
pub fn mirror(value: f64, extent: f64) -> f64 {
    extent - value
}
