//! Safe casting utilities for screen coordinates and scroll amounts

use crate::{Error, Result};

/// Safely convert f64 to i32 with bounds checking
///
/// # Errors
///
/// Returns an error if the value is not finite or outside i32 range
#[allow(clippy::cast_possible_truncation)] // Truncation after bounds check is safe
pub fn f64_to_i32(value: f64) -> Result<i32> {
    if value.is_finite() && value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX) {
        Ok(value as i32)
    } else {
        Err(Error::InvalidInput(format!(
            "Value {value} cannot be safely converted to i32"
        )))
    }
}

/// Round to the nearest integer (halves away from zero) and convert to i32
///
/// # Errors
///
/// Returns an error if the rounded value is not finite or outside i32 range
pub fn f64_round_to_i32(value: f64) -> Result<i32> {
    f64_to_i32(value.round())
}

/// Clamp and convert f64 to an X11 pixel coordinate in `[0, extent - 1]`
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Clamping ensures safe truncation
pub fn f64_to_pixel_clamp(value: f64, extent: u16) -> i16 {
    let max = i16::try_from(extent.saturating_sub(1)).unwrap_or(i16::MAX);

    if !value.is_finite() {
        return 0;
    }

    let clamped = value.round().clamp(0.0, f64::from(max));
    (clamped as i16).clamp(0, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_f64_to_i32() {
        assert_eq!(f64_to_i32(42.0).unwrap(), 42);
        assert_eq!(f64_to_i32(-42.0).unwrap(), -42);
        assert_eq!(f64_to_i32(0.0).unwrap(), 0);
        assert_eq!(f64_to_i32(2147483647.0).unwrap(), i32::MAX);
        assert_eq!(f64_to_i32(-2147483648.0).unwrap(), i32::MIN);

        assert!(f64_to_i32(f64::INFINITY).is_err());
        assert!(f64_to_i32(f64::NAN).is_err());
        assert!(f64_to_i32(2147483648.0).is_err());
    }

    #[test]
    fn test_round_to_i32() {
        assert_eq!(f64_round_to_i32(-10.0).unwrap(), -10);
        assert_eq!(f64_round_to_i32(1.5).unwrap(), 2);
        assert_eq!(f64_round_to_i32(-1.5).unwrap(), -2);
        assert_eq!(f64_round_to_i32(0.49).unwrap(), 0);
        assert!(f64_round_to_i32(f64::NAN).is_err());
    }

    #[test]
    fn test_pixel_clamp() {
        assert_eq!(f64_to_pixel_clamp(960.4, 1920), 960);
        assert_eq!(f64_to_pixel_clamp(-25.0, 1920), 0);
        assert_eq!(f64_to_pixel_clamp(5000.0, 1920), 1919);
        assert_eq!(f64_to_pixel_clamp(f64::NAN, 1920), 0);
        assert_eq!(f64_to_pixel_clamp(10.0, 0), 0);
        assert_eq!(f64_to_pixel_clamp(40000.0, u16::MAX), i16::MAX);
    }

    proptest! {
        #[test]
        fn prop_f64_to_i32_finite_within_bounds(value in i32::MIN..=i32::MAX) {
            let result = f64_to_i32(f64::from(value));
            prop_assert!(result.is_ok());
            prop_assert_eq!(result.unwrap(), value);
        }

        #[test]
        fn prop_pixel_clamp_always_on_screen(value in any::<f64>(), extent in 1u16..=8192) {
            let pixel = f64_to_pixel_clamp(value, extent);
            prop_assert!(pixel >= 0);
            prop_assert!(i32::from(pixel) < i32::from(extent));
        }
    }
}
