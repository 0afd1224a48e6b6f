use super::CursorFilter;
use crate::{Error, Result};

/// Exponential smoothing filter.
///
/// Each call moves the output `1 / smoothing_factor` of the way from the
/// previous output towards the new target, independently per axis. A factor
/// of 1 follows the target exactly; larger factors are smoother but lag more.
/// The output starts at the origin.
#[derive(Debug, Clone)]
pub struct ExponentialFilter {
    smoothing_factor: f64,
    previous: (f64, f64),
}

impl ExponentialFilter {
    /// Create a filter, rejecting a factor below 1 (or NaN)
    ///
    /// # Errors
    ///
    /// Returns [`Error::FilterError`] when the factor is invalid.
    pub fn new(smoothing_factor: f64) -> Result<Self> {
        if smoothing_factor >= 1.0 {
            Ok(Self {
                smoothing_factor,
                previous: (0.0, 0.0),
            })
        } else {
            Err(Error::FilterError(format!(
                "Smoothing factor must be >= 1, got {smoothing_factor}"
            )))
        }
    }

    /// Configured smoothing factor
    #[must_use]
    pub const fn smoothing_factor(&self) -> f64 {
        self.smoothing_factor
    }
}

impl CursorFilter for ExponentialFilter {
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64) {
        let (prev_x, prev_y) = self.previous;
        let filtered = (
            prev_x + (x - prev_x) / self.smoothing_factor,
            prev_y + (y - prev_y) / self.smoothing_factor,
        );
        self.previous = filtered;
        filtered
    }

    fn current(&self) -> (f64, f64) {
        self.previous
    }

    fn reset(&mut self) {
        self.previous = (0.0, 0.0);
    }

    fn name(&self) -> &str {
        "ExponentialFilter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_exponential_filter() {
        let mut filter = ExponentialFilter::new(4.0).unwrap();

        // Starts from the origin
        let (x1, y1) = filter.apply(400.0, 800.0);
        assert_eq!(x1, 100.0);
        assert_eq!(y1, 200.0);

        // Quarter of the remaining gap each step
        let (x2, y2) = filter.apply(400.0, 800.0);
        assert_eq!(x2, 175.0);
        assert_eq!(y2, 350.0);
    }

    #[test]
    fn test_factor_one_follows_target() {
        let mut filter = ExponentialFilter::new(1.0).unwrap();
        assert_eq!(filter.apply(12.5, -3.0), (12.5, -3.0));
        assert_eq!(filter.apply(7.0, 9.0), (7.0, 9.0));
    }

    #[test]
    fn test_reset_returns_to_origin() {
        let mut filter = ExponentialFilter::new(2.0).unwrap();
        filter.apply(100.0, 100.0);
        filter.reset();
        assert_eq!(filter.current(), (0.0, 0.0));
    }

    #[test]
    fn test_invalid_factor_rejected() {
        assert!(matches!(ExponentialFilter::new(0.5), Err(Error::FilterError(_))));
        assert!(ExponentialFilter::new(f64::NAN).is_err());
    }

    proptest! {
        #[test]
        fn prop_converges_without_overshoot(
            factor in 1.0f64..20.0,
            target_x in -5000.0f64..5000.0,
            target_y in -5000.0f64..5000.0,
        ) {
            let mut filter = ExponentialFilter::new(factor).unwrap();
            let mut last_gap = (target_x.abs(), target_y.abs());
            for _ in 0..400 {
                let (x, y) = filter.apply(target_x, target_y);
                // never crosses the target
                prop_assert!(x * target_x.signum() <= target_x.abs() + 1e-9);
                prop_assert!(y * target_y.signum() <= target_y.abs() + 1e-9);
                let gap = ((target_x - x).abs(), (target_y - y).abs());
                prop_assert!(gap.0 <= last_gap.0 + 1e-9);
                prop_assert!(gap.1 <= last_gap.1 + 1e-9);
                last_gap = gap;
            }
            prop_assert!(last_gap.0 < 1e-3 * (1.0 + target_x.abs()));
            prop_assert!(last_gap.1 < 1e-3 * (1.0 + target_y.abs()));
        }
    }
}
