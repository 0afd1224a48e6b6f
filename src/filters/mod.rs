//! Signal filtering for the cursor target.
//!
//! The index fingertip jitters by a few pixels every frame; once mapped to
//! screen space that becomes tens of pixels. The filters here smooth the
//! mapped target before it reaches the input sink.

/// Exponential filter for responsive smoothing
pub mod exponential;

use crate::Result;

/// Trait for all cursor filters
pub trait CursorFilter: Send + Sync {
    /// Apply filter to a screen-space target
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64);

    /// Last filtered position
    fn current(&self) -> (f64, f64);

    /// Reset filter state
    fn reset(&mut self);

    /// Get filter name
    fn name(&self) -> &str;
}

/// No-op filter that passes through values unchanged
#[derive(Debug, Default)]
pub struct NoFilter {
    last: (f64, f64),
}

impl CursorFilter for NoFilter {
    fn apply(&mut self, x: f64, y: f64) -> (f64, f64) {
        self.last = (x, y);
        self.last
    }

    fn current(&self) -> (f64, f64) {
        self.last
    }

    fn reset(&mut self) {
        self.last = (0.0, 0.0);
    }

    fn name(&self) -> &str {
        "NoFilter"
    }
}

/// Create a cursor filter by type name.
///
/// `smoothing_factor` is only used by the exponential filter.
///
/// # Errors
///
/// Returns [`crate::Error::FilterError`] for an unknown name or a smoothing
/// factor below 1.
pub fn create_filter(filter_type: &str, smoothing_factor: f64) -> Result<Box<dyn CursorFilter>> {
    match filter_type.to_lowercase().as_str() {
        "none" | "nofilter" => Ok(Box::new(NoFilter::default())),
        "exponential" => Ok(Box::new(exponential::ExponentialFilter::new(smoothing_factor)?)),
        _ => Err(crate::Error::FilterError(format!("Unknown filter type: {filter_type}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filter() {
        let mut filter = NoFilter::default();
        let (x, y) = filter.apply(10.0, 20.0);
        assert_eq!(x, 10.0);
        assert_eq!(y, 20.0);
        assert_eq!(filter.current(), (10.0, 20.0));
        filter.reset();
        assert_eq!(filter.current(), (0.0, 0.0));
    }

    #[test]
    fn test_create_filter() {
        assert!(create_filter("none", 4.0).is_ok());
        assert_eq!(create_filter("Exponential", 4.0).unwrap().name(), "ExponentialFilter");
        assert!(create_filter("exponential", 0.5).is_err());
        assert!(create_filter("kalman", 4.0).is_err());
    }
}
