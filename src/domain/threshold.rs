//! Threshold evaluation
//!
//! A breach is a reading strictly above its limit. There is no hysteresis and
//! no minimum duration: every reading above the limit is a breach.

use super::metric::Usage;
use crate::error::DomainError;
use std::fmt;

/// Returns true iff `sample` strictly exceeds `threshold`
#[inline]
pub fn breached(sample: f64, threshold: f64) -> bool {
    sample > threshold
}

/// Alert limit for one metric, in percent (0-100)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    /// Create a threshold with validation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidPercentage` if the value is outside 0-100
    pub fn new(percent: f64) -> Result<Self, DomainError> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(DomainError::InvalidPercentage(percent));
        }
        Ok(Self(percent))
    }

    #[inline]
    pub fn as_percent(&self) -> f64 {
        self.0
    }

    /// Check a reading against this limit
    pub fn is_breached_by(&self, usage: Usage) -> bool {
        breached(usage.as_percent(), self.0)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breached_is_strict() {
        assert!(breached(80.1, 80.0));
        assert!(!breached(80.0, 80.0));
        assert!(!breached(79.9, 80.0));
    }

    #[test]
    fn test_breached_matches_comparison() {
        let values = [0.0, 0.5, 49.9, 50.0, 50.1, 99.9, 100.0];
        for &s in &values {
            for &t in &values {
                assert_eq!(breached(s, t), s > t, "sample {} threshold {}", s, t);
            }
        }
    }

    #[test]
    fn test_threshold_validation() {
        assert!(Threshold::new(0.0).is_ok());
        assert!(Threshold::new(100.0).is_ok());
        assert_eq!(
            Threshold::new(101.0),
            Err(DomainError::InvalidPercentage(101.0))
        );
        assert!(Threshold::new(-1.0).is_err());
        assert!(Threshold::new(f64::NAN).is_err());
    }

    #[test]
    fn test_threshold_breach() {
        let threshold = Threshold::new(90.0).unwrap();
        assert!(threshold.is_breached_by(Usage::new(90.5)));
        assert!(!threshold.is_breached_by(Usage::new(90.0)));
    }
}
