//! Bounds for decision variables
//!
//! This module provides the interval type used by bounded variable types.

use serde::{Deserialize, Serialize};

use crate::error::GenomeError;

/// Closed interval for a single decision variable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
}

impl Bounds {
    /// Create new bounds
    ///
    /// # Panics
    /// Panics if min > max
    pub fn new(min: f64, max: f64) -> Self {
        assert!(
            min <= max,
            "Invalid bounds: min ({}) must be <= max ({})",
            min,
            max
        );
        Self { min, max }
    }

    /// Create bounds, reporting an inverted or non-finite interval as an error
    pub fn try_new(min: f64, max: f64) -> Result<Self, GenomeError> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(GenomeError::ConstraintViolation(format!(
                "invalid bounds [{}, {}]",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// Create symmetric bounds centered at 0
    pub fn symmetric(half_width: f64) -> Self {
        Self::new(-half_width, half_width)
    }

    /// Create unit bounds [0, 1]
    pub fn unit() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Get the range (max - min)
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Check if a value is within bounds
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp a value to be within bounds
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::unit()
    }
}

impl From<(f64, f64)> for Bounds {
    fn from((min, max): (f64, f64)) -> Self {
        Self::new(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_new() {
        let b = Bounds::new(-5.0, 5.0);
        assert_eq!(b.min, -5.0);
        assert_eq!(b.max, 5.0);
    }

    #[test]
    #[should_panic(expected = "Invalid bounds")]
    fn test_bounds_invalid() {
        Bounds::new(5.0, -5.0);
    }

    #[test]
    fn test_bounds_try_new() {
        assert!(Bounds::try_new(0.0, 1.0).is_ok());
        assert!(Bounds::try_new(1.0, 0.0).is_err());
        assert!(Bounds::try_new(f64::NEG_INFINITY, 0.0).is_err());
    }

    #[test]
    fn test_bounds_range_and_contains() {
        let b = Bounds::new(-5.0, 5.0);
        assert_eq!(b.range(), 10.0);
        assert!(b.contains(-5.0));
        assert!(b.contains(5.0));
        assert!(!b.contains(5.1));
    }

    #[test]
    fn test_bounds_clamp() {
        let b = Bounds::new(-5.0, 5.0);
        assert_eq!(b.clamp(0.0), 0.0);
        assert_eq!(b.clamp(-10.0), -5.0);
        assert_eq!(b.clamp(10.0), 5.0);
    }

    #[test]
    fn test_bounds_from_tuple() {
        let b: Bounds = (0.0, 2.0).into();
        assert_eq!(b, Bounds::new(0.0, 2.0));
    }
}
