//! Problem and objective traits
//!
//! This module defines optimization directions and the multi-objective
//! problem interface consumed by the driver.

use serde::{Deserialize, Serialize};

use crate::genome::real_vector::RealVector;
use crate::genome::variable::VariableType;

/// The direction of optimization for one objective
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Minimize the objective value
    Minimize,
    /// Maximize the objective value
    Maximize,
}

impl Direction {
    /// Returns true if `a` is strictly better than `b` in this direction
    #[inline]
    pub fn is_better(self, a: f64, b: f64) -> bool {
        match self {
            Self::Minimize => a < b,
            Self::Maximize => a > b,
        }
    }

    /// Map a value into minimization space
    #[inline]
    pub fn to_minimization(self, value: f64) -> f64 {
        match self {
            Self::Minimize => value,
            Self::Maximize => -value,
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::Minimize
    }
}

/// Multi-objective problem definition
///
/// Supplies variable metadata for initialization and variation, the
/// per-objective directions, and objective evaluation.
pub trait Problem: Send + Sync {
    /// Human readable problem name
    fn name(&self) -> &str {
        "problem"
    }

    /// Type of each decision variable
    fn variable_types(&self) -> &[VariableType];

    /// Optimization direction of each objective
    fn directions(&self) -> &[Direction];

    /// Number of decision variables
    fn num_variables(&self) -> usize {
        self.variable_types().len()
    }

    /// Number of objectives
    fn num_objectives(&self) -> usize {
        self.directions().len()
    }

    /// Evaluate all objectives for the given decision variables
    fn evaluate(&self, variables: &RealVector) -> Vec<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::traits::RealValuedGenome;

    struct Shifted {
        types: Vec<VariableType>,
        directions: Vec<Direction>,
    }

    impl Problem for Shifted {
        fn variable_types(&self) -> &[VariableType] {
            &self.types
        }

        fn directions(&self) -> &[Direction] {
            &self.directions
        }

        fn evaluate(&self, variables: &RealVector) -> Vec<f64> {
            let x = variables.genes()[0];
            vec![x, 1.0 - x]
        }
    }

    #[test]
    fn test_direction_is_better() {
        assert!(Direction::Minimize.is_better(1.0, 2.0));
        assert!(!Direction::Minimize.is_better(2.0, 2.0));
        assert!(Direction::Maximize.is_better(3.0, 2.0));
        assert!(!Direction::Maximize.is_better(1.0, 2.0));
    }

    #[test]
    fn test_direction_to_minimization() {
        assert_eq!(Direction::Minimize.to_minimization(4.0), 4.0);
        assert_eq!(Direction::Maximize.to_minimization(4.0), -4.0);
    }

    #[test]
    fn test_problem_default_counts() {
        let p = Shifted {
            types: vec![VariableType::real(0.0, 1.0).unwrap()],
            directions: vec![Direction::Minimize, Direction::Maximize],
        };
        assert_eq!(p.num_variables(), 1);
        assert_eq!(p.num_objectives(), 2);
        assert_eq!(p.evaluate(&RealVector::from([0.25])), vec![0.25, 0.75]);
        assert_eq!(p.name(), "problem");
    }
}
