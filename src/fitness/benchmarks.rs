//! Multi-objective benchmark problems
//!
//! Standard test problems used by the tests and demos.

use std::f64::consts::PI;

use crate::fitness::traits::{Direction, Problem};
use crate::genome::bounds::Bounds;
use crate::genome::real_vector::RealVector;
use crate::genome::traits::RealValuedGenome;
use crate::genome::variable::VariableType;

/// Schaffer's problem N.1: f1 = x², f2 = (x - 2)²
///
/// One variable, two minimized objectives. Pareto set is x ∈ [0, 2].
#[derive(Clone, Debug)]
pub struct SchafferN1 {
    types: Vec<VariableType>,
    directions: Vec<Direction>,
}

impl SchafferN1 {
    /// Bounded variant with x ∈ [-10, 10]
    pub fn new() -> Self {
        Self {
            types: vec![VariableType::Real(Bounds::new(-10.0, 10.0))],
            directions: vec![Direction::Minimize; 2],
        }
    }

    /// Unbounded variant with x initialized from N(mu, sigma)
    pub fn unbounded(mu: f64, sigma: f64) -> Self {
        Self {
            types: vec![VariableType::RealGauss { mu, sigma }],
            directions: vec![Direction::Minimize; 2],
        }
    }
}

impl Default for SchafferN1 {
    fn default() -> Self {
        Self::new()
    }
}

impl Problem for SchafferN1 {
    fn name(&self) -> &str {
        "Schaffer N.1"
    }

    fn variable_types(&self) -> &[VariableType] {
        &self.types
    }

    fn directions(&self) -> &[Direction] {
        &self.directions
    }

    fn evaluate(&self, variables: &RealVector) -> Vec<f64> {
        let x = variables.genes()[0];
        vec![x * x, (x - 2.0) * (x - 2.0)]
    }
}

/// Schaffer N.1 with the second objective negated and maximized
///
/// Same Pareto set as [`SchafferN1`]; exercises mixed directions.
#[derive(Clone, Debug)]
pub struct MixedSchaffer {
    types: Vec<VariableType>,
    directions: Vec<Direction>,
}

impl MixedSchaffer {
    /// Create the problem with x ∈ [-10, 10]
    pub fn new() -> Self {
        Self {
            types: vec![VariableType::Real(Bounds::new(-10.0, 10.0))],
            directions: vec![Direction::Minimize, Direction::Maximize],
        }
    }
}

impl Default for MixedSchaffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Problem for MixedSchaffer {
    fn name(&self) -> &str {
        "Mixed Schaffer"
    }

    fn variable_types(&self) -> &[VariableType] {
        &self.types
    }

    fn directions(&self) -> &[Direction] {
        &self.directions
    }

    fn evaluate(&self, variables: &RealVector) -> Vec<f64> {
        let x = variables.genes()[0];
        vec![x * x, -(x - 2.0) * (x - 2.0)]
    }
}

/// ZDT1: convex front f2 = 1 - sqrt(f1)
///
/// Reference: Zitzler, Deb & Thiele (2000).
#[derive(Clone, Debug)]
pub struct Zdt1 {
    types: Vec<VariableType>,
    directions: Vec<Direction>,
}

impl Zdt1 {
    /// Create ZDT1 with `nvars` variables in [0, 1] (typically 30)
    pub fn new(nvars: usize) -> Self {
        assert!(nvars >= 2, "ZDT1 needs at least two variables");
        Self {
            types: vec![VariableType::Real(Bounds::unit()); nvars],
            directions: vec![Direction::Minimize; 2],
        }
    }
}

impl Problem for Zdt1 {
    fn name(&self) -> &str {
        "ZDT1"
    }

    fn variable_types(&self) -> &[VariableType] {
        &self.types
    }

    fn directions(&self) -> &[Direction] {
        &self.directions
    }

    fn evaluate(&self, variables: &RealVector) -> Vec<f64> {
        let x = variables.genes();
        let n = x.len() as f64;
        let f1 = x[0];
        let g = 1.0 + 9.0 * x[1..].iter().sum::<f64>() / (n - 1.0);
        let f2 = g * (1.0 - (f1 / g).sqrt());
        vec![f1, f2]
    }
}

/// DTLZ2 with three objectives: spherical front Σ fᵢ² = 1
///
/// Reference: Deb, Thiele, Laumanns & Zitzler (2002).
#[derive(Clone, Debug)]
pub struct Dtlz2 {
    types: Vec<VariableType>,
    directions: Vec<Direction>,
}

impl Dtlz2 {
    /// Create DTLZ2 with `nvars` variables in [0, 1] (at least 3)
    pub fn new(nvars: usize) -> Self {
        assert!(nvars >= 3, "DTLZ2 with three objectives needs at least three variables");
        Self {
            types: vec![VariableType::Real(Bounds::unit()); nvars],
            directions: vec![Direction::Minimize; 3],
        }
    }
}

impl Problem for Dtlz2 {
    fn name(&self) -> &str {
        "DTLZ2"
    }

    fn variable_types(&self) -> &[VariableType] {
        &self.types
    }

    fn directions(&self) -> &[Direction] {
        &self.directions
    }

    fn evaluate(&self, variables: &RealVector) -> Vec<f64> {
        let x = variables.genes();
        let g: f64 = x[2..].iter().map(|xi| (xi - 0.5).powi(2)).sum();
        let (a, b) = (x[0] * PI / 2.0, x[1] * PI / 2.0);
        vec![
            (1.0 + g) * a.cos() * b.cos(),
            (1.0 + g) * a.cos() * b.sin(),
            (1.0 + g) * a.sin(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_schaffer_values() {
        let p = SchafferN1::new();
        assert_eq!(p.evaluate(&RealVector::from([1.0])), vec![1.0, 1.0]);
        assert_eq!(p.num_objectives(), 2);
        assert!(p.variable_types()[0].is_real());
    }

    #[test]
    fn test_schaffer_unbounded_uses_real_gauss() {
        let p = SchafferN1::unbounded(0.0, 3.0);
        assert!(p.variable_types()[0].bounds().is_none());
    }

    #[test]
    fn test_mixed_schaffer_directions() {
        let p = MixedSchaffer::new();
        assert_eq!(p.directions(), &[Direction::Minimize, Direction::Maximize]);
        assert_eq!(p.evaluate(&RealVector::from([0.0])), vec![0.0, -4.0]);
    }

    #[test]
    fn test_zdt1_on_front() {
        let p = Zdt1::new(30);
        let mut x = vec![0.0; 30];
        x[0] = 0.25;
        let f = p.evaluate(&RealVector::new(x));
        assert_relative_eq!(f[0], 0.25);
        assert_relative_eq!(f[1], 0.5);
    }

    #[test]
    fn test_dtlz2_on_sphere() {
        let p = Dtlz2::new(7);
        let x = vec![0.3, 0.8, 0.5, 0.5, 0.5, 0.5, 0.5];
        let f = p.evaluate(&RealVector::new(x));
        let norm: f64 = f.iter().map(|v| v * v).sum();
        assert_relative_eq!(norm, 1.0, epsilon = 1e-12);
    }
}
