//! Decision variable types
//!
//! Per-variable metadata supplied by a problem definition. Variation
//! operators consult it to decide which positions they may perturb or
//! recombine, and initialization uses it to sample random genomes.

use std::fmt;

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::GenomeError;
use crate::genome::bounds::Bounds;
use crate::genome::real_vector::RealVector;

/// Type of a single decision variable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableType {
    /// Bounded real value, sampled uniformly within its bounds
    Real(Bounds),
    /// Unbounded real value, sampled from a normal distribution
    RealGauss {
        /// Mean of generated values
        mu: f64,
        /// Standard deviation of generated values
        sigma: f64,
    },
    /// Integer value stored as a whole-valued f64
    Integer(Bounds),
}

impl VariableType {
    /// Bounded real variable in `[min, max]`
    pub fn real(min: f64, max: f64) -> Result<Self, GenomeError> {
        Ok(Self::Real(Bounds::try_new(min, max)?))
    }

    /// Unbounded real variable distributed as N(mu, sigma)
    pub fn real_gauss(mu: f64, sigma: f64) -> Result<Self, GenomeError> {
        if !mu.is_finite() || !sigma.is_finite() || sigma < 0.0 {
            return Err(GenomeError::ConstraintViolation(format!(
                "invalid gaussian parameters mu={}, sigma={}",
                mu, sigma
            )));
        }
        Ok(Self::RealGauss { mu, sigma })
    }

    /// Integer variable in `[min, max]`
    pub fn integer(min: i64, max: i64) -> Result<Self, GenomeError> {
        Ok(Self::Integer(Bounds::try_new(min as f64, max as f64)?))
    }

    /// Whether real-valued operators may act on this variable
    pub fn is_real(&self) -> bool {
        matches!(self, Self::Real(_) | Self::RealGauss { .. })
    }

    /// Bounds of the variable, `None` for unbounded reals
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Self::Real(b) | Self::Integer(b) => Some(*b),
            Self::RealGauss { .. } => None,
        }
    }

    /// Draw a random value for this variable
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64, GenomeError> {
        match *self {
            Self::Real(b) => {
                if b.range() == 0.0 {
                    Ok(b.min)
                } else {
                    Ok(rng.gen_range(b.min..=b.max))
                }
            }
            Self::RealGauss { mu, sigma } => {
                let normal = Normal::new(mu, sigma)
                    .map_err(|e| GenomeError::ConstraintViolation(e.to_string()))?;
                Ok(normal.sample(rng))
            }
            Self::Integer(b) => {
                let lo = b.min.ceil() as i64;
                let hi = b.max.floor() as i64;
                if lo > hi {
                    return Err(GenomeError::ConstraintViolation(format!(
                        "no integer in [{}, {}]",
                        b.min, b.max
                    )));
                }
                Ok(rng.gen_range(lo..=hi) as f64)
            }
        }
    }

    /// Bring a value back into the variable's domain
    pub fn repair(&self, value: f64) -> f64 {
        match self {
            Self::Real(b) => b.clamp(value),
            Self::RealGauss { .. } => value,
            Self::Integer(b) => b.clamp(value.round()),
        }
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(b) => write!(f, "Real({}, {})", b.min, b.max),
            Self::RealGauss { mu, sigma } => write!(f, "RealGauss({}, {})", mu, sigma),
            Self::Integer(b) => write!(f, "Integer({}, {})", b.min, b.max),
        }
    }
}

/// Sample a full genome, one value per variable type
pub fn sample_genome<R: Rng + ?Sized>(
    types: &[VariableType],
    rng: &mut R,
) -> Result<RealVector, GenomeError> {
    let genes = types
        .iter()
        .map(|t| t.sample(rng))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RealVector::new(genes))
}

/// Number of variables that real-valued operators may touch
pub fn count_real(types: &[VariableType]) -> usize {
    types.iter().filter(|t| t.is_real()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::traits::{EvolutionaryGenome, RealValuedGenome};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_real_sampling_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let t = VariableType::real(-2.0, 3.0).unwrap();
        for _ in 0..200 {
            let v = t.sample(&mut rng).unwrap();
            assert!((-2.0..=3.0).contains(&v));
        }
    }

    #[test]
    fn test_real_gauss_sampling_statistics() {
        let mut rng = StdRng::seed_from_u64(11);
        let t = VariableType::real_gauss(5.0, 0.5).unwrap();
        let n = 5000;
        let mean = (0..n).map(|_| t.sample(&mut rng).unwrap()).sum::<f64>() / n as f64;
        assert!((mean - 5.0).abs() < 0.05, "mean = {}", mean);
        assert!(t.is_real());
        assert!(t.bounds().is_none());
    }

    #[test]
    fn test_real_gauss_rejects_negative_sigma() {
        assert!(VariableType::real_gauss(0.0, -1.0).is_err());
    }

    #[test]
    fn test_integer_is_not_real() {
        let mut rng = StdRng::seed_from_u64(3);
        let t = VariableType::integer(0, 4).unwrap();
        assert!(!t.is_real());
        for _ in 0..100 {
            let v = t.sample(&mut rng).unwrap();
            assert_eq!(v, v.round());
            assert!((0.0..=4.0).contains(&v));
        }
    }

    #[test]
    fn test_repair() {
        let real = VariableType::real(0.0, 1.0).unwrap();
        assert_eq!(real.repair(1.5), 1.0);
        let int = VariableType::integer(0, 10).unwrap();
        assert_eq!(int.repair(3.6), 4.0);
        let gauss = VariableType::real_gauss(0.0, 1.0).unwrap();
        assert_eq!(gauss.repair(1e9), 1e9);
    }

    #[test]
    fn test_sample_genome_and_count_real() {
        let mut rng = StdRng::seed_from_u64(1);
        let types = vec![
            VariableType::real(0.0, 1.0).unwrap(),
            VariableType::integer(0, 3).unwrap(),
            VariableType::real_gauss(0.0, 1.0).unwrap(),
        ];
        let genome = sample_genome(&types, &mut rng).unwrap();
        assert_eq!(genome.dimension(), 3);
        assert!(genome.genes()[0] <= 1.0);
        assert_eq!(count_real(&types), 2);
    }

    #[test]
    fn test_display() {
        let t = VariableType::real_gauss(0.0, 1.0).unwrap();
        assert_eq!(t.to_string(), "RealGauss(0, 1)");
    }
}
