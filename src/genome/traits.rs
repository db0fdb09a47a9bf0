//! Core genome traits
//!
//! This module defines the `EvolutionaryGenome` trait carried by every
//! individual, and the `RealValuedGenome` refinement used by the variation
//! operators.

use serde::{de::DeserializeOwned, Serialize};

use crate::error::GenomeError;

/// Decision-variable container for an individual.
///
/// The environmental selector never looks inside a genome; it only needs
/// genomes to be cloneable and thread-safe so individuals can move between
/// the offspring pool, the population and the archive.
pub trait EvolutionaryGenome: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Number of decision variables
    fn dimension(&self) -> usize;

    /// Distance metric between two genomes (default: 0.0)
    fn distance(&self, _other: &Self) -> f64 {
        0.0
    }
}

/// Trait for genomes that can be represented as real vectors
pub trait RealValuedGenome: EvolutionaryGenome {
    /// Get the genes as a slice of f64 values
    fn genes(&self) -> &[f64];

    /// Get the genes as a mutable slice of f64 values
    fn genes_mut(&mut self) -> &mut [f64];

    /// Create from a vector of genes
    fn from_genes(genes: Vec<f64>) -> Result<Self, GenomeError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct MockGenome {
        genes: Vec<f64>,
    }

    impl EvolutionaryGenome for MockGenome {
        fn dimension(&self) -> usize {
            self.genes.len()
        }
    }

    impl RealValuedGenome for MockGenome {
        fn genes(&self) -> &[f64] {
            &self.genes
        }

        fn genes_mut(&mut self) -> &mut [f64] {
            &mut self.genes
        }

        fn from_genes(genes: Vec<f64>) -> Result<Self, GenomeError> {
            if genes.is_empty() {
                return Err(GenomeError::InvalidStructure("no genes".to_string()));
            }
            Ok(Self { genes })
        }
    }

    #[test]
    fn test_default_distance_is_zero() {
        let a = MockGenome { genes: vec![1.0] };
        let b = MockGenome { genes: vec![5.0] };
        assert_eq!(a.distance(&b), 0.0);
    }

    #[test]
    fn test_from_genes_validation() {
        assert!(MockGenome::from_genes(vec![]).is_err());
        let g = MockGenome::from_genes(vec![1.0, 2.0]).unwrap();
        assert_eq!(g.dimension(), 2);
        assert_eq!(g.genes(), &[1.0, 2.0]);
    }
}
