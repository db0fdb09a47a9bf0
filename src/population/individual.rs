//! Individual wrapper type
//!
//! This module provides the Individual type that wraps a genome with its
//! objective values and the transient rank written during selection.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::fitness::traits::Direction;
use crate::genome::real_vector::RealVector;
use crate::genome::traits::EvolutionaryGenome;
use crate::pareto::dominates;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// An individual in the population
///
/// Cloning keeps the identity (`id`); offspring created by variation get a
/// fresh one through [`Individual::derive`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Individual<G = RealVector>
where
    G: EvolutionaryGenome,
{
    id: u64,
    /// The decision variables of this individual
    pub genome: G,
    /// Objective values, one per optimization direction (empty until evaluated)
    pub objectives: Vec<f64>,
    /// Whether `objectives` reflects the current genome
    pub evaluated: bool,
    /// Non-dominated rank from the most recent joint ranking
    #[serde(skip)]
    pub rank: Option<usize>,
    /// Generation when this individual was created
    pub birth_generation: usize,
}

impl<G> Individual<G>
where
    G: EvolutionaryGenome,
{
    /// Create a new individual with an unevaluated genome
    pub fn new(genome: G) -> Self {
        Self {
            id: next_id(),
            genome,
            objectives: Vec::new(),
            evaluated: false,
            rank: None,
            birth_generation: 0,
        }
    }

    /// Create a new individual with known objective values
    pub fn with_objectives(genome: G, objectives: Vec<f64>) -> Self {
        Self {
            objectives,
            evaluated: true,
            ..Self::new(genome)
        }
    }

    /// Unique identity of this individual
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Copy this individual under a fresh identity
    ///
    /// The copy keeps genome and objectives; callers that change the genome
    /// must call [`Individual::invalidate`].
    pub fn derive(&self) -> Self {
        Self {
            id: next_id(),
            genome: self.genome.clone(),
            objectives: self.objectives.clone(),
            evaluated: self.evaluated,
            rank: None,
            birth_generation: self.birth_generation,
        }
    }

    /// Check if this individual has been evaluated
    pub fn is_evaluated(&self) -> bool {
        self.evaluated
    }

    /// Store freshly computed objective values
    pub fn set_objectives(&mut self, objectives: Vec<f64>) {
        self.objectives = objectives;
        self.evaluated = true;
    }

    /// Mark the genome as changed since the last evaluation
    pub fn invalidate(&mut self) {
        self.objectives.clear();
        self.evaluated = false;
        self.rank = None;
    }

    /// Number of objective values
    pub fn num_objectives(&self) -> usize {
        self.objectives.len()
    }

    /// Check if this individual Pareto-dominates another
    pub fn dominates(&self, other: &Self, directions: &[Direction]) -> bool {
        dominates(&self.objectives, &other.objectives, directions)
    }

    /// Set the generation in which this individual was born
    pub fn with_birth_generation(mut self, generation: usize) -> Self {
        self.birth_generation = generation;
        self
    }

    /// Take the genome out of this individual
    pub fn into_genome(self) -> G {
        self.genome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::traits::RealValuedGenome;

    #[test]
    fn test_individual_new() {
        let individual: Individual = Individual::new(RealVector::from([1.0, 2.0]));
        assert!(!individual.is_evaluated());
        assert!(individual.objectives.is_empty());
        assert_eq!(individual.rank, None);
    }

    #[test]
    fn test_individual_with_objectives() {
        let individual = Individual::with_objectives(RealVector::from([1.0]), vec![3.0, 4.0]);
        assert!(individual.is_evaluated());
        assert_eq!(individual.num_objectives(), 2);
    }

    #[test]
    fn test_ids_unique_and_clone_preserves() {
        let a: Individual = Individual::new(RealVector::from([0.0]));
        let b: Individual = Individual::new(RealVector::from([0.0]));
        assert_ne!(a.id(), b.id());

        let c = a.clone();
        assert_eq!(a.id(), c.id());

        let d = a.derive();
        assert_ne!(a.id(), d.id());
        assert_eq!(a.genome, d.genome);
    }

    #[test]
    fn test_derive_drops_rank() {
        let mut a = Individual::with_objectives(RealVector::from([0.0]), vec![1.0]);
        a.rank = Some(3);
        let d = a.derive();
        assert_eq!(d.rank, None);
        assert!(d.is_evaluated());
    }

    #[test]
    fn test_invalidate() {
        let mut ind = Individual::with_objectives(RealVector::from([1.0]), vec![1.0, 2.0]);
        ind.rank = Some(0);
        ind.genome.genes_mut()[0] = 9.0;
        ind.invalidate();
        assert!(!ind.is_evaluated());
        assert!(ind.objectives.is_empty());
        assert_eq!(ind.rank, None);

        ind.set_objectives(vec![5.0, 6.0]);
        assert!(ind.is_evaluated());
    }

    #[test]
    fn test_individual_dominates() {
        let dirs = [Direction::Minimize, Direction::Minimize];
        let a = Individual::with_objectives(RealVector::from([0.0]), vec![1.0, 2.0]);
        let b = Individual::with_objectives(RealVector::from([0.0]), vec![2.0, 3.0]);
        assert!(a.dominates(&b, &dirs));
        assert!(!b.dominates(&a, &dirs));
    }

    #[test]
    fn test_serde_skips_rank() {
        let mut ind = Individual::with_objectives(RealVector::from([1.0]), vec![2.0]);
        ind.rank = Some(4);
        let json = serde_json::to_string(&ind).unwrap();
        let back: Individual = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id(), ind.id());
        assert_eq!(back.rank, None);
        assert_eq!(back.objectives, vec![2.0]);
    }
}
