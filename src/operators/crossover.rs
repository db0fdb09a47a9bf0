//! Crossover operators
//!
//! Two-parent variators that recombine real-valued variables. Non-real
//! variables are copied from the corresponding parent untouched.

use rand::{Rng, RngCore};

use crate::error::EvoResult;
use crate::genome::traits::RealValuedGenome;
use crate::genome::variable::VariableType;
use crate::operators::traits::{check_parents, Variator};
use crate::population::individual::Individual;

/// Uniform crossover
///
/// With probability `probability` the operator is applied; each real
/// variable is then swapped between the two children with probability 0.5.
#[derive(Clone, Debug)]
pub struct UniformCrossover {
    /// Probability that crossover happens at all
    pub probability: f64,
}

impl UniformCrossover {
    /// Create a new uniform crossover applied with the given probability
    pub fn new(probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&probability),
            "Probability must be in [0, 1]"
        );
        Self { probability }
    }
}

impl Default for UniformCrossover {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Variator for UniformCrossover {
    fn arity(&self) -> usize {
        2
    }

    fn evolve(
        &self,
        parents: &[Individual],
        types: &[VariableType],
        rng: &mut dyn RngCore,
    ) -> EvoResult<Vec<Individual>> {
        check_parents(parents, 2, types)?;

        let mut child1 = parents[0].derive();
        let mut child2 = parents[1].derive();

        if rng.gen::<f64>() <= self.probability {
            let mut swapped = false;
            for (i, t) in types.iter().enumerate() {
                if t.is_real() && rng.gen::<f64>() <= 0.5 {
                    std::mem::swap(
                        &mut child1.genome.genes_mut()[i],
                        &mut child2.genome.genes_mut()[i],
                    );
                    swapped = true;
                }
            }
            if swapped {
                child1.invalidate();
                child2.invalidate();
            }
        }

        Ok(vec![child1, child2])
    }
}

/// Simulated Binary Crossover (SBX)
///
/// SBX generates offspring from parents using a spread factor that
/// simulates single-point crossover for binary strings. Bounded variables
/// are clamped back into their bounds.
///
/// Reference: Deb, K., & Agrawal, R. B. (1995). Simulated Binary Crossover
/// for Continuous Search Space.
#[derive(Clone, Debug)]
pub struct SbxCrossover {
    /// Distribution index (typically 2-20)
    /// Higher values = offspring closer to parents
    pub eta: f64,
    /// Per-variable crossover probability
    pub crossover_probability: f64,
}

impl SbxCrossover {
    /// Create a new SBX crossover with the given distribution index
    pub fn new(eta: f64) -> Self {
        assert!(eta >= 0.0, "Distribution index must be non-negative");
        Self {
            eta,
            crossover_probability: 0.9,
        }
    }

    /// Set the per-variable crossover probability
    pub fn with_probability(mut self, probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&probability),
            "Probability must be in [0, 1]"
        );
        self.crossover_probability = probability;
        self
    }

    /// Compute the spread factor β from a uniform random value
    fn spread_factor(&self, u: f64) -> f64 {
        if u <= 0.5 {
            (2.0 * u).powf(1.0 / (self.eta + 1.0))
        } else {
            (1.0 / (2.0 * (1.0 - u))).powf(1.0 / (self.eta + 1.0))
        }
    }
}

impl Default for SbxCrossover {
    fn default() -> Self {
        Self::new(15.0)
    }
}

impl Variator for SbxCrossover {
    fn arity(&self) -> usize {
        2
    }

    fn evolve(
        &self,
        parents: &[Individual],
        types: &[VariableType],
        rng: &mut dyn RngCore,
    ) -> EvoResult<Vec<Individual>> {
        check_parents(parents, 2, types)?;

        let mut child1 = parents[0].derive();
        let mut child2 = parents[1].derive();
        let mut changed = false;

        for (i, t) in types.iter().enumerate() {
            if !t.is_real() || rng.gen::<f64>() >= self.crossover_probability {
                continue;
            }
            let x1 = parents[0].genome.genes()[i];
            let x2 = parents[1].genome.genes()[i];

            // Only apply if parents differ sufficiently
            if (x1 - x2).abs() <= 1e-14 {
                continue;
            }

            let beta = self.spread_factor(rng.gen::<f64>());
            child1.genome.genes_mut()[i] = t.repair(0.5 * ((1.0 + beta) * x1 + (1.0 - beta) * x2));
            child2.genome.genes_mut()[i] = t.repair(0.5 * ((1.0 - beta) * x1 + (1.0 + beta) * x2));
            changed = true;
        }

        if changed {
            child1.invalidate();
            child2.invalidate();
        }

        Ok(vec![child1, child2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::real_vector::RealVector;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn parent(genes: Vec<f64>) -> Individual {
        let n = genes.len();
        Individual::with_objectives(RealVector::new(genes), vec![0.0; n.min(2)])
    }

    #[test]
    fn test_uniform_crossover_preserves_gene_multiset() {
        let mut rng = StdRng::seed_from_u64(5);
        let types = vec![VariableType::real(-10.0, 10.0).unwrap(); 6];
        let p1 = parent(vec![1.0; 6]);
        let p2 = parent(vec![2.0; 6]);

        let children = UniformCrossover::new(1.0)
            .evolve(&[p1.clone(), p2.clone()], &types, &mut rng)
            .unwrap();

        assert_eq!(children.len(), 2);
        for i in 0..6 {
            let mut pair = [children[0].genome[i], children[1].genome[i]];
            pair.sort_by(|a, b| a.total_cmp(b));
            assert_eq!(pair, [1.0, 2.0]);
        }
        assert_ne!(children[0].id(), p1.id());
        assert_ne!(children[1].id(), p2.id());
    }

    #[test]
    fn test_uniform_crossover_skips_integer_variables() {
        let mut rng = StdRng::seed_from_u64(9);
        let types = vec![VariableType::integer(0, 10).unwrap(); 4];
        let p1 = parent(vec![1.0; 4]);
        let p2 = parent(vec![2.0; 4]);

        let children = UniformCrossover::new(1.0)
            .evolve(&[p1, p2], &types, &mut rng)
            .unwrap();

        assert_eq!(children[0].genome.genes(), &[1.0; 4]);
        assert!(children[0].is_evaluated());
    }

    #[test]
    fn test_uniform_crossover_zero_probability_copies() {
        let mut rng = StdRng::seed_from_u64(1);
        let types = vec![VariableType::real(0.0, 5.0).unwrap(); 3];
        let children = UniformCrossover::new(0.0)
            .evolve(&[parent(vec![1.0; 3]), parent(vec![2.0; 3])], &types, &mut rng)
            .unwrap();
        assert_eq!(children[0].genome.genes(), &[1.0; 3]);
        assert_eq!(children[1].genome.genes(), &[2.0; 3]);
    }

    #[test]
    fn test_sbx_respects_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let types = vec![VariableType::real(0.0, 1.0).unwrap(); 5];
        let sbx = SbxCrossover::new(2.0).with_probability(1.0);

        for _ in 0..100 {
            let children = sbx
                .evolve(
                    &[parent(vec![0.05; 5]), parent(vec![0.95; 5])],
                    &types,
                    &mut rng,
                )
                .unwrap();
            for child in &children {
                assert!(child.genome.genes().iter().all(|&g| (0.0..=1.0).contains(&g)));
                assert!(!child.is_evaluated());
            }
        }
    }

    #[test]
    fn test_sbx_identical_parents_unchanged() {
        let mut rng = StdRng::seed_from_u64(3);
        let types = vec![VariableType::real(0.0, 1.0).unwrap(); 3];
        let children = SbxCrossover::new(15.0)
            .evolve(&[parent(vec![0.5; 3]), parent(vec![0.5; 3])], &types, &mut rng)
            .unwrap();
        assert_eq!(children[0].genome.genes(), &[0.5; 3]);
        assert!(children[0].is_evaluated());
    }

    #[test]
    fn test_sbx_arity_mismatch() {
        let mut rng = StdRng::seed_from_u64(3);
        let types = vec![VariableType::real(0.0, 1.0).unwrap()];
        assert!(SbxCrossover::default()
            .evolve(&[parent(vec![0.5])], &types, &mut rng)
            .is_err());
    }
}
