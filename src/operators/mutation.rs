//! Mutation operators
//!
//! Single-parent variators that perturb real-valued variables.

use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};

use crate::error::{EvoResult, OperatorError};
use crate::genome::traits::RealValuedGenome;
use crate::genome::variable::{count_real, VariableType};
use crate::operators::traits::{check_parents, Variator};
use crate::population::individual::Individual;

/// Per-variable mutation probability
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MutationRate {
    /// Fixed probability for every real variable
    PerVariable(f64),
    /// Expected number of mutated real variables (divided by their count)
    Expected(f64),
}

impl MutationRate {
    /// Probability applied to each real variable of a genome
    pub fn resolve(self, types: &[VariableType]) -> f64 {
        match self {
            Self::PerVariable(p) => p,
            Self::Expected(k) => {
                let n = count_real(types);
                if n == 0 {
                    0.0
                } else {
                    (k / n as f64).min(1.0)
                }
            }
        }
    }
}

/// Gaussian resampling mutation
///
/// Each selected real variable is replaced by a fresh draw from N(mu, sigma).
/// Bounded variables are clamped back into their bounds.
#[derive(Clone, Debug)]
pub struct GaussianMutation {
    /// Mean of the replacement distribution
    pub mu: f64,
    /// Standard deviation of the replacement distribution
    pub sigma: f64,
    /// Per-variable mutation probability
    pub rate: MutationRate,
}

impl GaussianMutation {
    /// Create a new Gaussian mutation drawing from N(mu, sigma)
    pub fn new(mu: f64, sigma: f64) -> Self {
        assert!(sigma >= 0.0, "Sigma must be non-negative");
        Self {
            mu,
            sigma,
            rate: MutationRate::PerVariable(1.0),
        }
    }

    /// Set a fixed mutation probability per variable
    pub fn with_probability(mut self, probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&probability),
            "Probability must be in [0, 1]"
        );
        self.rate = MutationRate::PerVariable(probability);
        self
    }

    /// Mutate on average `count` real variables per genome
    pub fn with_expected_mutations(mut self, count: f64) -> Self {
        assert!(count >= 0.0, "Expected mutation count must be non-negative");
        self.rate = MutationRate::Expected(count);
        self
    }
}

impl Default for GaussianMutation {
    fn default() -> Self {
        Self::new(0.0, 0.1)
    }
}

impl Variator for GaussianMutation {
    fn arity(&self) -> usize {
        1
    }

    fn evolve(
        &self,
        parents: &[Individual],
        types: &[VariableType],
        rng: &mut dyn RngCore,
    ) -> EvoResult<Vec<Individual>> {
        check_parents(parents, 1, types)?;

        let normal = Normal::new(self.mu, self.sigma)
            .map_err(|e| OperatorError::MutationFailed(e.to_string()))?;
        let probability = self.rate.resolve(types);

        let mut child = parents[0].derive();
        let mut changed = false;
        for (i, t) in types.iter().enumerate() {
            if t.is_real() && rng.gen::<f64>() <= probability {
                child.genome.genes_mut()[i] = t.repair(normal.sample(rng));
                changed = true;
            }
        }
        if changed {
            child.invalidate();
        }

        Ok(vec![child])
    }
}

/// Polynomial mutation (bounded)
///
/// Uses the polynomial probability distribution to perturb bounded real
/// variables. Unbounded and integer variables are left alone.
///
/// Reference: Deb, K. (2001). Multi-Objective Optimization using Evolutionary Algorithms.
#[derive(Clone, Debug)]
pub struct PolynomialMutation {
    /// Distribution index (typically 20-100)
    /// Higher values = smaller mutations
    pub eta_m: f64,
    /// Per-variable mutation probability (default: one expected mutation)
    pub rate: MutationRate,
}

impl PolynomialMutation {
    /// Create a new polynomial mutation with the given distribution index
    pub fn new(eta_m: f64) -> Self {
        assert!(eta_m >= 0.0, "Distribution index must be non-negative");
        Self {
            eta_m,
            rate: MutationRate::Expected(1.0),
        }
    }

    /// Set a fixed mutation probability per variable
    pub fn with_probability(mut self, probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&probability),
            "Probability must be in [0, 1]"
        );
        self.rate = MutationRate::PerVariable(probability);
        self
    }

    /// Apply polynomial mutation to a single value
    fn mutate_gene(&self, gene: f64, min: f64, max: f64, rng: &mut dyn RngCore) -> f64 {
        let range = max - min;
        if range <= 0.0 {
            return gene;
        }

        let delta1 = (gene - min) / range;
        let delta2 = (max - gene) / range;

        let u = rng.gen::<f64>();
        let delta_q = if u <= 0.5 {
            let val = 2.0 * u + (1.0 - 2.0 * u) * (1.0 - delta1).powf(self.eta_m + 1.0);
            val.powf(1.0 / (self.eta_m + 1.0)) - 1.0
        } else {
            let val = 2.0 * (1.0 - u) + 2.0 * (u - 0.5) * (1.0 - delta2).powf(self.eta_m + 1.0);
            1.0 - val.powf(1.0 / (self.eta_m + 1.0))
        };

        (gene + delta_q * range).clamp(min, max)
    }
}

impl Default for PolynomialMutation {
    fn default() -> Self {
        Self::new(20.0)
    }
}

impl Variator for PolynomialMutation {
    fn arity(&self) -> usize {
        1
    }

    fn evolve(
        &self,
        parents: &[Individual],
        types: &[VariableType],
        rng: &mut dyn RngCore,
    ) -> EvoResult<Vec<Individual>> {
        check_parents(parents, 1, types)?;

        let probability = self.rate.resolve(types);
        let mut child = parents[0].derive();
        let mut changed = false;

        for (i, t) in types.iter().enumerate() {
            let VariableType::Real(bounds) = t else {
                continue;
            };
            if rng.gen::<f64>() < probability {
                let gene = child.genome.genes()[i];
                child.genome.genes_mut()[i] = self.mutate_gene(gene, bounds.min, bounds.max, rng);
                changed = true;
            }
        }
        if changed {
            child.invalidate();
        }

        Ok(vec![child])
    }
}
