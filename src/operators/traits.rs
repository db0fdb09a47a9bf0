//! Operator traits
//!
//! This module defines the variation and parent-selection seams of the
//! driver. Both take `&mut dyn RngCore` so operators can be boxed and nested
//! inside composite operators.

use rand::RngCore;

use crate::error::{EvoResult, GenomeError, OperatorError};
use crate::genome::traits::EvolutionaryGenome;
use crate::genome::variable::VariableType;
use crate::population::individual::Individual;

/// Variation operator
///
/// Consumes exactly [`Variator::arity`] parents and produces offspring.
/// Offspring are new individuals (fresh ids); any offspring whose genome
/// differs from its parent's is marked unevaluated.
pub trait Variator: Send + Sync {
    /// Number of parents consumed per call
    fn arity(&self) -> usize;

    /// Produce offspring from `parents`
    fn evolve(
        &self,
        parents: &[Individual],
        types: &[VariableType],
        rng: &mut dyn RngCore,
    ) -> EvoResult<Vec<Individual>>;
}

impl<V: Variator + ?Sized> Variator for Box<V> {
    fn arity(&self) -> usize {
        (**self).arity()
    }

    fn evolve(
        &self,
        parents: &[Individual],
        types: &[VariableType],
        rng: &mut dyn RngCore,
    ) -> EvoResult<Vec<Individual>> {
        (**self).evolve(parents, types, rng)
    }
}

/// Check parent count and genome length before variation
pub(crate) fn check_parents(
    parents: &[Individual],
    arity: usize,
    types: &[VariableType],
) -> EvoResult<()> {
    if parents.len() != arity {
        return Err(OperatorError::ArityMismatch {
            expected: arity,
            actual: parents.len(),
        }
        .into());
    }
    for parent in parents {
        let actual = parent.genome.dimension();
        if actual != types.len() {
            return Err(GenomeError::DimensionMismatch {
                expected: types.len(),
                actual,
            }
            .into());
        }
    }
    Ok(())
}

/// Parent selection operator
pub trait ParentSelector: Send + Sync {
    /// Pick `count` parents (by index) from the population
    fn select(&self, count: usize, population: &[Individual], rng: &mut dyn RngCore)
        -> Vec<usize>;
}
