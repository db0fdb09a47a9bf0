//! Composite variation operators
//!
//! Operators that chain or choose between other variators, plus the default
//! variator picked for a problem when none is configured.

use rand::{Rng, RngCore};

use crate::error::{EvoResult, OperatorError};
use crate::genome::variable::VariableType;
use crate::operators::crossover::SbxCrossover;
use crate::operators::mutation::{GaussianMutation, PolynomialMutation};
use crate::operators::traits::{check_parents, Variator};
use crate::population::individual::Individual;

/// Crossover followed by mutation of every child
#[derive(Clone, Debug)]
pub struct GaOperator<C, M> {
    /// Recombination step
    pub crossover: C,
    /// Single-parent step applied to each crossover child
    pub mutation: M,
}

impl<C: Variator, M: Variator> GaOperator<C, M> {
    /// Create a new GA operator
    pub fn new(crossover: C, mutation: M) -> Self {
        Self {
            crossover,
            mutation,
        }
    }
}

impl<C: Variator, M: Variator> Variator for GaOperator<C, M> {
    fn arity(&self) -> usize {
        self.crossover.arity()
    }

    fn evolve(
        &self,
        parents: &[Individual],
        types: &[VariableType],
        rng: &mut dyn RngCore,
    ) -> EvoResult<Vec<Individual>> {
        let children = self.crossover.evolve(parents, types, rng)?;
        let mut offspring = Vec::with_capacity(children.len());
        for child in children {
            offspring.extend(self.mutation.evolve(std::slice::from_ref(&child), types, rng)?);
        }
        Ok(offspring)
    }
}

/// Choose between variation, mutation, and reproduction
///
/// With probability `p_variation` the parents are recombined; with
/// probability `p_mutation` each parent is mutated on its own; otherwise the
/// parents are returned unchanged.
#[derive(Clone, Debug)]
pub struct VarOr<V, M> {
    variation: V,
    mutation: M,
    p_variation: f64,
    p_mutation: f64,
}

impl<V: Variator, M: Variator> VarOr<V, M> {
    /// Create a new VarOr operator
    ///
    /// Fails if either probability lies outside `[0, 1]`, their sum exceeds
    /// one, or `mutation` is not a single-parent operator.
    pub fn new(
        variation: V,
        mutation: M,
        p_variation: f64,
        p_mutation: f64,
    ) -> Result<Self, OperatorError> {
        for (name, p) in [("p_variation", p_variation), ("p_mutation", p_mutation)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(OperatorError::InvalidConfiguration(format!(
                    "{} must be in [0, 1], got {}",
                    name, p
                )));
            }
        }
        if p_variation + p_mutation > 1.0 + f64::EPSILON {
            return Err(OperatorError::InvalidConfiguration(format!(
                "p_variation + p_mutation must not exceed 1, got {}",
                p_variation + p_mutation
            )));
        }
        if mutation.arity() != 1 {
            return Err(OperatorError::InvalidConfiguration(format!(
                "mutation must take a single parent, got arity {}",
                mutation.arity()
            )));
        }
        Ok(Self {
            variation,
            mutation,
            p_variation,
            p_mutation,
        })
    }

    /// Probability of applying the variation operator
    pub fn p_variation(&self) -> f64 {
        self.p_variation
    }

    /// Probability of mutating each parent instead
    pub fn p_mutation(&self) -> f64 {
        self.p_mutation
    }
}

impl<V: Variator, M: Variator> Variator for VarOr<V, M> {
    fn arity(&self) -> usize {
        self.variation.arity()
    }

    fn evolve(
        &self,
        parents: &[Individual],
        types: &[VariableType],
        rng: &mut dyn RngCore,
    ) -> EvoResult<Vec<Individual>> {
        check_parents(parents, self.arity(), types)?;

        let choice = rng.gen::<f64>();
        if choice < self.p_variation {
            self.variation.evolve(parents, types, rng)
        } else if choice < self.p_variation + self.p_mutation {
            let mut children = Vec::with_capacity(parents.len());
            for parent in parents {
                children.extend(self.mutation.evolve(std::slice::from_ref(parent), types, rng)?);
            }
            Ok(children)
        } else {
            Ok(parents.to_vec())
        }
    }
}

/// Default variator for a set of decision variables
///
/// SBX followed by polynomial mutation. When no variable is bounded the
/// polynomial step would be a no-op, so Gaussian resampling from the first
/// unbounded variable's distribution is used instead.
pub fn default_variator(types: &[VariableType]) -> Box<dyn Variator> {
    let any_bounded = types
        .iter()
        .any(|t| matches!(t, VariableType::Real(_)));
    let gauss = types.iter().find_map(|t| match t {
        VariableType::RealGauss { mu, sigma } => Some((*mu, *sigma)),
        _ => None,
    });

    match (any_bounded, gauss) {
        (false, Some((mu, sigma))) => Box::new(GaOperator::new(
            SbxCrossover::default(),
            GaussianMutation::new(mu, sigma).with_expected_mutations(1.0),
        )),
        _ => Box::new(GaOperator::new(
            SbxCrossover::default(),
            PolynomialMutation::default(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvolutionError;
    use crate::genome::real_vector::RealVector;
    use crate::genome::traits::RealValuedGenome;
    use crate::operators::crossover::UniformCrossover;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn parents() -> Vec<Individual> {
        vec![
            Individual::with_objectives(RealVector::new(vec![0.1; 4]), vec![1.0, 2.0]),
            Individual::with_objectives(RealVector::new(vec![0.9; 4]), vec![2.0, 1.0]),
        ]
    }

    fn types() -> Vec<VariableType> {
        vec![VariableType::real(0.0, 1.0).unwrap(); 4]
    }

    #[test]
    fn test_ga_operator_produces_two_children() {
        let mut rng = StdRng::seed_from_u64(42);
        let op = GaOperator::new(SbxCrossover::default(), PolynomialMutation::default());
        assert_eq!(op.arity(), 2);

        let children = op.evolve(&parents(), &types(), &mut rng).unwrap();
        assert_eq!(children.len(), 2);
        for child in &children {
            assert!(child.genome.genes().iter().all(|&g| (0.0..=1.0).contains(&g)));
        }
    }

    #[test]
    fn test_varor_rejects_probabilities_above_one() {
        let err = VarOr::new(
            UniformCrossover::default(),
            GaussianMutation::default(),
            0.7,
            0.4,
        )
        .unwrap_err();
        assert!(matches!(err, OperatorError::InvalidConfiguration(_)));

        assert!(VarOr::new(
            UniformCrossover::default(),
            GaussianMutation::default(),
            -0.1,
            0.4
        )
        .is_err());
    }

    #[test]
    fn test_varor_rejects_multi_parent_mutation() {
        assert!(VarOr::new(
            UniformCrossover::default(),
            UniformCrossover::default(),
            0.5,
            0.5
        )
        .is_err());
    }

    #[test]
    fn test_varor_reproduction_passes_parents_through() {
        let mut rng = StdRng::seed_from_u64(0);
        let op = VarOr::new(
            UniformCrossover::default(),
            GaussianMutation::default(),
            0.0,
            0.0,
        )
        .unwrap();
        let parents = parents();

        let children = op.evolve(&parents, &types(), &mut rng).unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].id(), parents[0].id());
        assert_eq!(children[1].genome.genes(), parents[1].genome.genes());
        assert!(children.iter().all(|c| c.is_evaluated()));
    }

    #[test]
    fn test_varor_mutation_branch_mutates_each_parent() {
        let mut rng = StdRng::seed_from_u64(0);
        let op = VarOr::new(
            UniformCrossover::default(),
            GaussianMutation::new(0.5, 0.01),
            0.0,
            1.0,
        )
        .unwrap();

        let children = op.evolve(&parents(), &types(), &mut rng).unwrap();
        assert_eq!(children.len(), 2);
        for child in &children {
            assert!(!child.is_evaluated());
            assert!(child.genome.genes().iter().all(|&g| (g - 0.5).abs() < 0.1));
        }
    }

    #[test]
    fn test_varor_checks_arity() {
        let mut rng = StdRng::seed_from_u64(0);
        let op = VarOr::new(
            UniformCrossover::default(),
            GaussianMutation::default(),
            0.5,
            0.5,
        )
        .unwrap();
        let single = &parents()[..1];
        let err = op.evolve(single, &types(), &mut rng).unwrap_err();
        assert!(matches!(err, EvolutionError::Operator(OperatorError::ArityMismatch { .. })));
    }

    #[test]
    fn test_default_variator() {
        let mut rng = StdRng::seed_from_u64(3);
        let variator = default_variator(&types());
        assert_eq!(variator.arity(), 2);
        assert_eq!(variator.evolve(&parents(), &types(), &mut rng).unwrap().len(), 2);

        let unbounded = vec![VariableType::real_gauss(0.0, 1.0).unwrap(); 4];
        let variator = default_variator(&unbounded);
        assert_eq!(variator.arity(), 2);
        assert_eq!(
            variator.evolve(&parents(), &unbounded, &mut rng).unwrap().len(),
            2
        );
    }
}
