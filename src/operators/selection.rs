//! Selection operators
//!
//! Parent selection for the steady-state loop.

use rand::{Rng, RngCore};

use crate::fitness::traits::Direction;
use crate::operators::traits::ParentSelector;
use crate::population::individual::Individual;

/// Dominance tournament selection
///
/// Draws `tournament_size` random competitors (with replacement). A
/// challenger replaces the current winner only if it Pareto-dominates it,
/// so mutually non-dominated competitors keep the earlier draw.
#[derive(Clone, Debug)]
pub struct TournamentSelector {
    /// Tournament size (number of individuals competing)
    pub tournament_size: usize,
    /// Optimization direction per objective
    pub directions: Vec<Direction>,
}

impl TournamentSelector {
    /// Create a new tournament selection with the given size
    pub fn new(tournament_size: usize, directions: Vec<Direction>) -> Self {
        assert!(tournament_size >= 1, "Tournament size must be at least 1");
        Self {
            tournament_size,
            directions,
        }
    }

    /// Create binary tournament selection (size = 2)
    pub fn binary(directions: Vec<Direction>) -> Self {
        Self::new(2, directions)
    }

    fn tournament(&self, population: &[Individual], rng: &mut dyn RngCore) -> usize {
        let mut winner = rng.gen_range(0..population.len());
        for _ in 1..self.tournament_size {
            let candidate = rng.gen_range(0..population.len());
            if population[candidate].dominates(&population[winner], &self.directions) {
                winner = candidate;
            }
        }
        winner
    }
}

impl ParentSelector for TournamentSelector {
    fn select(
        &self,
        count: usize,
        population: &[Individual],
        rng: &mut dyn RngCore,
    ) -> Vec<usize> {
        if population.is_empty() {
            return Vec::new();
        }
        (0..count).map(|_| self.tournament(population, rng)).collect()
    }
}
