//! Pareto dominance, non-dominated ranking and hypervolume
//!
//! - [`dominates`] / [`compare_dominance`]: the dominance relation under
//!   per-objective directions
//! - [`ranking`]: fast non-dominated sorting into fronts
//! - [`hypervolume`]: exact hypervolume and least-contributor oracle

pub mod hypervolume;
pub mod ranking;

use crate::fitness::traits::Direction;

/// Outcome of comparing two objective vectors by Pareto dominance
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dominance {
    /// The first vector dominates the second
    Dominates,
    /// The second vector dominates the first
    DominatedBy,
    /// Neither dominates the other (includes equal vectors)
    NonDominated,
}

/// Returns `true` if `a` Pareto-dominates `b`.
///
/// `a` dominates `b` when it is no worse in every objective and strictly
/// better in at least one, under the given directions.
pub fn dominates(a: &[f64], b: &[f64], directions: &[Direction]) -> bool {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len(), directions.len());

    let mut strictly_better = false;
    for ((&av, &bv), &dir) in a.iter().zip(b.iter()).zip(directions.iter()) {
        if dir.is_better(bv, av) {
            return false;
        }
        if dir.is_better(av, bv) {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Compare two objective vectors by Pareto dominance
pub fn compare_dominance(a: &[f64], b: &[f64], directions: &[Direction]) -> Dominance {
    if dominates(a, b, directions) {
        Dominance::Dominates
    } else if dominates(b, a, directions) {
        Dominance::DominatedBy
    } else {
        Dominance::NonDominated
    }
}

pub mod prelude {
    pub use super::hypervolume::{
        contributions, hypervolume, least_contributor, nadir_reference, REFERENCE_NUDGE,
    };
    pub use super::ranking::*;
    pub use super::{compare_dominance, dominates, Dominance};
}
