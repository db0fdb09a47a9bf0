//! Non-dominated ranking
//!
//! Fast non-dominated sort (Deb et al., 2002): rank 0 is the set of
//! non-dominated vectors, rank i is non-dominated once ranks 0..i are removed.

use crate::fitness::traits::Direction;
use crate::genome::traits::EvolutionaryGenome;
use crate::pareto::dominates;
use crate::population::individual::Individual;

/// Fast non-dominated sort
///
/// Returns fronts where `fronts[0]` is the Pareto-optimal front. Each front
/// lists indices into `values` in ascending order.
///
/// Complexity: O(M * N^2) where M = objectives, N = vectors.
pub fn non_dominated_sort<V: AsRef<[f64]>>(
    values: &[V],
    directions: &[Direction],
) -> Vec<Vec<usize>> {
    let n = values.len();
    if n == 0 {
        return vec![];
    }

    // domination_count[i] = number of vectors that dominate i
    let mut domination_count = vec![0usize; n];
    // dominated_set[i] = vectors that i dominates
    let mut dominated_set: Vec<Vec<usize>> = vec![vec![]; n];

    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = (values[i].as_ref(), values[j].as_ref());
            if dominates(a, b, directions) {
                dominated_set[i].push(j);
                domination_count[j] += 1;
            } else if dominates(b, a, directions) {
                dominated_set[j].push(i);
                domination_count[i] += 1;
            }
        }
    }

    let mut fronts: Vec<Vec<usize>> = vec![];
    let mut current_front: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();

    while !current_front.is_empty() {
        let mut next_front = vec![];
        for &i in &current_front {
            for &j in &dominated_set[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    next_front.push(j);
                }
            }
        }
        next_front.sort_unstable();

        fronts.push(current_front);
        current_front = next_front;
    }

    fronts
}

/// Rank a pool of individuals in place
///
/// Overwrites every member's `rank` with its front index in this pool and
/// returns the fronts. Ranks from any earlier call are discarded.
pub fn assign_ranks<G: EvolutionaryGenome>(
    pool: &mut [Individual<G>],
    directions: &[Direction],
) -> Vec<Vec<usize>> {
    let fronts = {
        let values: Vec<&[f64]> = pool.iter().map(|ind| ind.objectives.as_slice()).collect();
        non_dominated_sort(&values, directions)
    };

    for (rank, front) in fronts.iter().enumerate() {
        for &i in front {
            pool[i].rank = Some(rank);
        }
    }

    fronts
}
