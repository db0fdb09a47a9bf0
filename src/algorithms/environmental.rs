//! Steady-state environmental selection
//!
//! Merges offspring into the current population and truncates the pool back
//! to a fixed size. Whole non-dominated fronts are accepted in rank order;
//! the first front that does not fit is thinned one member at a time.

use serde::{Deserialize, Serialize};

use crate::error::{EvoResult, EvolutionError};
use crate::fitness::traits::Direction;
use crate::genome::traits::EvolutionaryGenome;
use crate::pareto::hypervolume::{least_contributor, nadir_reference};
use crate::pareto::ranking::assign_ranks;
use crate::population::archive::Archive;
use crate::population::individual::Individual;

/// Rule used to drop members of the boundary front
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMethod {
    /// Drop the member dominated by the most pool members
    ///
    /// On the first front every count is zero, so the hypervolume rule is
    /// used there instead.
    #[default]
    DominanceCount,
    /// Drop the least hypervolume contributor
    Hypervolume,
}

/// Select the next population from `offspring` followed by `current`
///
/// Returns exactly `target_size` individuals taken from the combined pool.
/// Survivors are ordered front by front, keeping pool order inside a front.
/// Each survivor carries its rank within the combined pool.
///
/// # Errors
///
/// * [`EvolutionError::Configuration`] if `offspring` is empty or
///   `target_size` is zero or larger than the combined pool.
/// * [`EvolutionError::DataInconsistency`] if `directions` is empty, or a
///   pool member is unevaluated or has the wrong number of objectives.
/// * [`EvolutionError::Selection`] if the hypervolume rule cannot pick a
///   least contributor.
pub fn select<G: EvolutionaryGenome>(
    offspring: Vec<Individual<G>>,
    current: Vec<Individual<G>>,
    target_size: usize,
    directions: &[Direction],
    method: SelectionMethod,
) -> EvoResult<Vec<Individual<G>>> {
    if offspring.is_empty() {
        return Err(EvolutionError::Configuration(
            "at least one offspring is required".to_string(),
        ));
    }
    if target_size == 0 {
        return Err(EvolutionError::Configuration(
            "target population size must be at least 1".to_string(),
        ));
    }

    let mut pool = offspring;
    pool.extend(current);

    if target_size > pool.len() {
        return Err(EvolutionError::Configuration(format!(
            "target population size {} exceeds the {} available candidates",
            target_size,
            pool.len()
        )));
    }
    check_objectives(&pool, directions)?;

    let fronts = assign_ranks(&mut pool, directions);

    let mut survivors: Vec<usize> = Vec::with_capacity(target_size);
    for (rank, front) in fronts.into_iter().enumerate() {
        let open = target_size - survivors.len();
        if open == 0 {
            break;
        }
        if front.len() <= open {
            survivors.extend(front);
            continue;
        }

        tracing::debug!(
            pool = pool.len(),
            target_size,
            boundary_rank = rank,
            boundary_size = front.len(),
            removals = front.len() - open,
            ?method,
            "truncating boundary front"
        );
        survivors.extend(truncate_front(&pool, front, open, rank, directions, method)?);
        break;
    }

    Ok(take(pool, &survivors))
}

/// Remove boundary members one at a time until `open` remain
fn truncate_front<G: EvolutionaryGenome>(
    pool: &[Individual<G>],
    mut front: Vec<usize>,
    open: usize,
    rank: usize,
    directions: &[Direction],
    method: SelectionMethod,
) -> EvoResult<Vec<usize>> {
    while front.len() > open {
        let worst = match method {
            SelectionMethod::DominanceCount if rank > 0 => most_dominated(pool, &front, directions),
            _ => least_hypervolume_contributor(pool, &front, directions)?,
        };
        let removed = front.remove(worst);
        tracing::trace!(removed = pool[removed].id(), remaining = front.len(), "dropped boundary member");
    }
    Ok(front)
}

/// Position in `front` of the member dominated by the most pool members
///
/// Ties resolve to the earliest position.
fn most_dominated<G: EvolutionaryGenome>(
    pool: &[Individual<G>],
    front: &[usize],
    directions: &[Direction],
) -> usize {
    let mut worst = 0;
    let mut worst_count = 0;
    for (pos, &i) in front.iter().enumerate() {
        let count = pool
            .iter()
            .filter(|other| other.dominates(&pool[i], directions))
            .count();
        if pos == 0 || count > worst_count {
            worst = pos;
            worst_count = count;
        }
    }
    worst
}

/// Position in `front` of the least hypervolume contributor
fn least_hypervolume_contributor<G: EvolutionaryGenome>(
    pool: &[Individual<G>],
    front: &[usize],
    directions: &[Direction],
) -> EvoResult<usize> {
    let points: Vec<Vec<f64>> = front
        .iter()
        .map(|&i| {
            pool[i]
                .objectives
                .iter()
                .zip(directions)
                .map(|(&v, d)| d.to_minimization(v))
                .collect()
        })
        .collect();
    let reference = nadir_reference(&points)?;
    Ok(least_contributor(&points, &reference)?)
}

fn check_objectives<G: EvolutionaryGenome>(
    pool: &[Individual<G>],
    directions: &[Direction],
) -> EvoResult<()> {
    if directions.is_empty() {
        return Err(EvolutionError::DataInconsistency(
            "at least one objective direction is required".to_string(),
        ));
    }
    for (i, ind) in pool.iter().enumerate() {
        if !ind.is_evaluated() {
            return Err(EvolutionError::DataInconsistency(format!(
                "pool member {} has not been evaluated",
                i
            )));
        }
        if ind.num_objectives() != directions.len() {
            return Err(EvolutionError::DataInconsistency(format!(
                "pool member {} has {} objectives, expected {}",
                i,
                ind.num_objectives(),
                directions.len()
            )));
        }
    }
    Ok(())
}

/// Move the individuals at `indices` out of `pool`, in that order
fn take<G: EvolutionaryGenome>(pool: Vec<Individual<G>>, indices: &[usize]) -> Vec<Individual<G>> {
    let mut slots: Vec<Option<Individual<G>>> = pool.into_iter().map(Some).collect();
    indices.iter().filter_map(|&i| slots[i].take()).collect()
}

/// Environmental selector with optional archive mirroring
///
/// Holds the objective directions and the truncation rule for a run. When an
/// archive is attached, every selected population is appended to it.
#[derive(Clone, Debug)]
pub struct EnvironmentalSelector<G = crate::genome::real_vector::RealVector>
where
    G: EvolutionaryGenome,
{
    directions: Vec<Direction>,
    method: SelectionMethod,
    archive: Option<Archive<G>>,
}

impl<G: EvolutionaryGenome> EnvironmentalSelector<G> {
    /// Create a selector without an archive
    pub fn new(directions: Vec<Direction>, method: SelectionMethod) -> Self {
        Self {
            directions,
            method,
            archive: None,
        }
    }

    /// Mirror every selected population into `archive`
    pub fn with_archive(mut self, archive: Archive<G>) -> Self {
        self.archive = Some(archive);
        self
    }

    /// Objective directions
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// Boundary truncation rule
    pub fn method(&self) -> SelectionMethod {
        self.method
    }

    /// Attached archive, if any
    pub fn archive(&self) -> Option<&Archive<G>> {
        self.archive.as_ref()
    }

    /// Select the next population and append it to the archive
    pub fn select(
        &self,
        offspring: Vec<Individual<G>>,
        current: Vec<Individual<G>>,
        target_size: usize,
    ) -> EvoResult<Vec<Individual<G>>> {
        let survivors = select(offspring, current, target_size, &self.directions, self.method)?;
        if let Some(archive) = &self.archive {
            archive.extend(&survivors);
        }
        Ok(survivors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::real_vector::RealVector;

    const MIN2: [Direction; 2] = [Direction::Minimize, Direction::Minimize];

    fn ind(objectives: [f64; 2]) -> Individual {
        Individual::with_objectives(RealVector::from([0.0]), objectives.to_vec())
    }

    fn objectives(population: &[Individual]) -> Vec<Vec<f64>> {
        population.iter().map(|i| i.objectives.clone()).collect()
    }

    #[test]
    fn test_whole_fronts_fill_exactly() {
        let current = vec![ind([1.0, 1.0]), ind([2.0, 2.0]), ind([3.0, 3.0])];
        let offspring = vec![ind([4.0, 4.0])];

        let next = select(offspring, current, 3, &MIN2, SelectionMethod::Hypervolume).unwrap();
        assert_eq!(
            objectives(&next),
            vec![vec![1.0, 1.0], vec![2.0, 2.0], vec![3.0, 3.0]]
        );
        assert_eq!(next[0].rank, Some(0));
        assert_eq!(next[2].rank, Some(2));
    }

    #[test]
    fn test_most_dominated_removed_on_later_front() {
        // Rank 0 is (1,5), (5,1), (4,4); on rank 1, (2,6) is dominated once
        // and (6,5) three times
        let current = vec![ind([1.0, 5.0]), ind([5.0, 1.0]), ind([6.0, 5.0]), ind([4.0, 4.0])];
        let offspring = vec![ind([2.0, 6.0])];

        let next = select(offspring, current, 4, &MIN2, SelectionMethod::DominanceCount).unwrap();
        let objs = objectives(&next);
        assert_eq!(objs.len(), 4);
        assert!(!objs.contains(&vec![6.0, 5.0]));
        assert!(objs.contains(&vec![2.0, 6.0]));
    }

    #[test]
    fn test_dominance_count_tie_prefers_earliest() {
        let current = vec![ind([0.0, 0.0]), ind([1.0, 2.0])];
        let offspring = vec![ind([2.0, 1.0])];

        let next = select(offspring, current, 2, &MIN2, SelectionMethod::DominanceCount).unwrap();
        // Both boundary members are dominated once; the offspring comes first
        assert_eq!(objectives(&next), vec![vec![0.0, 0.0], vec![1.0, 2.0]]);
    }

    #[test]
    fn test_dominance_count_uses_hypervolume_on_first_front() {
        let current = vec![ind([1.0, 5.0]), ind([2.0, 4.0]), ind([3.0, 3.0]), ind([5.0, 1.0])];
        let offspring = vec![ind([4.0, 2.0])];

        let by_count =
            select(offspring.clone(), current.clone(), 4, &MIN2, SelectionMethod::DominanceCount)
                .unwrap();
        let by_hv = select(offspring, current, 4, &MIN2, SelectionMethod::Hypervolume).unwrap();
        assert_eq!(objectives(&by_count), objectives(&by_hv));
    }

    #[test]
    fn test_maximized_objective() {
        let dirs = [Direction::Minimize, Direction::Maximize];
        let current = vec![ind([1.0, 10.0]), ind([2.0, 5.0])];
        let offspring = vec![ind([3.0, 1.0])];

        let next = select(offspring, current, 2, &dirs, SelectionMethod::Hypervolume).unwrap();
        assert_eq!(objectives(&next), vec![vec![1.0, 10.0], vec![2.0, 5.0]]);
    }

    #[test]
    fn test_empty_offspring_is_configuration_error() {
        let err = select(Vec::new(), vec![ind([1.0, 1.0])], 1, &MIN2, SelectionMethod::Hypervolume)
            .unwrap_err();
        assert!(matches!(err, EvolutionError::Configuration(_)));
    }

    #[test]
    fn test_wrong_objective_count_is_data_inconsistency() {
        let bad = Individual::with_objectives(RealVector::from([0.0]), vec![1.0, 2.0, 3.0]);
        let err = select(vec![bad], vec![ind([1.0, 1.0])], 1, &MIN2, SelectionMethod::Hypervolume)
            .unwrap_err();
        assert!(matches!(err, EvolutionError::DataInconsistency(_)));
    }

    #[test]
    fn test_unevaluated_is_data_inconsistency() {
        let raw = Individual::new(RealVector::from([0.0]));
        let err = select(vec![raw], vec![ind([1.0, 1.0])], 1, &MIN2, SelectionMethod::Hypervolume)
            .unwrap_err();
        assert!(matches!(err, EvolutionError::DataInconsistency(_)));
    }

    #[test]
    fn test_non_finite_objective_is_selection_error() {
        // NaN neither dominates nor is dominated, so it lands on the first front
        let current = vec![ind([1.0, 2.0]), ind([2.0, 1.0])];
        let offspring = vec![ind([f64::NAN, f64::NAN])];

        let err = select(offspring, current, 2, &MIN2, SelectionMethod::Hypervolume).unwrap_err();
        assert!(matches!(err, EvolutionError::Selection(_)));
    }

    #[test]
    fn test_selector_appends_to_archive() {
        let archive = Archive::new();
        let selector =
            EnvironmentalSelector::new(MIN2.to_vec(), SelectionMethod::Hypervolume)
                .with_archive(archive.clone());

        let next = selector
            .select(vec![ind([0.5, 0.5])], vec![ind([1.0, 1.0])], 1)
            .unwrap();
        assert_eq!(objectives(&next), vec![vec![0.5, 0.5]]);
        assert_eq!(archive.len(), 1);
        assert_eq!(archive.snapshot()[0].id(), next[0].id());
    }

    #[test]
    fn test_selection_method_serde() {
        let json = serde_json::to_string(&SelectionMethod::DominanceCount).unwrap();
        assert_eq!(json, "\"dominance_count\"");
        let method: SelectionMethod = serde_json::from_str("\"hypervolume\"").unwrap();
        assert_eq!(method, SelectionMethod::Hypervolume);
    }
}
