//! Append-only archive of accepted individuals
//!
//! The archive mirrors every population accepted by selection. It only ever
//! grows: entries are never truncated, deduplicated or reordered. Handles are
//! cheap to clone and share one log, so selections running on several
//! threads append in a single serialized order.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::genome::real_vector::RealVector;
use crate::genome::traits::EvolutionaryGenome;
use crate::population::individual::Individual;

/// Shared, append-only log of individuals
#[derive(Debug)]
pub struct Archive<G = RealVector>
where
    G: EvolutionaryGenome,
{
    entries: Arc<Mutex<Vec<Individual<G>>>>,
}

impl<G> Archive<G>
where
    G: EvolutionaryGenome,
{
    /// Create an empty archive
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Append a batch of individuals in order
    ///
    /// The whole batch is appended under one lock, so batches from
    /// concurrent callers never interleave.
    pub fn extend(&self, individuals: &[Individual<G>]) {
        self.entries.lock().extend_from_slice(individuals);
    }

    /// Number of archived entries
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the archive is empty
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Copy of the current contents in insertion order
    pub fn snapshot(&self) -> Vec<Individual<G>> {
        self.entries.lock().clone()
    }
}

impl<G> Clone for Archive<G>
where
    G: EvolutionaryGenome,
{
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<G> Default for Archive<G>
where
    G: EvolutionaryGenome,
{
    fn default() -> Self {
        Self::new()
    }
}
