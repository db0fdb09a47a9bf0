//! # sms-emoa
//!
//! A steady-state multi-objective evolutionary algorithm for Rust.
//!
//! Each iteration breeds a single offspring and removes a single individual
//! from the merged pool: whole non-dominated fronts are kept while they fit,
//! and the first front that does not fit is thinned by dominance count or by
//! exact hypervolume contribution.
//!
//! ## Core Concepts
//!
//! - **Environmental selection**: [`algorithms::environmental::select`] is a pure function
//!   over owned individuals; [`algorithms::environmental::EnvironmentalSelector`] adds archive
//!   mirroring
//! - **Hypervolume oracle**: exact hypervolume and least contributor in [`pareto::hypervolume`]
//! - **Pluggable variation**: any [`operators::traits::Variator`], with SBX plus polynomial
//!   mutation derived from the problem when none is given
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sms_emoa::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!
//! let mut algo = SmsEmoa::builder()
//!     .problem(Zdt1::new(30))
//!     .population_size(100)
//!     .selection_method(SelectionMethod::Hypervolume)
//!     .build()?;
//!
//! let result = algo.run(&MaxEvaluations::new(10_000), &mut rng)?;
//! println!("{} survivors", result.population.len());
//! # Ok::<(), sms_emoa::error::EvolutionError>(())
//! ```

pub mod algorithms;
pub mod error;
pub mod fitness;
pub mod genome;
pub mod operators;
pub mod pareto;
pub mod population;
pub mod termination;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::prelude::*;
    pub use crate::error::*;
    pub use crate::fitness::prelude::*;
    pub use crate::genome::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::pareto::prelude::*;
    pub use crate::population::prelude::*;
    pub use crate::termination::prelude::*;
}
