//! Genome abstractions and implementations
//!
//! This module provides the `EvolutionaryGenome` trait, the real-vector
//! genome and per-variable type metadata.

pub mod bounds;
pub mod real_vector;
pub mod traits;
pub mod variable;

pub mod prelude {
    pub use super::bounds::*;
    pub use super::real_vector::*;
    pub use super::traits::*;
    pub use super::variable::*;
}
