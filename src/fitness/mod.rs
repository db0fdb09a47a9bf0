//! Problem definitions and benchmarks
//!
//! This module provides the multi-objective problem abstraction and
//! benchmark problems.

pub mod benchmarks;
pub mod traits;

pub mod prelude {
    pub use super::benchmarks::*;
    pub use super::traits::*;
}
