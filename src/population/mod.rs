//! Population management
//!
//! This module provides the Individual type and the append-only Archive.

pub mod archive;
pub mod individual;

pub mod prelude {
    pub use super::archive::*;
    pub use super::individual::*;
}
