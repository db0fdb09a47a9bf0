//! Evolutionary algorithms
//!
//! This module provides the steady-state environmental selection and the
//! SMS-EMOA driver built on it.

pub mod environmental;
pub mod sms_emoa;

pub mod prelude {
    pub use super::environmental::*;
    pub use super::sms_emoa::*;
}
