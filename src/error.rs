//! Error types for sms-emoa
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for genome operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenomeError {
    /// Invalid genome structure
    #[error("Invalid genome structure: {0}")]
    InvalidStructure(String),

    /// Constraint violation in genome
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Error type for variation operator failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OperatorError {
    /// Crossover operation failed
    #[error("Crossover failed: {0}")]
    CrossoverFailed(String),

    /// Mutation operation failed
    #[error("Mutation failed: {0}")]
    MutationFailed(String),

    /// Operator received the wrong number of parents
    #[error("Arity mismatch: expected {expected} parents, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    /// Invalid operator configuration
    #[error("Invalid operator configuration: {0}")]
    InvalidConfiguration(String),
}

/// Error type for quality indicator computations (hypervolume oracle)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IndicatorError {
    /// No points were supplied
    #[error("Cannot compute hypervolume of an empty point set")]
    EmptySet,

    /// A point or the reference has the wrong number of objectives
    #[error("Objective dimension mismatch at point {index}: expected {expected}, got {actual}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// A coordinate is NaN or infinite
    #[error("Non-finite objective value at point {index}, objective {objective}")]
    NonFinite { index: usize, objective: usize },

    /// The reference point itself is malformed
    #[error("Invalid reference point: {0}")]
    InvalidReference(String),

    /// The reference point is not strictly dominated by a point
    #[error("Point {index} does not strictly dominate the reference point in objective {objective}")]
    ReferenceNotDominated { index: usize, objective: usize },
}

/// Top-level error type for evolution operations
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// Genome error
    #[error("Genome error: {0}")]
    Genome(#[from] GenomeError),

    /// Operator error
    #[error("Operator error: {0}")]
    Operator(#[from] OperatorError),

    /// Target population size or other settings incompatible with the inputs
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Objective vectors or direction vector of inconsistent length
    #[error("Data inconsistency: {0}")]
    DataInconsistency(String),

    /// The hypervolume tie-break could not determine a least contributor
    #[error("Selection failed: {0}")]
    Selection(#[from] IndicatorError),
}

/// Result type alias for evolution operations
pub type EvoResult<T> = Result<T, EvolutionError>;
