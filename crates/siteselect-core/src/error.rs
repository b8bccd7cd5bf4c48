//! Error types for SiteSelect

use thiserror::Error;

use crate::result::SelectionResult;

/// Main error type for site selection operations
#[derive(Debug, Error)]
pub enum SelectionError {
    /// No candidates were supplied
    #[error("Candidate set is empty")]
    EmptyCandidateSet,

    /// The cardinality bound is not positive
    #[error("Invalid constraint: max_selected must be at least 1, got {max_selected}")]
    InvalidConstraint { max_selected: usize },

    /// A candidate record breaks the table invariants
    #[error("Invalid candidate {id}: {reason}")]
    InvalidCandidate { id: usize, reason: String },

    /// Penalty coefficient is not a finite positive number
    #[error("Invalid penalty coefficient: {0}")]
    InvalidPenalty(f64),

    /// Both the primary and the fallback solver failed
    #[error("Solver failure: primary failed ({primary}); fallback failed ({fallback})")]
    SolverFailure { primary: String, fallback: String },

    /// The solver returned an assignment above the cardinality bound
    #[error(
        "Constraint violated: {} sites selected, at most {} allowed",
        .0.selected_ids.len(),
        .0.max_selected
    )]
    ConstraintViolated(Box<SelectionResult>),

    /// Solution does not line up with the score table
    #[error("Invalid solution: expected {expected} variables, got {actual}")]
    InvalidSolution { expected: usize, actual: usize },

    /// Selection was cancelled before completion
    #[error("Selection was cancelled")]
    Cancelled,

    /// Error in selection configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error while reading candidates or writing results
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for selection operations
pub type Result<T> = std::result::Result<T, SelectionError>;
