//! Solver-level errors.

use std::time::Duration;

use thiserror::Error;

/// Failure of a single solver attempt.
///
/// These never reach callers directly: the fallback chain either recovers
/// from them or folds both messages into
/// [`SelectionError::SolverFailure`](siteselect_core::SelectionError::SolverFailure).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    /// The heuristic produced no usable energy.
    #[error("Solver did not converge after {iterations} iterations")]
    NonConvergence { iterations: u64 },

    /// The configured time limit expired.
    #[error("Solver timed out after {elapsed:?}")]
    Timeout { elapsed: Duration },

    /// The problem exceeds what the solver is willing to enumerate.
    #[error("Problem too large: {variables} variables, limit is {limit}")]
    ProblemTooLarge { variables: usize, limit: usize },

    /// An external flag requested termination.
    #[error("Solver was cancelled")]
    Cancelled,

    /// The returned assignment length disagrees with the problem.
    #[error("Dimension mismatch: expected {expected} variables, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}
