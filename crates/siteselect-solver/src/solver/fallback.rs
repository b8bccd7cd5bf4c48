//! Primary solver with a mandatory fallback.

use siteselect_core::{Result, SelectionError};
use tracing::warn;

use super::{QuboSolver, Solution};
use crate::error::SolverError;
use crate::penalty::PenalizedProblem;

/// Runs `primary`, and `fallback` when the primary fails.
///
/// A cancelled primary is not retried. When both fail the two messages are
/// reported together as [`SelectionError::SolverFailure`].
#[derive(Debug)]
pub struct FallbackSolver<P, F> {
    primary: P,
    fallback: F,
}

impl<P: QuboSolver, F: QuboSolver> FallbackSolver<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn fallback(&self) -> &F {
        &self.fallback
    }

    pub fn solve(&mut self, problem: &PenalizedProblem) -> Result<Solution> {
        let primary_error = match attempt(&mut self.primary, problem) {
            Ok(solution) => return Ok(solution),
            Err(SolverError::Cancelled) => return Err(SelectionError::Cancelled),
            Err(e) => e,
        };

        warn!(
            event = "solver_fallback",
            primary = self.primary.solver_name(),
            fallback = self.fallback.solver_name(),
            reason = %primary_error,
        );

        match attempt(&mut self.fallback, problem) {
            Ok(solution) => Ok(Solution {
                fallback_used: true,
                ..solution
            }),
            Err(SolverError::Cancelled) => Err(SelectionError::Cancelled),
            Err(fallback_error) => Err(SelectionError::SolverFailure {
                primary: primary_error.to_string(),
                fallback: fallback_error.to_string(),
            }),
        }
    }
}

/// Solves and checks the assignment length.
fn attempt<S: QuboSolver>(
    solver: &mut S,
    problem: &PenalizedProblem,
) -> std::result::Result<Solution, SolverError> {
    let solution = solver.solve(problem)?;
    let expected = problem.variable_count();
    if solution.assignment.len() != expected {
        return Err(SolverError::DimensionMismatch {
            expected,
            actual: solution.assignment.len(),
        });
    }
    Ok(solution)
}
