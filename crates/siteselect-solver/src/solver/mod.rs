//! QUBO solvers and the fallback chain.

mod anneal;
mod exact;
mod fallback;
mod variational;

use std::fmt::Debug;

use serde::Serialize;

use crate::error::SolverError;
use crate::penalty::PenalizedProblem;

pub use anneal::MetropolisAcceptor;
pub use exact::ExactEigensolver;
pub use fallback::FallbackSolver;
pub use variational::HeuristicVariationalSolver;

/// Classification of a solver's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolutionStatus {
    /// Certified global minimizer, within the cardinality bound.
    Optimal,
    /// Within the cardinality bound, not certified.
    Feasible,
    /// Above the cardinality bound.
    Infeasible,
    /// No usable assignment was produced.
    SolverFailure,
}

/// A solver's answer to a [`PenalizedProblem`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    /// One entry per variable, index-aligned with candidate ids.
    pub assignment: Vec<bool>,
    /// Penalized energy of the assignment.
    pub objective_value: f64,
    pub status: SolutionStatus,
    /// Name of the solver that produced the assignment.
    pub solver: &'static str,
    /// Set when the primary solver failed and the fallback answered.
    pub fallback_used: bool,
}

impl Solution {
    /// Selected candidate ids, ascending.
    pub fn selected_ids(&self) -> Vec<usize> {
        self.assignment
            .iter()
            .enumerate()
            .filter_map(|(id, &x)| x.then_some(id))
            .collect()
    }
}

/// Finds an assignment minimizing a penalized problem.
pub trait QuboSolver: Send + Debug {
    fn solve(&mut self, problem: &PenalizedProblem) -> Result<Solution, SolverError>;

    /// Name reported in solutions and logs.
    fn solver_name(&self) -> &'static str;
}

impl<S: QuboSolver + ?Sized> QuboSolver for Box<S> {
    fn solve(&mut self, problem: &PenalizedProblem) -> Result<Solution, SolverError> {
        (**self).solve(problem)
    }

    fn solver_name(&self) -> &'static str {
        (**self).solver_name()
    }
}

/// Status of a non-certified assignment.
pub(crate) fn classify(problem: &PenalizedProblem, assignment: &[bool]) -> SolutionStatus {
    if problem.is_feasible(assignment) {
        SolutionStatus::Feasible
    } else {
        SolutionStatus::Infeasible
    }
}
