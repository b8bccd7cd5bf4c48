//! Iteration budget termination.

use super::{Termination, TerminationReason};
use crate::scope::SearchScope;

/// Terminates after a number of outer iterations.
///
/// # Example
///
/// ```
/// use siteselect_solver::termination::StepCountTermination;
///
/// // Stop after 50 optimizer iterations
/// let term = StepCountTermination::new(50);
/// ```
#[derive(Debug, Clone)]
pub struct StepCountTermination {
    limit: u64,
}

impl StepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for StepCountTermination {
    fn termination_reason(&self, scope: &SearchScope) -> Option<TerminationReason> {
        (scope.iteration_count() >= self.limit).then_some(TerminationReason::BudgetExhausted)
    }
}
