//! Termination conditions for the heuristic search loop.

mod composite;
mod external;
mod step_count;
mod time;

use std::fmt::Debug;

use crate::scope::SearchScope;

pub use composite::OrTermination;
pub use external::ExternalTermination;
pub use step_count::StepCountTermination;
pub use time::TimeTermination;

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// The iteration budget ran out; the search completed normally.
    BudgetExhausted,
    /// The wall-clock limit expired.
    TimeLimit,
    /// An external flag was raised.
    Cancelled,
}

/// Trait for determining when to stop searching.
pub trait Termination: Send + Debug {
    /// Returns the reason to stop, or `None` to keep going.
    fn termination_reason(&self, scope: &SearchScope) -> Option<TerminationReason>;

    /// Returns true if the search should stop.
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        self.termination_reason(scope).is_some()
    }
}

/// Never terminates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTermination;

impl Termination for NoTermination {
    fn termination_reason(&self, _scope: &SearchScope) -> Option<TerminationReason> {
        None
    }
}

/// An absent termination never fires.
impl<T: Termination> Termination for Option<T> {
    fn termination_reason(&self, scope: &SearchScope) -> Option<TerminationReason> {
        self.as_ref().and_then(|t| t.termination_reason(scope))
    }
}

#[cfg(test)]
mod tests;
