//! External termination via AtomicBool flag.

use std::sync::atomic::{AtomicBool, Ordering};

use super::{Termination, TerminationReason};
use crate::scope::SearchScope;

/// Terminates when an external flag is set.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use siteselect_solver::termination::ExternalTermination;
///
/// let flag = AtomicBool::new(false);
/// let term = ExternalTermination::new(&flag);
///
/// // Later, from another thread:
/// flag.store(true, Ordering::SeqCst);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ExternalTermination<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ExternalTermination<'a> {
    /// Creates a termination that checks the given flag.
    pub fn new(flag: &'a AtomicBool) -> Self {
        Self { flag }
    }
}

impl Termination for ExternalTermination<'_> {
    fn termination_reason(&self, _scope: &SearchScope) -> Option<TerminationReason> {
        self.flag
            .load(Ordering::SeqCst)
            .then_some(TerminationReason::Cancelled)
    }
}
