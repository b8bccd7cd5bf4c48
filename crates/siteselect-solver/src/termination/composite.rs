//! Composite OR termination.
//!
//! Uses macro-generated tuple implementations, no boxing.

use super::{Termination, TerminationReason};
use crate::scope::SearchScope;

/// Combines terminations with OR logic.
///
/// Children are checked in tuple order and the first reason wins, so put
/// the external flag first when cancellation should take precedence.
///
/// # Examples
///
/// ```
/// use siteselect_solver::termination::{OrTermination, StepCountTermination, TimeTermination};
///
/// // Stop after 30 seconds OR 50 iterations
/// let termination = OrTermination::new((
///     TimeTermination::seconds(30),
///     StepCountTermination::new(50),
/// ));
/// ```
#[derive(Debug, Clone)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    /// Creates a new OR termination from a tuple of terminations.
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn termination_reason(&self, scope: &SearchScope) -> Option<TerminationReason> {
                None$(.or_else(|| (self.0).$idx.termination_reason(scope)))+
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
