//! Tests for termination conditions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use super::*;

fn started_scope() -> SearchScope {
    let mut scope = SearchScope::new();
    scope.start_solving();
    scope
}

#[test]
fn test_step_count_termination() {
    let mut scope = started_scope();
    let term = StepCountTermination::new(3);

    assert!(!term.is_terminated(&scope));
    scope.increment_iteration_count();
    scope.increment_iteration_count();
    assert!(!term.is_terminated(&scope));
    scope.increment_iteration_count();
    assert_eq!(
        term.termination_reason(&scope),
        Some(TerminationReason::BudgetExhausted)
    );
}

#[test]
fn test_time_termination() {
    let scope = started_scope();
    let term = TimeTermination::millis(10);
    assert!(!term.is_terminated(&scope));

    thread::sleep(Duration::from_millis(20));
    assert_eq!(
        term.termination_reason(&scope),
        Some(TerminationReason::TimeLimit)
    );
}

#[test]
fn test_time_termination_before_start() {
    let scope = SearchScope::new();
    assert!(!TimeTermination::millis(0).is_terminated(&scope));
}

#[test]
fn test_external_termination() {
    let scope = started_scope();
    let flag = AtomicBool::new(false);
    let term = ExternalTermination::new(&flag);

    assert!(!term.is_terminated(&scope));
    flag.store(true, Ordering::SeqCst);
    assert_eq!(
        term.termination_reason(&scope),
        Some(TerminationReason::Cancelled)
    );
}

#[test]
fn test_or_termination_first_reason_wins() {
    let mut scope = started_scope();
    let flag = AtomicBool::new(false);
    let term = OrTermination::new((ExternalTermination::new(&flag), StepCountTermination::new(1)));

    assert!(!term.is_terminated(&scope));
    scope.increment_iteration_count();
    assert_eq!(
        term.termination_reason(&scope),
        Some(TerminationReason::BudgetExhausted)
    );

    flag.store(true, Ordering::SeqCst);
    assert_eq!(
        term.termination_reason(&scope),
        Some(TerminationReason::Cancelled)
    );
}

#[test]
fn test_absent_termination_never_fires() {
    let mut scope = started_scope();
    let term: Option<StepCountTermination> = None;
    scope.increment_iteration_count();
    assert!(!term.is_terminated(&scope));

    let term = Some(StepCountTermination::new(1));
    assert!(term.is_terminated(&scope));
}
