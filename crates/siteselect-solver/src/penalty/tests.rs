//! Tests for the constraint penalizer.

use proptest::prelude::*;
use siteselect_test::{random_table, scenario_table, single_negative_table};

use super::*;
use crate::objective::ObjectiveBuilder;

#[test]
fn test_fixed_penalty_expansion() {
    let problem = ObjectiveBuilder::build(&scenario_table(), 2).unwrap();
    let penalized = ConstraintPenalizer::penalize(&problem, PenaltyStrategy::Fixed(1000.0)).unwrap();
    let qubo = penalized.qubo();

    // c_i + p(1 - 2K) with K = 2
    assert_eq!(qubo.linear(), &[-3070.0, -3010.0, -2980.0]);
    assert_eq!(qubo.coupling(), 2000.0);
    assert_eq!(qubo.offset(), 4000.0);
}

#[test]
fn test_size_k_assignments_keep_linear_objective() {
    let problem = ObjectiveBuilder::build(&scenario_table(), 2).unwrap();
    let penalized = ConstraintPenalizer::penalize(&problem, PenaltyStrategy::Fixed(1000.0)).unwrap();

    assert_eq!(penalized.evaluate(&[true, true, false]).value(), -80.0);
    assert_eq!(penalized.evaluate(&[true, false, true]).value(), -50.0);
    assert_eq!(penalized.evaluate(&[true, true, true]).value(), 940.0);
    assert!(!penalized.is_feasible(&[true, true, true]));
    assert!(penalized.is_feasible(&[false, false, false]));
}

#[test]
fn test_bound_above_candidate_count_keeps_linear_objective() {
    let problem = ObjectiveBuilder::build(&scenario_table(), 10).unwrap();
    for strategy in [PenaltyStrategy::Adaptive, PenaltyStrategy::Fixed(1000.0)] {
        let penalized = ConstraintPenalizer::penalize(&problem, strategy).unwrap();
        let qubo = penalized.qubo();

        assert!(!penalized.is_binding());
        assert_eq!(qubo.linear(), &[-70.0, -10.0, 20.0]);
        assert_eq!(qubo.coupling(), 0.0);
        assert_eq!(qubo.offset(), 0.0);
        assert_eq!(penalized.evaluate(&[true, true, false]).value(), -80.0);
        assert_eq!(penalized.evaluate(&[true, true, true]).value(), -60.0);
    }
}

#[test]
fn test_bound_equal_to_candidate_count_fills() {
    let problem = ObjectiveBuilder::build(&single_negative_table(), 1).unwrap();
    let penalized = ConstraintPenalizer::penalize(&problem, PenaltyStrategy::Adaptive).unwrap();

    assert!(penalized.is_binding());
    assert!(penalized.evaluate(&[true]) < penalized.evaluate(&[false]));
}

#[test]
fn test_adaptive_penalty() {
    let problem = ObjectiveBuilder::build(&scenario_table(), 2).unwrap();
    let penalized = ConstraintPenalizer::penalize(&problem, PenaltyStrategy::Adaptive).unwrap();
    assert_eq!(penalized.penalty(), 101.0);
}

#[test]
fn test_invalid_fixed_penalty() {
    let problem = ObjectiveBuilder::build(&scenario_table(), 2).unwrap();
    for p in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = ConstraintPenalizer::penalize(&problem, PenaltyStrategy::Fixed(p)).unwrap_err();
        assert!(matches!(err, SelectionError::InvalidPenalty(_)));
    }
}

#[test]
fn test_weak_penalty_is_accepted() {
    let problem = ObjectiveBuilder::build(&scenario_table(), 2).unwrap();
    let penalized = ConstraintPenalizer::penalize(&problem, PenaltyStrategy::Fixed(1.0)).unwrap();
    assert_eq!(penalized.penalty(), 1.0);
}

#[test]
fn test_from_config() {
    assert_eq!(
        PenaltyStrategy::from(&PenaltyConfig::Fixed { value: 1000.0 }),
        PenaltyStrategy::Fixed(1000.0)
    );
    assert_eq!(
        PenaltyStrategy::from(&PenaltyConfig::Adaptive),
        PenaltyStrategy::Adaptive
    );
}

fn assignments(n: usize) -> impl Iterator<Item = Vec<bool>> {
    (0u32..(1 << n)).map(move |mask| (0..n).map(|i| mask & (1 << i) != 0).collect())
}

proptest! {
    #[test]
    fn prop_build_and_penalize_is_deterministic(seed in any::<u64>(), n in 1usize..12, k in 1usize..12) {
        let table = random_table(n, seed);
        let first = ConstraintPenalizer::penalize(
            &ObjectiveBuilder::build(&table, k).unwrap(),
            PenaltyStrategy::Adaptive,
        ).unwrap();
        let second = ConstraintPenalizer::penalize(
            &ObjectiveBuilder::build(&table, k).unwrap(),
            PenaltyStrategy::Adaptive,
        ).unwrap();

        let bits = |p: &PenalizedProblem| -> Vec<u64> {
            p.qubo().linear().iter().map(|v| v.to_bits()).collect()
        };
        prop_assert_eq!(bits(&first), bits(&second));
        prop_assert_eq!(first.qubo().offset().to_bits(), second.qubo().offset().to_bits());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_penalty_dominates_infeasible(seed in any::<u64>(), n in 1usize..9, k in 1usize..9) {
        let table = random_table(n, seed);
        let problem = ObjectiveBuilder::build(&table, k).unwrap();
        let penalized = ConstraintPenalizer::penalize(&problem, PenaltyStrategy::Adaptive).unwrap();

        let best_feasible = assignments(n)
            .filter(|a| penalized.is_feasible(a))
            .map(|a| penalized.evaluate(&a))
            .min()
            .unwrap();

        for a in assignments(n).filter(|a| !penalized.is_feasible(a)) {
            prop_assert!(penalized.evaluate(&a) > best_feasible);
        }
    }
}
