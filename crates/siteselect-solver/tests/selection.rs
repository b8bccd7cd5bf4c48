//! End-to-end selection runs through the pipeline.

use std::sync::atomic::AtomicBool;

use proptest::prelude::*;
use siteselect_config::{PenaltyConfig, SelectionConfig, SolverKind};
use siteselect_core::{ResultStatus, ScoreTable, SelectionError};
use siteselect_solver::{run_selection, run_selection_with_channel, BaselineGreedySelector};
use siteselect_test::{
    all_negative_table, mixed_table, random_table, scenario_table, single_negative_table,
};
use tokio::sync::mpsc;

fn config(max_selected: usize) -> SelectionConfig {
    SelectionConfig::new()
        .with_max_selected(max_selected)
        .with_random_seed(17)
}

#[test]
fn scenario_with_fixed_penalty_and_exact_solver() {
    let config = config(2)
        .with_penalty(PenaltyConfig::Fixed { value: 1000.0 })
        .with_solvers(SolverKind::Exact, SolverKind::Variational);
    let result = run_selection(&scenario_table(), &config).unwrap();

    assert_eq!(result.status, ResultStatus::Optimal);
    assert_eq!(result.selected_ids, vec![0, 1]);
    assert_eq!(result.objective_value, -80.0);
    assert_eq!(result.metrics.net_benefit, 80);
    assert_eq!(result.solver, "exact");

    let baseline = result.baseline.unwrap();
    assert_eq!(baseline.net_benefit, 80);
    assert_eq!(baseline.improvement_percent, 0.0);
    assert!(!baseline.degenerate);
}

#[test]
fn scenario_with_default_solver_chain() {
    let result = run_selection(&scenario_table(), &config(2)).unwrap();
    assert_eq!(result.status, ResultStatus::Feasible);
    assert_eq!(result.selected_ids, vec![0, 1]);
    assert_eq!(result.solver, "variational");
}

#[test]
fn single_negative_candidate_is_selected() {
    let table = single_negative_table();
    let result = run_selection(&table, &config(1)).unwrap();
    let greedy = BaselineGreedySelector::select(&table, 1).unwrap();

    assert_eq!(result.selected_ids, vec![0]);
    assert_eq!(greedy.selected_ids, vec![0]);
}

#[test]
fn non_binding_bound_keeps_beneficial_sites() {
    let table = scenario_table();
    let result = run_selection(&table, &config(10)).unwrap();

    assert_eq!(result.selected_ids, vec![0, 1]);
    assert_eq!(result.metrics.net_benefit, 80);
    assert_eq!(result.max_selected, 10);

    let exact = config(10)
        .with_penalty(PenaltyConfig::Fixed { value: 1000.0 })
        .with_solvers(SolverKind::Exact, SolverKind::Variational);
    let result = run_selection(&table, &exact).unwrap();
    assert_eq!(result.status, ResultStatus::Optimal);
    assert_eq!(result.selected_ids, vec![0, 1]);
    assert_eq!(result.metrics.net_benefit, 80);
    // Greedy fills to min(K, n) and takes the -20 site.
    assert_eq!(result.baseline.unwrap().improvement_percent, (80.0 - 60.0) / 60.0 * 100.0);
    assert_eq!(
        BaselineGreedySelector::select(&table, 10).unwrap().selected_ids,
        vec![0, 1, 2]
    );
}

#[test]
fn all_negative_matches_greedy_top_two() {
    let table = all_negative_table();
    let result = run_selection(&table, &config(2)).unwrap();
    let greedy = BaselineGreedySelector::select(&table, 2).unwrap();

    assert_eq!(result.selected_ids, vec![1, 2]);
    assert_eq!(result.selected_ids, greedy.selected_ids);
    assert_eq!(result.baseline.unwrap().improvement_percent, 0.0);
}

#[test]
fn weak_penalty_surfaces_constraint_violation() {
    let config = config(1)
        .with_penalty(PenaltyConfig::Fixed { value: 1.0 })
        .with_solvers(SolverKind::Exact, SolverKind::Exact);

    match run_selection(&mixed_table(), &config) {
        Err(SelectionError::ConstraintViolated(result)) => {
            assert_eq!(result.status, ResultStatus::ConstraintViolated);
            assert_eq!(result.selected_ids, vec![0, 2, 4]);
            assert_eq!(result.max_selected, 1);
        }
        other => panic!("expected a constraint violation, got {other:?}"),
    }
}

#[test]
fn exact_too_small_falls_back_to_heuristic() {
    let mut config = config(2).with_solvers(SolverKind::Exact, SolverKind::Variational);
    config.solver.exact.max_variables = 2;

    let result = run_selection(&scenario_table(), &config).unwrap();
    assert_eq!(result.solver, "variational");
    assert_eq!(result.selected_ids, vec![0, 1]);
}

#[test]
fn both_solvers_failing_is_reported() {
    let mut config = config(2).with_solvers(SolverKind::Exact, SolverKind::Exact);
    config.solver.exact.max_variables = 2;

    assert!(matches!(
        run_selection(&scenario_table(), &config),
        Err(SelectionError::SolverFailure { .. })
    ));
}

#[test]
fn input_errors_are_rejected_before_solving() {
    assert!(matches!(
        run_selection(&ScoreTable::default(), &config(2)),
        Err(SelectionError::EmptyCandidateSet)
    ));
    assert!(matches!(
        run_selection(&scenario_table(), &config(0)),
        Err(SelectionError::InvalidConstraint { max_selected: 0 })
    ));
    assert!(matches!(
        run_selection(
            &scenario_table(),
            &config(2).with_penalty(PenaltyConfig::Fixed { value: -3.0 })
        ),
        Err(SelectionError::InvalidPenalty(_))
    ));

    let mut bad = config(2);
    bad.solver.variational.cooling_rate = 1.5;
    assert!(matches!(
        run_selection(&scenario_table(), &bad),
        Err(SelectionError::Config(_))
    ));
}

#[test]
fn raised_flag_cancels_selection() {
    let flag = AtomicBool::new(true);
    let (sender, _receiver) = mpsc::unbounded_channel();

    assert!(matches!(
        run_selection_with_channel(&scenario_table(), &config(2), Some(&flag), sender),
        Err(SelectionError::Cancelled)
    ));
}

#[test]
fn samples_are_streamed() {
    let (sender, mut receiver) = mpsc::unbounded_channel();
    let result = run_selection_with_channel(&scenario_table(), &config(2), None, sender).unwrap();

    let mut last = None;
    while let Ok(sample) = receiver.try_recv() {
        last = Some(sample);
    }
    let (assignment, energy) = last.unwrap();
    assert_eq!(assignment, vec![true, true, false]);
    assert_eq!(energy, result.objective_value);
}

#[test]
fn result_exports_as_json() {
    let result = run_selection(&scenario_table(), &config(2)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&result.to_json_pretty().unwrap()).unwrap();

    assert_eq!(value["status"], "feasible");
    assert_eq!(value["solver"], "variational");
    assert_eq!(value["max_selected"], 2);
    assert_eq!(value["selected_ids"], serde_json::json!([0, 1]));
    assert_eq!(value["selected"][0]["area"], 12.0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn seeded_selection_is_reproducible(seed in any::<u64>(), n in 2usize..10, k in 1usize..6) {
        let table = random_table(n, seed);
        let config = config(k);
        let first = run_selection(&table, &config).unwrap();
        let second = run_selection(&table, &config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn heuristic_never_exceeds_bound(seed in any::<u64>(), n in 1usize..10, k in 1usize..10) {
        let table = random_table(n, seed);
        let result = run_selection(&table, &config(k)).unwrap();
        prop_assert!(result.selected_ids.len() <= k);
        if k <= n {
            prop_assert_eq!(result.selected_ids.len(), k);
        } else {
            for candidate in table.iter() {
                let selected = result.selected_ids.contains(&candidate.id);
                if candidate.net_benefit() > 0 {
                    prop_assert!(selected);
                } else if candidate.net_benefit() < 0 {
                    prop_assert!(!selected);
                }
            }
        }
    }
}
