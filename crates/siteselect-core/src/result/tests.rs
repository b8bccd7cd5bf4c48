//! Tests for the selection result contract.

use super::*;

fn sample_table() -> ScoreTable {
    ScoreTable::new(vec![
        Candidate::new(0, 0.9, 0.1, 0.1).with_area(10.0),
        Candidate::new(1, 0.2, 0.05, 0.05).with_area(4.0),
        Candidate::new(2, 0.5, 0.4, 0.3).with_area(7.5),
    ])
    .unwrap()
}

fn sample_result() -> SelectionResult {
    let table = sample_table();
    let ids = vec![0, 1];
    SelectionResult {
        status: ResultStatus::Optimal,
        metrics: SelectionMetrics::from_selection(&table, &ids),
        selected: ids.iter().filter_map(|&id| table.get(id)).map(SelectedSite::from).collect(),
        selected_ids: ids,
        objective_value: -80.0,
        solver: "exact".to_string(),
        max_selected: 2,
        baseline: Some(BaselineComparison::compare(80, 80)),
    }
}

#[test]
fn test_metrics_sum_selected_rows() {
    let metrics = SelectionMetrics::from_selection(&sample_table(), &[0, 2]);

    assert!((metrics.probability - 1.4).abs() < 1e-12);
    assert!((metrics.cost - 0.5).abs() < 1e-12);
    assert!((metrics.risk - 0.4).abs() < 1e-12);
    assert_eq!(metrics.area, 17.5);
    assert_eq!(metrics.net_benefit, 50);
}

#[test]
fn test_metrics_of_empty_selection() {
    let metrics = SelectionMetrics::from_selection(&sample_table(), &[]);
    assert_eq!(metrics, SelectionMetrics::default());
}

#[test]
fn test_comparison_against_negative_baseline() {
    let cmp = BaselineComparison::compare(-10, -40);
    assert_eq!(cmp.net_benefit, -40);
    assert_eq!(cmp.improvement_percent, 75.0);
    assert!(!cmp.degenerate);
}

#[test]
fn test_comparison_equal_benefit() {
    let cmp = BaselineComparison::compare(80, 80);
    assert_eq!(cmp.improvement_percent, 0.0);
    assert!(!cmp.degenerate);
}

#[test]
fn test_json_shape() {
    let json = sample_result().to_json_pretty().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["status"], "optimal");
    assert_eq!(value["selected_ids"], serde_json::json!([0, 1]));
    assert_eq!(value["objective_value"], -80.0);
    assert_eq!(value["metrics"]["net_benefit"], 80);
    assert_eq!(value["baseline"]["degenerate"], false);
    assert_eq!(value["selected"][1]["id"], 1);
}

#[test]
fn test_baseline_omitted_when_absent() {
    let mut result = sample_result();
    result.baseline = None;
    let json = result.to_json_pretty().unwrap();
    assert!(!json.contains("baseline"));
}

#[test]
fn test_write_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("selection.json");
    let result = sample_result();

    result.write_json(&path).unwrap();

    let restored: SelectionResult =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(restored.status, result.status);
    assert_eq!(restored.selected_ids, result.selected_ids);
    assert_eq!(restored.metrics.net_benefit, 80);
    assert_eq!(restored.selected.len(), 2);
}

#[test]
fn test_feasibility_flag() {
    let mut result = sample_result();
    assert!(result.is_feasible());
    result.status = ResultStatus::ConstraintViolated;
    assert!(!result.is_feasible());
}
