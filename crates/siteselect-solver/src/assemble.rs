//! Turning a solver answer into a [`SelectionResult`].

use siteselect_core::{
    BaselineComparison, Result, ResultStatus, ScoreTable, SelectedSite, SelectionError,
    SelectionMetrics, SelectionResult,
};

use crate::solver::{Solution, SolutionStatus};

/// Combines a [`Solution`] with the score table and the greedy baseline.
///
/// Assembly is pure: the same inputs always give the same result. A
/// selection above the bound is reported with
/// [`ResultStatus::ConstraintViolated`] and is never truncated.
#[derive(Debug, Clone, Copy)]
pub struct ResultAssembler {
    max_selected: usize,
}

impl ResultAssembler {
    pub fn new(max_selected: usize) -> Self {
        Self { max_selected }
    }

    pub fn assemble(
        &self,
        solution: &Solution,
        table: &ScoreTable,
        greedy: &SelectionResult,
    ) -> Result<SelectionResult> {
        if solution.assignment.len() != table.len() {
            return Err(SelectionError::InvalidSolution {
                expected: table.len(),
                actual: solution.assignment.len(),
            });
        }

        let status = match solution.status {
            SolutionStatus::SolverFailure => {
                return Err(SelectionError::SolverFailure {
                    primary: format!("{} reported failure", solution.solver),
                    fallback: "no fallback result".to_string(),
                })
            }
            _ if solution.selected_ids().len() > self.max_selected => {
                ResultStatus::ConstraintViolated
            }
            SolutionStatus::Optimal => ResultStatus::Optimal,
            SolutionStatus::Feasible | SolutionStatus::Infeasible => ResultStatus::Feasible,
        };

        let selected_ids = solution.selected_ids();
        let metrics = SelectionMetrics::from_selection(table, &selected_ids);
        let baseline = BaselineComparison::compare(metrics.net_benefit, greedy.metrics.net_benefit);
        let selected = selected_ids
            .iter()
            .filter_map(|&id| table.get(id))
            .map(SelectedSite::from)
            .collect();

        Ok(SelectionResult {
            status,
            selected_ids,
            objective_value: solution.objective_value,
            solver: solution.solver.to_string(),
            max_selected: self.max_selected,
            metrics,
            baseline: Some(baseline),
            selected,
        })
    }
}

#[cfg(test)]
mod tests {
    use siteselect_test::scenario_table;

    use super::*;
    use crate::greedy::BaselineGreedySelector;

    fn solution(assignment: Vec<bool>, status: SolutionStatus) -> Solution {
        Solution {
            assignment,
            objective_value: -80.0,
            status,
            solver: "exact",
            fallback_used: false,
        }
    }

    #[test]
    fn test_assemble_optimal() {
        let table = scenario_table();
        let greedy = BaselineGreedySelector::select(&table, 2).unwrap();
        let result = ResultAssembler::new(2)
            .assemble(&solution(vec![true, true, false], SolutionStatus::Optimal), &table, &greedy)
            .unwrap();

        assert_eq!(result.status, ResultStatus::Optimal);
        assert_eq!(result.selected_ids, vec![0, 1]);
        assert_eq!(result.metrics.net_benefit, 80);
        assert_eq!(result.metrics.area, 15.5);
        assert_eq!(result.solver, "exact");
        assert_eq!(result.max_selected, 2);

        let baseline = result.baseline.unwrap();
        assert_eq!(baseline.net_benefit, 80);
        assert_eq!(baseline.improvement_percent, 0.0);
        assert_eq!(result.selected.len(), 2);
    }

    #[test]
    fn test_over_bound_is_flagged_not_truncated() {
        let table = scenario_table();
        let greedy = BaselineGreedySelector::select(&table, 2).unwrap();
        let result = ResultAssembler::new(2)
            .assemble(&solution(vec![true, true, true], SolutionStatus::Optimal), &table, &greedy)
            .unwrap();

        assert_eq!(result.status, ResultStatus::ConstraintViolated);
        assert_eq!(result.selected_ids, vec![0, 1, 2]);
        assert!(!result.is_feasible());
    }

    #[test]
    fn test_heuristic_answer_is_feasible() {
        let table = scenario_table();
        let greedy = BaselineGreedySelector::select(&table, 2).unwrap();
        let result = ResultAssembler::new(2)
            .assemble(&solution(vec![true, false, false], SolutionStatus::Feasible), &table, &greedy)
            .unwrap();

        assert_eq!(result.status, ResultStatus::Feasible);
        let baseline = result.baseline.unwrap();
        assert_eq!(baseline.improvement_percent, -12.5);
    }

    #[test]
    fn test_empty_selection() {
        let table = scenario_table();
        let greedy = BaselineGreedySelector::select(&table, 2).unwrap();
        let result = ResultAssembler::new(2)
            .assemble(&solution(vec![false; 3], SolutionStatus::Feasible), &table, &greedy)
            .unwrap();

        assert!(result.selected_ids.is_empty());
        assert_eq!(result.metrics, SelectionMetrics::default());
    }

    #[test]
    fn test_degenerate_baseline() {
        let table = ScoreTable::new(vec![siteselect_core::Candidate::new(0, 0.5, 0.25, 0.25)]).unwrap();
        let greedy = BaselineGreedySelector::select(&table, 1).unwrap();
        let result = ResultAssembler::new(1)
            .assemble(&solution(vec![true], SolutionStatus::Optimal), &table, &greedy)
            .unwrap();

        let baseline = result.baseline.unwrap();
        assert!(baseline.degenerate);
        assert_eq!(baseline.improvement_percent, 0.0);
    }

    #[test]
    fn test_rejects_failure_and_wrong_length() {
        let table = scenario_table();
        let greedy = BaselineGreedySelector::select(&table, 2).unwrap();
        let assembler = ResultAssembler::new(2);

        assert!(matches!(
            assembler.assemble(&solution(vec![false; 3], SolutionStatus::SolverFailure), &table, &greedy),
            Err(SelectionError::SolverFailure { .. })
        ));
        assert!(matches!(
            assembler.assemble(&solution(vec![true], SolutionStatus::Optimal), &table, &greedy),
            Err(SelectionError::InvalidSolution { expected: 3, actual: 1 })
        ));
    }

    #[test]
    fn test_assembly_is_idempotent() {
        let table = scenario_table();
        let greedy = BaselineGreedySelector::select(&table, 2).unwrap();
        let assembler = ResultAssembler::new(2);
        let answer = solution(vec![true, false, true], SolutionStatus::Feasible);

        let first = assembler.assemble(&answer, &table, &greedy).unwrap();
        let second = assembler.assemble(&answer, &table, &greedy).unwrap();
        assert_eq!(first, second);
    }
}
