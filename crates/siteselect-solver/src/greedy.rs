//! Greedy reference selection.

use siteselect_core::{
    Candidate, Result, ResultStatus, ScoreTable, SelectedSite, SelectionError, SelectionMetrics,
    SelectionResult,
};

/// Picks the `K` highest net benefits, ties broken by lower id.
///
/// The pick always fills to `min(K, n)`, negative benefits included. It is
/// an independent reference and never seeds the solver.
///
/// # Examples
///
/// ```
/// use siteselect_core::{Candidate, ScoreTable};
/// use siteselect_solver::BaselineGreedySelector;
///
/// let table = ScoreTable::new(vec![
///     Candidate::new(0, 0.9, 0.1, 0.1),
///     Candidate::new(1, 0.2, 0.05, 0.05),
///     Candidate::new(2, 0.5, 0.4, 0.3),
/// ]).unwrap();
///
/// let greedy = BaselineGreedySelector::select(&table, 2).unwrap();
/// assert_eq!(greedy.selected_ids, vec![0, 1]);
/// assert_eq!(greedy.metrics.net_benefit, 80);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineGreedySelector;

impl BaselineGreedySelector {
    /// Solver name reported on greedy results.
    pub const NAME: &'static str = "greedy";

    pub fn select(table: &ScoreTable, max_selected: usize) -> Result<SelectionResult> {
        if table.is_empty() {
            return Err(SelectionError::EmptyCandidateSet);
        }
        if max_selected == 0 {
            return Err(SelectionError::InvalidConstraint { max_selected });
        }

        let mut ranked: Vec<&Candidate> = table.iter().collect();
        ranked.sort_by(|a, b| b.net_benefit().cmp(&a.net_benefit()).then(a.id.cmp(&b.id)));

        let mut selected_ids: Vec<usize> =
            ranked.iter().take(max_selected).map(|c| c.id).collect();
        selected_ids.sort_unstable();

        let metrics = SelectionMetrics::from_selection(table, &selected_ids);
        let selected = selected_ids
            .iter()
            .filter_map(|&id| table.get(id))
            .map(SelectedSite::from)
            .collect();

        Ok(SelectionResult {
            status: ResultStatus::Feasible,
            objective_value: -(metrics.net_benefit as f64),
            selected_ids,
            solver: Self::NAME.to_string(),
            max_selected,
            metrics,
            baseline: None,
            selected,
        })
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use siteselect_test::{
        all_negative_table, mixed_table, random_table, scenario_table, single_negative_table,
    };

    use super::*;

    #[test]
    fn test_scenario() {
        let result = BaselineGreedySelector::select(&scenario_table(), 2).unwrap();
        assert_eq!(result.selected_ids, vec![0, 1]);
        assert_eq!(result.metrics.net_benefit, 80);
        assert_eq!(result.objective_value, -80.0);
        assert_eq!(result.status, ResultStatus::Feasible);
        assert_eq!(result.solver, "greedy");
        assert!(result.baseline.is_none());
    }

    #[test]
    fn test_fills_with_negative_benefits() {
        let result = BaselineGreedySelector::select(&all_negative_table(), 2).unwrap();
        assert_eq!(result.selected_ids, vec![1, 2]);
        assert_eq!(result.metrics.net_benefit, -15);

        let result = BaselineGreedySelector::select(&single_negative_table(), 1).unwrap();
        assert_eq!(result.selected_ids, vec![0]);
    }

    #[test]
    fn test_bound_above_size_takes_all() {
        let result = BaselineGreedySelector::select(&scenario_table(), 10).unwrap();
        assert_eq!(result.selected_ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_ties_prefer_lower_id() {
        // Zero-benefit site 3 outranks site 1 (-20) but not site 4 (15).
        let result = BaselineGreedySelector::select(&mixed_table(), 4).unwrap();
        assert_eq!(result.selected_ids, vec![0, 2, 3, 4]);

        let tied = ScoreTable::new(vec![
            Candidate::new(0, 0.5, 0.1, 0.1),
            Candidate::new(1, 0.5, 0.1, 0.1),
            Candidate::new(2, 0.5, 0.1, 0.1),
        ])
        .unwrap();
        let result = BaselineGreedySelector::select(&tied, 2).unwrap();
        assert_eq!(result.selected_ids, vec![0, 1]);
    }

    #[test]
    fn test_rejects_degenerate_input() {
        assert!(matches!(
            BaselineGreedySelector::select(&ScoreTable::default(), 2),
            Err(SelectionError::EmptyCandidateSet)
        ));
        assert!(matches!(
            BaselineGreedySelector::select(&scenario_table(), 0),
            Err(SelectionError::InvalidConstraint { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_returns_k_distinct_ids(seed in any::<u64>(), n in 1usize..40, k_frac in 0.0f64..1.0) {
            let k = 1 + ((n - 1) as f64 * k_frac) as usize;
            let table = random_table(n, seed);
            let result = BaselineGreedySelector::select(&table, k).unwrap();

            prop_assert_eq!(result.selected_ids.len(), k);
            prop_assert!(result.selected_ids.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(result.selected_ids.iter().all(|&id| id < n));
        }
    }
}
