//! Selection result contract handed to presentation and export.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::candidate::Candidate;
use crate::error::Result;
use crate::table::ScoreTable;

/// Outcome classification of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    /// Selection is certified globally optimal.
    Optimal,
    /// Selection respects the cardinality bound but is not certified.
    Feasible,
    /// Selection exceeds the cardinality bound.
    ConstraintViolated,
}

impl std::fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultStatus::Optimal => write!(f, "Optimal"),
            ResultStatus::Feasible => write!(f, "Feasible"),
            ResultStatus::ConstraintViolated => write!(f, "ConstraintViolated"),
        }
    }
}

/// Sums over the selected candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionMetrics {
    pub probability: f64,
    pub cost: f64,
    pub risk: f64,
    pub area: f64,
    pub net_benefit: i64,
}

impl SelectionMetrics {
    /// Sums the selected rows in ascending id order.
    ///
    /// Ids outside the table are ignored.
    pub fn from_selection(table: &ScoreTable, ids: &[usize]) -> Self {
        ids.iter()
            .filter_map(|&id| table.get(id))
            .fold(Self::default(), |acc, c| Self {
                probability: acc.probability + c.probability,
                cost: acc.cost + c.cost,
                risk: acc.risk + c.risk,
                area: acc.area + c.area,
                net_benefit: acc.net_benefit + c.net_benefit(),
            })
    }
}

/// Comparison of a selection against the greedy baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineComparison {
    /// Net benefit of the greedy baseline.
    pub net_benefit: i64,
    /// `(selected - baseline) / |baseline| * 100`, or 0 when degenerate.
    pub improvement_percent: f64,
    /// Set when the baseline net benefit is zero.
    pub degenerate: bool,
}

impl BaselineComparison {
    /// Compares a selection's net benefit against the baseline's.
    ///
    /// # Examples
    ///
    /// ```
    /// use siteselect_core::BaselineComparison;
    ///
    /// let cmp = BaselineComparison::compare(90, 60);
    /// assert_eq!(cmp.improvement_percent, 50.0);
    ///
    /// let degenerate = BaselineComparison::compare(10, 0);
    /// assert!(degenerate.degenerate);
    /// assert_eq!(degenerate.improvement_percent, 0.0);
    /// ```
    pub fn compare(selected_net_benefit: i64, baseline_net_benefit: i64) -> Self {
        if baseline_net_benefit == 0 {
            return Self {
                net_benefit: 0,
                improvement_percent: 0.0,
                degenerate: true,
            };
        }
        let delta = (selected_net_benefit - baseline_net_benefit) as f64;
        Self {
            net_benefit: baseline_net_benefit,
            improvement_percent: delta / (baseline_net_benefit as f64).abs() * 100.0,
            degenerate: false,
        }
    }
}

/// Detail row for one selected candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectedSite {
    pub id: usize,
    pub probability: f64,
    pub cost: f64,
    pub risk: f64,
    pub area: f64,
    pub net_benefit: i64,
}

impl From<&Candidate> for SelectedSite {
    fn from(c: &Candidate) -> Self {
        Self {
            id: c.id,
            probability: c.probability,
            cost: c.cost,
            risk: c.risk,
            area: c.area,
            net_benefit: c.net_benefit(),
        }
    }
}

/// The externally visible artifact of a selection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub status: ResultStatus,
    /// Selected candidate ids, ascending.
    pub selected_ids: Vec<usize>,
    /// Objective value reached by the producing algorithm.
    pub objective_value: f64,
    /// Name of the algorithm that produced the selection.
    pub solver: String,
    pub max_selected: usize,
    pub metrics: SelectionMetrics,
    /// Absent on the baseline itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<BaselineComparison>,
    #[serde(default)]
    pub selected: Vec<SelectedSite>,
}

impl SelectionResult {
    /// Returns true unless the cardinality bound was exceeded.
    pub fn is_feasible(&self) -> bool {
        self.status != ResultStatus::ConstraintViolated
    }

    pub fn selected_count(&self) -> usize {
        self.selected_ids.len()
    }

    /// Renders the result as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the result as pretty-printed JSON to a file.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
