//! Linear selection objective with a cardinality bound.

use siteselect_core::{Result, ScoreTable, SelectionError};
use tracing::debug;

/// The constraint `Σ x_i ≤ max_selected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardinalityConstraint {
    pub max_selected: usize,
}

impl CardinalityConstraint {
    /// Returns true if the number of set bits respects the bound.
    pub fn is_satisfied(&self, assignment: &[bool]) -> bool {
        selected_count(assignment) <= self.max_selected
    }
}

/// Minimization problem over one binary variable per candidate.
///
/// Coefficient `c_i = -net_benefit_i`, so selecting a beneficial site lowers
/// the objective.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationProblem {
    coefficients: Vec<f64>,
    constraint: CardinalityConstraint,
}

impl OptimizationProblem {
    pub fn variable_count(&self) -> usize {
        self.coefficients.len()
    }

    /// Linear coefficients, index-aligned with candidate ids.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn constraint(&self) -> CardinalityConstraint {
        self.constraint
    }

    /// Evaluates the unpenalized linear objective.
    pub fn objective(&self, assignment: &[bool]) -> f64 {
        self.coefficients
            .iter()
            .zip(assignment)
            .filter(|(_, &x)| x)
            .map(|(c, _)| c)
            .sum()
    }

    /// Sum of coefficient magnitudes.
    pub fn magnitude(&self) -> f64 {
        self.coefficients.iter().map(|c| c.abs()).sum()
    }
}

/// Turns a score table into an [`OptimizationProblem`].
///
/// # Examples
///
/// ```
/// use siteselect_core::{Candidate, ScoreTable};
/// use siteselect_solver::ObjectiveBuilder;
///
/// let table = ScoreTable::new(vec![
///     Candidate::new(0, 0.9, 0.1, 0.1),
///     Candidate::new(1, 0.5, 0.4, 0.3),
/// ]).unwrap();
///
/// let problem = ObjectiveBuilder::build(&table, 1).unwrap();
/// assert_eq!(problem.coefficients(), &[-70.0, 20.0]);
/// assert_eq!(problem.constraint().max_selected, 1);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectiveBuilder;

impl ObjectiveBuilder {
    pub fn build(table: &ScoreTable, max_selected: usize) -> Result<OptimizationProblem> {
        if table.is_empty() {
            return Err(SelectionError::EmptyCandidateSet);
        }
        if max_selected == 0 {
            return Err(SelectionError::InvalidConstraint { max_selected });
        }

        let coefficients: Vec<f64> = table
            .iter()
            .map(|c| -(c.net_benefit() as f64))
            .collect();

        debug!(
            variables = coefficients.len(),
            max_selected,
            binding = max_selected < coefficients.len(),
            "Objective built"
        );

        Ok(OptimizationProblem {
            coefficients,
            constraint: CardinalityConstraint { max_selected },
        })
    }
}

/// Number of `true` entries.
pub(crate) fn selected_count(assignment: &[bool]) -> usize {
    assignment.iter().filter(|&&x| x).count()
}
