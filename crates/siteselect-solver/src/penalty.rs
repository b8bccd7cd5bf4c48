//! Folding the cardinality constraint into a QUBO.

use siteselect_config::PenaltyConfig;
use siteselect_core::{Energy, Result, SelectionError};
use tracing::{debug, warn};

use crate::objective::{CardinalityConstraint, OptimizationProblem};
use crate::qubo::Qubo;

/// How the penalty coefficient is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum PenaltyStrategy {
    /// A caller-supplied coefficient.
    Fixed(f64),
    /// `Σ|c_i| + 1`, which dominates any objective gain.
    #[default]
    Adaptive,
}

impl PenaltyStrategy {
    /// Resolves the coefficient for a problem.
    pub fn coefficient(&self, problem: &OptimizationProblem) -> Result<f64> {
        match *self {
            PenaltyStrategy::Fixed(p) if p.is_finite() && p > 0.0 => Ok(p),
            PenaltyStrategy::Fixed(p) => Err(SelectionError::InvalidPenalty(p)),
            PenaltyStrategy::Adaptive => Ok(problem.magnitude() + 1.0),
        }
    }
}

impl From<&PenaltyConfig> for PenaltyStrategy {
    fn from(config: &PenaltyConfig) -> Self {
        match *config {
            PenaltyConfig::Adaptive => PenaltyStrategy::Adaptive,
            PenaltyConfig::Fixed { value } => PenaltyStrategy::Fixed(value),
        }
    }
}

/// Unconstrained QUBO form of an [`OptimizationProblem`].
///
/// The constraint is kept alongside so solutions can be checked for
/// feasibility after solving.
#[derive(Debug, Clone, PartialEq)]
pub struct PenalizedProblem {
    problem: OptimizationProblem,
    qubo: Qubo,
    penalty: f64,
}

impl PenalizedProblem {
    pub fn qubo(&self) -> &Qubo {
        &self.qubo
    }

    /// The unpenalized problem this was built from.
    pub fn problem(&self) -> &OptimizationProblem {
        &self.problem
    }

    pub fn penalty(&self) -> f64 {
        self.penalty
    }

    pub fn variable_count(&self) -> usize {
        self.qubo.variable_count()
    }

    pub fn constraint(&self) -> CardinalityConstraint {
        self.problem.constraint()
    }

    pub fn max_selected(&self) -> usize {
        self.problem.constraint().max_selected
    }

    /// Returns true when the cardinality term is part of the objective
    /// (`K <= n`).
    pub fn is_binding(&self) -> bool {
        self.max_selected() <= self.variable_count()
    }

    /// Energy of an assignment under the penalized objective.
    pub fn evaluate(&self, assignment: &[bool]) -> Energy {
        self.qubo.evaluate(assignment)
    }

    /// Returns true if the assignment respects the cardinality bound.
    pub fn is_feasible(&self, assignment: &[bool]) -> bool {
        self.constraint().is_satisfied(assignment)
    }
}

/// Builds [`PenalizedProblem`]s.
///
/// A binding constraint (`K <= n`) is encoded as `p · (Σ x_i - K)²`,
/// expanded to `linear_i = c_i + p(1 - 2K)`, `q_ij = 2p` and
/// `offset = p·K²`. Every assignment selecting exactly `K` sites keeps its
/// linear objective, and every assignment above `K` pays at least `p`.
///
/// When `K > n` the bound cannot be reached and the QUBO is the linear
/// objective alone, so sites with negative net benefit are never forced in.
///
/// # Examples
///
/// ```
/// use siteselect_core::{Candidate, ScoreTable};
/// use siteselect_solver::{ConstraintPenalizer, ObjectiveBuilder, PenaltyStrategy};
///
/// let table = ScoreTable::new(vec![
///     Candidate::new(0, 0.9, 0.1, 0.1),
///     Candidate::new(1, 0.2, 0.05, 0.05),
/// ]).unwrap();
/// let problem = ObjectiveBuilder::build(&table, 1).unwrap();
///
/// let penalized = ConstraintPenalizer::penalize(&problem, PenaltyStrategy::Adaptive).unwrap();
/// assert_eq!(penalized.penalty(), 81.0);
/// assert_eq!(penalized.evaluate(&[true, false]).value(), -70.0);
/// assert_eq!(penalized.evaluate(&[true, true]).value(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintPenalizer;

impl ConstraintPenalizer {
    pub fn penalize(
        problem: &OptimizationProblem,
        strategy: PenaltyStrategy,
    ) -> Result<PenalizedProblem> {
        let penalty = strategy.coefficient(problem)?;
        let n = problem.variable_count();
        let k = problem.constraint().max_selected;

        // With K > n no assignment can reach the bound.
        if k > n {
            debug!(variables = n, max_selected = k, "Constraint non-binding");
            return Ok(PenalizedProblem {
                problem: problem.clone(),
                qubo: Qubo::new(problem.coefficients().to_vec(), 0.0),
                penalty,
            });
        }

        let magnitude = problem.magnitude();
        if penalty <= magnitude {
            warn!(
                event = "penalty_not_dominant",
                penalty,
                magnitude,
                "Penalty does not dominate the objective; the solver may exceed the bound"
            );
        }

        let k = k as f64;
        let linear_shift = penalty * (1.0 - 2.0 * k);
        let linear = problem
            .coefficients()
            .iter()
            .map(|c| c + linear_shift)
            .collect();
        let qubo = Qubo::new(linear, penalty * k * k).with_coupling(2.0 * penalty);

        debug!(variables = n, penalty, "Constraint penalized");

        Ok(PenalizedProblem {
            problem: problem.clone(),
            qubo,
            penalty,
        })
    }
}

#[cfg(test)]
mod tests;
