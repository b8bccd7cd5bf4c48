//! Heuristic variational annealer.
//!
//! A compass search tunes the annealing schedule `θ = (ln T₀, logit r)`.
//! Every parameter vector is scored by the mean final energy of `shots`
//! seeded annealing runs; the lowest-energy sample seen across all runs is
//! the answer.
//!
//! Logging levels:
//! - **DEBUG**: Each optimizer iteration with its expectation value
//! - **TRACE**: Each improving sample

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use siteselect_config::VariationalConfig;
use siteselect_core::Energy;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::anneal::{polish, run_shot, MetropolisAcceptor};
use super::{classify, QuboSolver, Solution};
use crate::error::SolverError;
use crate::penalty::PenalizedProblem;
use crate::scope::SearchScope;
use crate::termination::{NoTermination, StepCountTermination, Termination, TerminationReason};

/// Compass directions over the two schedule parameters.
const DIRECTIONS: [[f64; 2]; 4] = [[1.0, 0.0], [-1.0, 0.0], [0.0, 1.0], [0.0, -1.0]];

/// Heuristic solver that never certifies optimality.
///
/// The iteration budget from [`VariationalConfig::max_iterations`] is a
/// [`StepCountTermination`]. An extra [`Termination`] can stop the search
/// early: a time limit maps to [`SolverError::Timeout`] and an external
/// flag to [`SolverError::Cancelled`].
///
/// # Examples
///
/// ```
/// use siteselect_config::VariationalConfig;
/// use siteselect_core::{Candidate, ScoreTable};
/// use siteselect_solver::{
///     ConstraintPenalizer, HeuristicVariationalSolver, ObjectiveBuilder, PenaltyStrategy,
///     QuboSolver, SolutionStatus,
/// };
///
/// let table = ScoreTable::new(vec![
///     Candidate::new(0, 0.9, 0.1, 0.1),
///     Candidate::new(1, 0.2, 0.05, 0.05),
///     Candidate::new(2, 0.5, 0.4, 0.3),
/// ]).unwrap();
/// let problem = ObjectiveBuilder::build(&table, 2).unwrap();
/// let penalized = ConstraintPenalizer::penalize(&problem, PenaltyStrategy::Adaptive).unwrap();
///
/// let mut solver = HeuristicVariationalSolver::new(VariationalConfig::default()).with_seed(7);
/// let solution = solver.solve(&penalized).unwrap();
/// assert_eq!(solution.assignment, vec![true, true, false]);
/// assert_eq!(solution.status, SolutionStatus::Feasible);
/// ```
#[derive(Debug)]
pub struct HeuristicVariationalSolver<T = NoTermination> {
    config: VariationalConfig,
    seed: Option<u64>,
    budget: StepCountTermination,
    termination: T,
    sender: Option<mpsc::UnboundedSender<(Vec<bool>, f64)>>,
}

impl HeuristicVariationalSolver<NoTermination> {
    pub fn new(config: VariationalConfig) -> Self {
        Self {
            budget: StepCountTermination::new(config.max_iterations),
            config,
            seed: None,
            termination: NoTermination,
            sender: None,
        }
    }
}

impl<T: Termination> HeuristicVariationalSolver<T> {
    /// Fixes the base seed; shot `s` uses `seed + s`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_optional_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Adds a termination checked before every optimizer iteration.
    pub fn with_termination<T2: Termination>(self, termination: T2) -> HeuristicVariationalSolver<T2> {
        HeuristicVariationalSolver {
            config: self.config,
            seed: self.seed,
            budget: self.budget,
            termination,
            sender: self.sender,
        }
    }

    /// Streams every improving `(assignment, energy)` sample.
    pub fn with_sender(mut self, sender: mpsc::UnboundedSender<(Vec<bool>, f64)>) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Returns `Ok(true)` when the budget is spent.
    fn should_stop(&self, scope: &SearchScope) -> Result<bool, SolverError> {
        let reason = self
            .budget
            .termination_reason(scope)
            .or_else(|| self.termination.termination_reason(scope));
        match reason {
            None => Ok(false),
            Some(TerminationReason::BudgetExhausted) => Ok(true),
            Some(TerminationReason::TimeLimit) => Err(SolverError::Timeout {
                elapsed: scope.elapsed().unwrap_or_default(),
            }),
            Some(TerminationReason::Cancelled) => Err(SolverError::Cancelled),
        }
    }

    /// Mean final energy of `shots` annealing runs under schedule `theta`.
    fn expectation(
        &self,
        problem: &PenalizedProblem,
        theta: [f64; 2],
        base_seed: u64,
        scope: &mut SearchScope,
    ) -> Result<f64, SolverError> {
        let qubo = problem.qubo();
        let start_temperature = theta[0].exp() * qubo.energy_scale();
        let cooling_rate = sigmoid(theta[1]);
        let mut acceptor = MetropolisAcceptor::new(start_temperature, cooling_rate);

        let mut total = 0.0;
        for shot in 0..self.config.shots {
            let mut rng = ChaCha8Rng::seed_from_u64(base_seed.wrapping_add(shot as u64));
            let outcome = run_shot(
                qubo,
                &mut acceptor,
                self.config.sweeps,
                &mut rng,
                scope.stats_mut(),
            );
            total += outcome.final_energy;
            self.offer(scope, &outcome.best_assignment, outcome.best_energy);
        }
        scope.stats_mut().record_evaluation();

        let mean = total / self.config.shots as f64;
        if mean.is_finite() {
            Ok(mean)
        } else {
            Err(SolverError::NonConvergence {
                iterations: scope.iteration_count(),
            })
        }
    }

    fn offer(&self, scope: &mut SearchScope, assignment: &[bool], energy: Energy) {
        if !scope.offer(assignment, energy) {
            return;
        }
        trace!(energy = energy.value(), "New best sample");
        if let Some(sender) = &self.sender {
            let _ = sender.send((assignment.to_vec(), energy.value()));
        }
    }
}

impl<T: Termination> QuboSolver for HeuristicVariationalSolver<T> {
    fn solve(&mut self, problem: &PenalizedProblem) -> Result<Solution, SolverError> {
        let n = problem.variable_count();
        let base_seed = self.seed.unwrap_or_else(|| rand::rng().random());

        let mut scope = SearchScope::new();
        scope.start_solving();

        let mut theta = [
            self.config.starting_temperature.ln(),
            logit(self.config.cooling_rate),
        ];
        let mut step = self.config.initial_step;

        if self.should_stop(&scope)? {
            return Err(SolverError::NonConvergence { iterations: 0 });
        }
        let mut current = self.expectation(problem, theta, base_seed, &mut scope)?;

        while !self.should_stop(&scope)? {
            let iteration = scope.increment_iteration_count();

            let mut improved = false;
            for direction in DIRECTIONS {
                let trial = [
                    theta[0] + step * direction[0],
                    theta[1] + step * direction[1],
                ];
                let value = self.expectation(problem, trial, base_seed, &mut scope)?;
                if value < current {
                    theta = trial;
                    current = value;
                    improved = true;
                    break;
                }
            }
            if !improved {
                step *= 0.5;
            }

            debug!(
                event = "iteration",
                iteration,
                expectation = current,
                step,
                best = scope.best_energy().map(|e| e.value()),
            );

            if step < self.config.step_tolerance {
                break;
            }
        }

        let (mut assignment, sampled) = scope
            .take_best()
            .ok_or(SolverError::NonConvergence {
                iterations: scope.iteration_count(),
            })?;
        if assignment.len() != n {
            return Err(SolverError::DimensionMismatch {
                expected: n,
                actual: assignment.len(),
            });
        }

        polish(problem.qubo(), &mut assignment);
        let energy = problem.evaluate(&assignment);
        if energy.is_better_than(&sampled) {
            self.offer(&mut scope, &assignment, energy);
        }
        if !energy.is_finite() {
            return Err(SolverError::NonConvergence {
                iterations: scope.iteration_count(),
            });
        }

        let stats = scope.stats();
        debug!(
            iterations = stats.iterations,
            evaluations = stats.evaluations,
            shots = stats.shots,
            acceptance_rate = stats.acceptance_rate(),
            energy = energy.value(),
            "Variational search finished"
        );

        Ok(Solution {
            status: classify(problem, &assignment),
            assignment,
            objective_value: energy.value(),
            solver: self.solver_name(),
            fallback_used: false,
        })
    }

    fn solver_name(&self) -> &'static str {
        "variational"
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logit_inverts_sigmoid() {
        for p in [0.1, 0.5, 0.9, 0.99] {
            assert!((sigmoid(logit(p)) - p).abs() < 1e-12);
        }
    }
}
