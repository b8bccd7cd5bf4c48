//! End-to-end selection run.
//!
//! Logging levels:
//! - **INFO**: Selection start/end, problem scale
//! - **WARN**: Solver fallback, non-dominant penalty, bound violations
//! - **DEBUG**: Optimizer iterations and solver summaries
//! - **TRACE**: Improving samples

use std::sync::atomic::AtomicBool;
use std::time::Instant;

use siteselect_config::{SelectionConfig, SolverKind};
use siteselect_core::{Result, ResultStatus, ScoreTable, SelectionError, SelectionResult};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::assemble::ResultAssembler;
use crate::greedy::BaselineGreedySelector;
use crate::objective::ObjectiveBuilder;
use crate::penalty::{ConstraintPenalizer, PenaltyStrategy};
use crate::solver::{
    ExactEigensolver, FallbackSolver, HeuristicVariationalSolver, QuboSolver, Solution,
};
use crate::termination::{ExternalTermination, OrTermination, TimeTermination};

/// Improving `(assignment, energy)` samples from the heuristic.
pub type SampleSender = mpsc::UnboundedSender<(Vec<bool>, f64)>;

/// Selects sites from `table` as configured.
///
/// # Examples
///
/// ```
/// use siteselect_config::{PenaltyConfig, SelectionConfig};
/// use siteselect_core::{Candidate, ResultStatus, ScoreTable};
/// use siteselect_solver::run_selection;
///
/// let table = ScoreTable::new(vec![
///     Candidate::new(0, 0.9, 0.1, 0.1),
///     Candidate::new(1, 0.2, 0.05, 0.05),
///     Candidate::new(2, 0.5, 0.4, 0.3),
/// ]).unwrap();
/// let config = SelectionConfig::new()
///     .with_max_selected(2)
///     .with_penalty(PenaltyConfig::Fixed { value: 1000.0 })
///     .with_random_seed(7);
///
/// let result = run_selection(&table, &config).unwrap();
/// assert_eq!(result.selected_ids, vec![0, 1]);
/// assert_eq!(result.metrics.net_benefit, 80);
/// assert_eq!(result.baseline.unwrap().improvement_percent, 0.0);
/// ```
pub fn run_selection(table: &ScoreTable, config: &SelectionConfig) -> Result<SelectionResult> {
    // Nobody listens; samples are dropped.
    let (sender, _receiver) = mpsc::unbounded_channel();
    run_selection_with_channel(table, config, None, sender)
}

/// Selects sites with sample streaming and optional cancellation.
///
/// Raising `terminate` stops the heuristic at its next iteration and the run
/// fails with [`SelectionError::Cancelled`].
pub fn run_selection_with_channel(
    table: &ScoreTable,
    config: &SelectionConfig,
    terminate: Option<&AtomicBool>,
    sender: SampleSender,
) -> Result<SelectionResult> {
    let started = Instant::now();
    let max_selected = config.max_selected;

    info!(
        event = "selection_start",
        candidate_count = table.len(),
        max_selected,
    );

    let problem = ObjectiveBuilder::build(table, max_selected)?;
    let penalized = ConstraintPenalizer::penalize(&problem, PenaltyStrategy::from(&config.penalty))?;
    config
        .validate()
        .map_err(|e| SelectionError::Config(e.to_string()))?;

    info!(
        event = "problem_built",
        variable_count = penalized.variable_count(),
        penalty = penalized.penalty(),
        binding = penalized.is_binding(),
    );

    let greedy = BaselineGreedySelector::select(table, max_selected)?;

    let primary = build_solver(config.solver.primary, config, terminate, &sender);
    let fallback = build_solver(config.solver.fallback, config, terminate, &sender);
    let solution = FallbackSolver::new(primary, fallback).solve(&penalized)?;

    let result = ResultAssembler::new(max_selected).assemble(&solution, table, &greedy)?;
    log_end(&result, &solution, started);

    if result.status == ResultStatus::ConstraintViolated {
        warn!(
            event = "constraint_violated",
            selected = result.selected_count(),
            max_selected,
        );
        return Err(SelectionError::ConstraintViolated(Box::new(result)));
    }
    Ok(result)
}

fn build_solver<'a>(
    kind: SolverKind,
    config: &SelectionConfig,
    terminate: Option<&'a AtomicBool>,
    sender: &SampleSender,
) -> Box<dyn QuboSolver + 'a> {
    match kind {
        SolverKind::Exact => Box::new(ExactEigensolver::new(config.solver.exact.max_variables)),
        SolverKind::Variational => {
            let termination = OrTermination::new((
                terminate.map(ExternalTermination::new),
                config.time_limit().map(TimeTermination::new),
            ));
            Box::new(
                HeuristicVariationalSolver::new(config.solver.variational.clone())
                    .with_optional_seed(config.effective_seed())
                    .with_termination(termination)
                    .with_sender(sender.clone()),
            )
        }
    }
}

fn log_end(result: &SelectionResult, solution: &Solution, started: Instant) {
    let improvement = result.baseline.map(|b| b.improvement_percent);
    info!(
        event = "selection_end",
        status = %result.status,
        solver = %result.solver,
        fallback_used = solution.fallback_used,
        selected = result.selected_count(),
        net_benefit = result.metrics.net_benefit,
        objective = result.objective_value,
        improvement_percent = improvement,
        elapsed_ms = started.elapsed().as_millis() as u64,
    );
}
