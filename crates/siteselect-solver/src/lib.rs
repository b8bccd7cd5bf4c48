//! SiteSelect Solver Engine
//!
//! This crate turns a score table into a selection:
//! - Objective building and constraint penalization (QUBO form)
//! - Exact and heuristic QUBO solvers behind a fallback chain
//! - Termination conditions for the heuristic search
//! - The greedy baseline and result assembly
//! - The end-to-end pipeline and a manager for batches

pub mod assemble;
pub mod error;
pub mod greedy;
pub mod manager;
pub mod objective;
pub mod penalty;
pub mod pipeline;
pub mod qubo;
pub mod scope;
pub mod solver;
pub mod stats;
pub mod termination;

pub use assemble::ResultAssembler;
pub use error::SolverError;
pub use greedy::BaselineGreedySelector;
pub use manager::{SelectionJob, SelectionManager};
pub use objective::{CardinalityConstraint, ObjectiveBuilder, OptimizationProblem};
pub use penalty::{ConstraintPenalizer, PenalizedProblem, PenaltyStrategy};
pub use pipeline::{run_selection, run_selection_with_channel, SampleSender};
pub use qubo::{LocalFields, Qubo};
pub use scope::SearchScope;
pub use solver::{
    ExactEigensolver, FallbackSolver, HeuristicVariationalSolver, MetropolisAcceptor, QuboSolver,
    Solution, SolutionStatus,
};
pub use stats::SolverStats;
pub use termination::{
    ExternalTermination, NoTermination, OrTermination, StepCountTermination, Termination,
    TerminationReason, TimeTermination,
};
