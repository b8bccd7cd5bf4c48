//! Exhaustive minimizer over all assignments.
//!
//! The space is cut into `2^t` chunks by fixing the top `t` variables; each
//! chunk walks its remaining variables in Gray-code order so consecutive
//! assignments differ by one flip and energies update in O(1).

use rayon::prelude::*;
use siteselect_core::Energy;
use tracing::debug;

use super::{QuboSolver, Solution, SolutionStatus};
use crate::error::SolverError;
use crate::penalty::PenalizedProblem;
use crate::qubo::{LocalFields, Qubo};

/// Default largest variable count accepted.
pub const DEFAULT_MAX_VARIABLES: usize = 25;

/// Enumeration index space is a `u64`.
const HARD_LIMIT: usize = 63;

/// Problems below this size run as a single chunk.
const PARALLEL_THRESHOLD: usize = 12;

/// Upper bound on the number of fixed bits per chunk.
const MAX_CHUNK_BITS: usize = 6;

/// Exact solver enumerating all `2^n` assignments.
///
/// Ties between equal energies resolve toward the chunk with the lowest
/// index and then toward the earliest Gray-code step, so repeated solves
/// return the same assignment regardless of thread scheduling.
///
/// # Examples
///
/// ```
/// use siteselect_core::{Candidate, ScoreTable};
/// use siteselect_solver::{
///     ConstraintPenalizer, ExactEigensolver, ObjectiveBuilder, PenaltyStrategy, QuboSolver,
///     SolutionStatus,
/// };
///
/// let table = ScoreTable::new(vec![
///     Candidate::new(0, 0.9, 0.1, 0.1),
///     Candidate::new(1, 0.2, 0.05, 0.05),
///     Candidate::new(2, 0.5, 0.4, 0.3),
/// ]).unwrap();
/// let problem = ObjectiveBuilder::build(&table, 2).unwrap();
/// let penalized = ConstraintPenalizer::penalize(&problem, PenaltyStrategy::Fixed(1000.0)).unwrap();
///
/// let solution = ExactEigensolver::default().solve(&penalized).unwrap();
/// assert_eq!(solution.assignment, vec![true, true, false]);
/// assert_eq!(solution.status, SolutionStatus::Optimal);
/// ```
#[derive(Debug, Clone)]
pub struct ExactEigensolver {
    max_variables: usize,
}

impl ExactEigensolver {
    pub fn new(max_variables: usize) -> Self {
        Self { max_variables }
    }

    /// Effective variable limit.
    pub fn limit(&self) -> usize {
        self.max_variables.min(HARD_LIMIT)
    }
}

impl Default for ExactEigensolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_VARIABLES)
    }
}

impl QuboSolver for ExactEigensolver {
    fn solve(&mut self, problem: &PenalizedProblem) -> Result<Solution, SolverError> {
        let qubo = problem.qubo();
        let n = qubo.variable_count();
        if n > self.limit() {
            return Err(SolverError::ProblemTooLarge {
                variables: n,
                limit: self.limit(),
            });
        }

        let chunk_bits = if n < PARALLEL_THRESHOLD {
            0
        } else {
            (n - PARALLEL_THRESHOLD + 1).min(MAX_CHUNK_BITS)
        };
        let free_bits = n - chunk_bits;

        let best = (0..1u64 << chunk_bits)
            .into_par_iter()
            .map(|chunk| search_chunk(qubo, chunk, free_bits))
            .min_by(|a, b| a.energy.cmp(&b.energy).then(a.rank.cmp(&b.rank)));

        let assignment = match best {
            Some(best) => decode(n, best.rank, free_bits),
            None => vec![false; n],
        };
        let energy = problem.evaluate(&assignment);
        let status = if problem.is_feasible(&assignment) {
            SolutionStatus::Optimal
        } else {
            SolutionStatus::Infeasible
        };

        debug!(
            variables = n,
            chunks = 1u64 << chunk_bits,
            energy = energy.value(),
            ?status,
            "Exhaustive search finished"
        );

        Ok(Solution {
            assignment,
            objective_value: energy.value(),
            status,
            solver: self.solver_name(),
            fallback_used: false,
        })
    }

    fn solver_name(&self) -> &'static str {
        "exact"
    }
}

/// Best point of one chunk, keyed by `(chunk << free_bits) | gray_step`.
#[derive(Debug, Clone, Copy)]
struct ChunkBest {
    energy: Energy,
    rank: u64,
}

fn search_chunk(qubo: &Qubo, chunk: u64, free_bits: usize) -> ChunkBest {
    let n = qubo.variable_count();
    let mut assignment: Vec<bool> = (0..n)
        .map(|i| i >= free_bits && (chunk >> (i - free_bits)) & 1 == 1)
        .collect();
    let mut fields = LocalFields::new(qubo, &assignment);
    let mut energy = qubo.evaluate(&assignment).value();

    let mut best_energy = energy;
    let mut best_step = 0u64;

    for step in 1..(1u64 << free_bits) {
        let i = step.trailing_zeros() as usize;
        energy += fields.flip_delta(i, assignment[i]);
        assignment[i] = !assignment[i];
        fields.apply_flip(assignment[i]);

        if energy < best_energy {
            best_energy = energy;
            best_step = step;
        }
    }

    ChunkBest {
        energy: Energy::of(best_energy),
        rank: (chunk << free_bits) | best_step,
    }
}

/// Rebuilds the assignment visited at `rank`.
fn decode(n: usize, rank: u64, free_bits: usize) -> Vec<bool> {
    let step = rank & ((1u64 << free_bits) - 1);
    let gray = step ^ (step >> 1);
    let chunk = rank >> free_bits;
    (0..n)
        .map(|i| {
            if i < free_bits {
                (gray >> i) & 1 == 1
            } else {
                (chunk >> (i - free_bits)) & 1 == 1
            }
        })
        .collect()
}
