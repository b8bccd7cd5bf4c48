//! Search-level scope.

use std::time::{Duration, Instant};

use siteselect_core::Energy;

use crate::stats::SolverStats;

/// State of one heuristic solve: clock, iteration count and best sample.
#[derive(Debug, Default)]
pub struct SearchScope {
    start_time: Option<Instant>,
    iteration_count: u64,
    best_assignment: Option<Vec<bool>>,
    best_energy: Option<Energy>,
    stats: SolverStats,
}

impl SearchScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_solving(&mut self) {
        self.start_time = Some(Instant::now());
        self.iteration_count = 0;
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    pub fn increment_iteration_count(&mut self) -> u64 {
        self.iteration_count += 1;
        self.stats.record_iteration();
        self.iteration_count
    }

    pub fn iteration_count(&self) -> u64 {
        self.iteration_count
    }

    pub fn best_assignment(&self) -> Option<&[bool]> {
        self.best_assignment.as_deref()
    }

    pub fn best_energy(&self) -> Option<Energy> {
        self.best_energy
    }

    /// Records a sample, keeping it if strictly better than the best so far.
    ///
    /// Returns true if the sample became the new best.
    pub fn offer(&mut self, assignment: &[bool], energy: Energy) -> bool {
        let is_better = match self.best_energy {
            None => true,
            Some(best) => energy.is_better_than(&best),
        };
        if is_better {
            self.best_assignment = Some(assignment.to_vec());
            self.best_energy = Some(energy);
        }
        is_better
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut SolverStats {
        &mut self.stats
    }

    /// Takes the best sample, if any.
    pub fn take_best(&mut self) -> Option<(Vec<bool>, Energy)> {
        let assignment = self.best_assignment.take()?;
        let energy = self.best_energy.take()?;
        Some((assignment, energy))
    }
}
