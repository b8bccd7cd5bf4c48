//! Search statistics.

/// Counters accumulated while the heuristic searches.
///
/// # Example
///
/// ```
/// use siteselect_solver::stats::SolverStats;
///
/// let mut stats = SolverStats::default();
/// stats.record_iteration();
/// stats.record_flip(true);
/// stats.record_flip(false);
///
/// assert_eq!(stats.iterations, 1);
/// assert_eq!(stats.flips_evaluated, 2);
/// assert_eq!(stats.acceptance_rate(), 0.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolverStats {
    /// Outer optimizer iterations completed.
    pub iterations: u64,
    /// Expectation evaluations, one per parameter vector tried.
    pub evaluations: u64,
    /// Annealing runs performed.
    pub shots: u64,
    /// Single-bit flips proposed.
    pub flips_evaluated: u64,
    /// Single-bit flips accepted.
    pub flips_accepted: u64,
}

impl SolverStats {
    pub fn record_iteration(&mut self) {
        self.iterations += 1;
    }

    pub fn record_evaluation(&mut self) {
        self.evaluations += 1;
    }

    pub fn record_shot(&mut self) {
        self.shots += 1;
    }

    /// Records a proposed flip and whether it was accepted.
    pub fn record_flip(&mut self, accepted: bool) {
        self.flips_evaluated += 1;
        if accepted {
            self.flips_accepted += 1;
        }
    }

    /// Returns the acceptance rate (accepted / evaluated).
    pub fn acceptance_rate(&self) -> f64 {
        if self.flips_evaluated == 0 {
            0.0
        } else {
            self.flips_accepted as f64 / self.flips_evaluated as f64
        }
    }
}
