//! Single-flip simulated annealing runs.

use rand::Rng;
use siteselect_core::Energy;

use crate::qubo::{LocalFields, Qubo};
use crate::stats::SolverStats;

/// Metropolis acceptor with geometric cooling.
///
/// Improving flips are always accepted; worsening flips are accepted with
/// probability `exp(-delta / T)`.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use siteselect_solver::MetropolisAcceptor;
///
/// let mut acceptor = MetropolisAcceptor::new(10.0, 0.5);
/// let mut rng = ChaCha8Rng::seed_from_u64(0);
///
/// assert!(acceptor.is_accepted(-1.0, &mut rng));
/// acceptor.cool();
/// assert_eq!(acceptor.temperature(), 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct MetropolisAcceptor {
    starting_temperature: f64,
    current_temperature: f64,
    decay_rate: f64,
}

impl MetropolisAcceptor {
    /// Creates an acceptor.
    ///
    /// # Arguments
    /// * `starting_temperature` - Initial temperature in energy units
    /// * `decay_rate` - Multiplicative decay per sweep (e.g., 0.9)
    pub fn new(starting_temperature: f64, decay_rate: f64) -> Self {
        Self {
            starting_temperature,
            current_temperature: starting_temperature,
            decay_rate,
        }
    }

    pub fn temperature(&self) -> f64 {
        self.current_temperature
    }

    pub fn reset(&mut self) {
        self.current_temperature = self.starting_temperature;
    }

    pub fn is_accepted<R: Rng>(&self, delta: f64, rng: &mut R) -> bool {
        if delta <= 0.0 {
            return true;
        }
        if self.current_temperature <= 0.0 || !self.current_temperature.is_finite() {
            return false;
        }
        rng.random::<f64>() < (-delta / self.current_temperature).exp()
    }

    /// Lowers the temperature by one step.
    pub fn cool(&mut self) {
        self.current_temperature *= self.decay_rate;
    }
}

/// Outcome of one annealing run.
#[derive(Debug, Clone)]
pub(crate) struct ShotOutcome {
    /// Energy of the state the run ended in.
    pub final_energy: f64,
    /// Lowest-energy state visited.
    pub best_assignment: Vec<bool>,
    pub best_energy: Energy,
}

/// Runs `sweeps` sweeps of single-flip annealing from a random start.
pub(crate) fn run_shot<R: Rng>(
    qubo: &Qubo,
    acceptor: &mut MetropolisAcceptor,
    sweeps: usize,
    rng: &mut R,
    stats: &mut SolverStats,
) -> ShotOutcome {
    let n = qubo.variable_count();
    let mut assignment: Vec<bool> = (0..n).map(|_| rng.random::<bool>()).collect();
    let mut fields = LocalFields::new(qubo, &assignment);
    let mut energy = qubo.evaluate(&assignment).value();

    let mut best_assignment = assignment.clone();
    let mut best_energy = energy;

    acceptor.reset();
    for _ in 0..sweeps {
        for i in 0..n {
            let delta = fields.flip_delta(i, assignment[i]);
            let accepted = acceptor.is_accepted(delta, rng);
            stats.record_flip(accepted);
            if !accepted {
                continue;
            }
            assignment[i] = !assignment[i];
            fields.apply_flip(assignment[i]);
            energy += delta;
            if energy < best_energy {
                best_energy = energy;
                best_assignment.copy_from_slice(&assignment);
            }
        }
        acceptor.cool();
    }
    stats.record_shot();

    // Re-evaluate to drop accumulated rounding.
    let best_energy = qubo.evaluate(&best_assignment);
    ShotOutcome {
        final_energy: energy,
        best_assignment,
        best_energy,
    }
}

/// Descends with single flips and selected/unselected exchanges until no
/// move improves the energy.
///
/// Under a uniform coupling the best exchange always pairs the selected
/// variable with the largest linear term against the unselected one with
/// the smallest.
pub(crate) fn polish(qubo: &Qubo, assignment: &mut [bool]) {
    let n = assignment.len();
    let mut fields = LocalFields::new(qubo, assignment);
    let max_passes = n * n + n + 1;

    for _ in 0..max_passes {
        if let Some(i) = (0..n).find(|&i| fields.flip_delta(i, assignment[i]) < 0.0) {
            assignment[i] = !assignment[i];
            fields.apply_flip(assignment[i]);
            continue;
        }

        let linear = qubo.linear();
        let by_linear = |a: &usize, b: &usize| linear[*a].total_cmp(&linear[*b]);
        let worst_selected = (0..n).filter(|&i| assignment[i]).max_by(by_linear);
        let best_unselected = (0..n).filter(|&j| !assignment[j]).min_by(by_linear);
        let exchange = worst_selected
            .zip(best_unselected)
            .filter(|&(i, j)| fields.exchange_delta(i, j) < 0.0);
        match exchange {
            Some((i, j)) => {
                assignment[i] = false;
                assignment[j] = true;
            }
            None => break,
        }
    }
}
