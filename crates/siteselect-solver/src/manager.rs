//! Running many selections.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use rayon::prelude::*;
use siteselect_config::SelectionConfig;
use siteselect_core::{Result, ScoreTable, SelectionError, SelectionResult};
use tokio::sync::mpsc;

use crate::pipeline::{run_selection, run_selection_with_channel};

/// Runs selections that share one configuration.
///
/// Each table is one unit of work; independent tables run concurrently on
/// the rayon pool.
///
/// # Examples
///
/// ```
/// use siteselect_config::SelectionConfig;
/// use siteselect_core::{Candidate, ScoreTable};
/// use siteselect_solver::SelectionManager;
///
/// let tables = vec![
///     ScoreTable::new(vec![Candidate::new(0, 0.9, 0.1, 0.1)]).unwrap(),
///     ScoreTable::new(vec![
///         Candidate::new(0, 0.2, 0.1, 0.1),
///         Candidate::new(1, 0.8, 0.1, 0.1),
///     ]).unwrap(),
/// ];
///
/// let manager = SelectionManager::new(SelectionConfig::new().with_max_selected(1).with_random_seed(1));
/// let results = manager.solve_all(&tables);
///
/// assert_eq!(results[0].as_ref().unwrap().selected_ids, vec![0]);
/// assert_eq!(results[1].as_ref().unwrap().selected_ids, vec![1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    config: SelectionConfig,
}

impl SelectionManager {
    pub fn new(config: SelectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    pub fn solve(&self, table: &ScoreTable) -> Result<SelectionResult> {
        run_selection(table, &self.config)
    }

    /// Solves every table, returning results in input order.
    pub fn solve_all(&self, tables: &[ScoreTable]) -> Vec<Result<SelectionResult>> {
        tables.par_iter().map(|table| self.solve(table)).collect()
    }

    /// Starts a selection on a background thread.
    pub fn spawn(&self, table: ScoreTable) -> SelectionJob {
        let terminate = Arc::new(AtomicBool::new(false));
        let (sender, receiver) = mpsc::unbounded_channel();

        let flag = Arc::clone(&terminate);
        let config = self.config.clone();
        let handle = thread::spawn(move || {
            run_selection_with_channel(&table, &config, Some(flag.as_ref()), sender)
        });

        SelectionJob {
            handle,
            receiver,
            terminate,
        }
    }
}

/// Handle to a selection running in the background.
#[derive(Debug)]
pub struct SelectionJob {
    handle: JoinHandle<Result<SelectionResult>>,
    receiver: mpsc::UnboundedReceiver<(Vec<bool>, f64)>,
    terminate: Arc<AtomicBool>,
}

impl SelectionJob {
    /// Asks the heuristic to stop at its next iteration.
    pub fn cancel(&self) {
        self.terminate.store(true, Ordering::SeqCst);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Improving samples streamed so far.
    pub fn receiver(&mut self) -> &mut mpsc::UnboundedReceiver<(Vec<bool>, f64)> {
        &mut self.receiver
    }

    /// Waits for the selection to finish.
    pub fn join(self) -> Result<SelectionResult> {
        self.handle
            .join()
            .map_err(|_| SelectionError::Internal("selection thread panicked".to_string()))?
    }
}
