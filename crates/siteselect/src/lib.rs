//! SiteSelect - Constrained Site Selection in Rust
//!
//! Zero-wiring API: build a [`ScoreTable`] and call [`select_sites`].
//!
//! # Example
//!
//! ```rust
//! use siteselect::prelude::*;
//!
//! let table = ScoreTable::new(vec![
//!     Candidate::new(0, 0.9, 0.1, 0.1),
//!     Candidate::new(1, 0.2, 0.05, 0.05),
//!     Candidate::new(2, 0.5, 0.4, 0.3),
//! ]).unwrap();
//!
//! let config = SelectionConfig::new().with_max_selected(2).with_random_seed(7);
//! let result = select_sites_with_config(&table, &config).unwrap();
//! assert_eq!(result.selected_ids, vec![0, 1]);
//! ```

// Value objects
pub use siteselect_core::{
    BaselineComparison, Candidate, Energy, Result, ResultStatus, ScaledScore, ScoreTable,
    SelectedSite, SelectionError, SelectionMetrics, SelectionResult, SCALE_FACTOR,
};

// Configuration
pub use siteselect_config::{
    ConfigError, EnvironmentMode, PenaltyConfig, SelectionConfig, SolverKind,
};

// Pipeline stages for callers wiring their own runs
pub use siteselect_solver::{
    BaselineGreedySelector, ConstraintPenalizer, ExactEigensolver, FallbackSolver,
    HeuristicVariationalSolver, ObjectiveBuilder, PenaltyStrategy, QuboSolver, ResultAssembler,
    SelectionJob, SelectionManager, Solution, SolutionStatus,
};

#[cfg(feature = "console")]
pub use siteselect_console as console;

mod select;
pub use select::{select_sites, select_sites_from_json, select_sites_with_config, CONFIG_FILE};

pub mod prelude {
    pub use super::{
        select_sites, select_sites_from_json, select_sites_with_config,
    };
    pub use super::{Candidate, ResultStatus, ScoreTable, SelectionError, SelectionResult};
    pub use super::{PenaltyConfig, SelectionConfig, SolverKind};
}
