//! Configuration system for SiteSelect.
//!
//! Load selection configuration from TOML or YAML files to control the
//! cardinality bound, the penalty strategy, the solver chain and its
//! termination without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use siteselect_config::{PenaltyConfig, SelectionConfig, SolverKind};
//! use std::time::Duration;
//!
//! let config = SelectionConfig::from_toml_str(r#"
//!     max_selected = 5
//!     random_seed = 7
//!
//!     [penalty]
//!     type = "fixed"
//!     value = 1000.0
//!
//!     [solver]
//!     primary = "variational"
//!     fallback = "exact"
//!
//!     [solver.variational]
//!     max_iterations = 50
//!
//!     [termination]
//!     seconds_spent_limit = 30
//! "#).unwrap();
//!
//! assert_eq!(config.max_selected, 5);
//! assert_eq!(config.penalty, PenaltyConfig::Fixed { value: 1000.0 });
//! assert_eq!(config.solver.fallback, SolverKind::Exact);
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use siteselect_config::SelectionConfig;
//!
//! let config = SelectionConfig::load("siteselect.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default cardinality bound.
pub const DEFAULT_MAX_SELECTED: usize = 5;

/// Seed used in reproducible mode when none is configured.
pub const DEFAULT_REPRODUCIBLE_SEED: u64 = 0;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main selection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SelectionConfig {
    /// Maximum number of sites to select (K).
    #[serde(default = "default_max_selected")]
    pub max_selected: usize,

    /// How the constraint penalty coefficient is chosen.
    #[serde(default)]
    pub penalty: PenaltyConfig,

    /// Environment mode affecting reproducibility.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Solver chain configuration.
    #[serde(default)]
    pub solver: SolverConfig,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,
}

fn default_max_selected() -> usize {
    DEFAULT_MAX_SELECTED
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_selected: DEFAULT_MAX_SELECTED,
            penalty: PenaltyConfig::default(),
            environment_mode: EnvironmentMode::default(),
            random_seed: None,
            solver: SolverConfig::default(),
            termination: None,
        }
    }
}

impl SelectionConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the cardinality bound.
    pub fn with_max_selected(mut self, max_selected: usize) -> Self {
        self.max_selected = max_selected;
        self
    }

    /// Sets the penalty strategy.
    pub fn with_penalty(mut self, penalty: PenaltyConfig) -> Self {
        self.penalty = penalty;
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the primary and fallback solvers.
    pub fn with_solvers(mut self, primary: SolverKind, fallback: SolverKind) -> Self {
        self.solver.primary = primary;
        self.solver.fallback = fallback;
        self
    }

    /// Sets the termination time limit in milliseconds.
    pub fn with_termination_millis(mut self, millis: u64) -> Self {
        self.termination = Some(TerminationConfig {
            millis_spent_limit: Some(millis),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Returns the termination time limit, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Returns the seed the solvers should use.
    ///
    /// Reproducible mode falls back to a fixed seed when none is set.
    ///
    /// ```
    /// use siteselect_config::{EnvironmentMode, SelectionConfig};
    ///
    /// let mut config = SelectionConfig::new();
    /// assert_eq!(config.effective_seed(), None);
    ///
    /// config.environment_mode = EnvironmentMode::Reproducible;
    /// assert_eq!(config.effective_seed(), Some(0));
    /// ```
    pub fn effective_seed(&self) -> Option<u64> {
        match self.environment_mode {
            EnvironmentMode::Reproducible => {
                Some(self.random_seed.unwrap_or(DEFAULT_REPRODUCIBLE_SEED))
            }
            EnvironmentMode::NonReproducible => self.random_seed,
        }
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_selected == 0 {
            return Err(ConfigError::Invalid(
                "max_selected must be at least 1".to_string(),
            ));
        }
        if let PenaltyConfig::Fixed { value } = self.penalty {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "fixed penalty must be a finite positive number, got {}",
                    value
                )));
            }
        }
        self.solver.variational.validate()?;
        if self.solver.exact.max_variables == 0 {
            return Err(ConfigError::Invalid(
                "exact.max_variables must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Environment mode affecting solver behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Non-reproducible mode, seeds from the OS unless a seed is set.
    #[default]
    NonReproducible,

    /// Reproducible mode with deterministic behavior.
    Reproducible,
}

/// Penalty coefficient strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PenaltyConfig {
    /// Derive the coefficient from the objective (`Σ|c_i| + 1`).
    #[default]
    Adaptive,

    /// Use a fixed coefficient.
    Fixed { value: f64 },
}

/// Solver implementations available to the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    /// Heuristic variational annealer.
    Variational,

    /// Exhaustive enumeration.
    Exact,
}

/// Solver chain configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Solver attempted first.
    #[serde(default = "default_primary")]
    pub primary: SolverKind,

    /// Solver used when the primary fails.
    #[serde(default = "default_fallback")]
    pub fallback: SolverKind,

    /// Variational annealer settings.
    #[serde(default)]
    pub variational: VariationalConfig,

    /// Exhaustive solver settings.
    #[serde(default)]
    pub exact: ExactConfig,
}

fn default_primary() -> SolverKind {
    SolverKind::Variational
}

fn default_fallback() -> SolverKind {
    SolverKind::Exact
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            fallback: default_fallback(),
            variational: VariationalConfig::default(),
            exact: ExactConfig::default(),
        }
    }
}

/// Variational annealer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct VariationalConfig {
    /// Maximum classical-optimizer iterations.
    pub max_iterations: u64,

    /// Annealing runs per parameter evaluation.
    pub shots: usize,

    /// Sweeps per annealing run.
    pub sweeps: usize,

    /// Starting temperature relative to the problem's energy scale.
    pub starting_temperature: f64,

    /// Multiplicative temperature decay per sweep, in `(0, 1)`.
    pub cooling_rate: f64,

    /// Initial step of the parameter search.
    pub initial_step: f64,

    /// Step size below which the parameter search has converged.
    pub step_tolerance: f64,
}

impl Default for VariationalConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            shots: 8,
            sweeps: 64,
            starting_temperature: 1.0,
            cooling_rate: 0.9,
            initial_step: 0.5,
            step_tolerance: 1e-3,
        }
    }
}

impl VariationalConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 || self.shots == 0 || self.sweeps == 0 {
            return Err(ConfigError::Invalid(
                "variational max_iterations, shots and sweeps must be at least 1".to_string(),
            ));
        }
        if !(self.starting_temperature.is_finite() && self.starting_temperature > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "variational starting_temperature must be positive, got {}",
                self.starting_temperature
            )));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "variational cooling_rate must be within (0, 1), got {}",
                self.cooling_rate
            )));
        }
        if !(self.initial_step > 0.0 && self.step_tolerance > 0.0) {
            return Err(ConfigError::Invalid(
                "variational initial_step and step_tolerance must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Exhaustive solver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ExactConfig {
    /// Largest variable count the exhaustive solver accepts.
    pub max_variables: usize,
}

impl Default for ExactConfig {
    fn default() -> Self {
        Self { max_variables: 25 }
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend solving.
    pub millis_spent_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let limit = Duration::from_secs(self.seconds_spent_limit.unwrap_or(0))
            .saturating_add(Duration::from_millis(self.millis_spent_limit.unwrap_or(0)));
        (!limit.is_zero()).then_some(limit)
    }
}
