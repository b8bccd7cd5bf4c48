//! SiteSelect Core - Core types for constrained site selection
//!
//! This crate provides the fundamental value objects shared by every stage
//! of the selection pipeline:
//! - Candidate records and their integer-quantized scores
//! - The immutable score table handed in by the data-preparation side
//! - Energy values for comparing assignments of the penalized objective
//! - The selection result contract handed out to presentation/export

pub mod candidate;
pub mod energy;
pub mod error;
pub mod result;
pub mod table;

pub use candidate::{Candidate, ScaledScore, SCALE_FACTOR};
pub use energy::Energy;
pub use error::{Result, SelectionError};
pub use result::{BaselineComparison, ResultStatus, SelectedSite, SelectionMetrics, SelectionResult};
pub use table::ScoreTable;
