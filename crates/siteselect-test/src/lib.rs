//! Shared test fixtures for SiteSelect crates.
//!
//! - [`scenario`] - Hand-checked candidate tables with known answers
//! - [`random`] - Seeded random candidate tables for property tests
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! siteselect-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```
//! use siteselect_test::{random_table, scenario_table};
//!
//! assert_eq!(scenario_table().net_benefits(), vec![70, 10, -20]);
//! assert_eq!(random_table(6, 42).len(), 6);
//! ```

pub mod random;
pub mod scenario;

pub use random::{random_candidates, random_table};
pub use scenario::{
    all_negative_table, mixed_table, scenario_candidates, scenario_table, single_negative_table,
};
