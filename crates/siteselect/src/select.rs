//! Selection entry points that hide all internal wiring.

use std::path::Path;

use siteselect_config::SelectionConfig;
use siteselect_core::{Result, ScoreTable, SelectionResult};
use siteselect_solver::run_selection;

/// Configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "siteselect.toml";

/// Selects sites using `siteselect.toml`, or defaults when it is absent.
pub fn select_sites(table: &ScoreTable) -> Result<SelectionResult> {
    let config = SelectionConfig::load(CONFIG_FILE).unwrap_or_default();
    select_sites_with_config(table, &config)
}

/// Selects sites with an explicit configuration.
pub fn select_sites_with_config(
    table: &ScoreTable,
    config: &SelectionConfig,
) -> Result<SelectionResult> {
    #[cfg(feature = "console")]
    siteselect_console::init();

    run_selection(table, config)
}

/// Reads a candidate table from JSON, selects, and writes the result next to
/// it when `output` is given.
pub fn select_sites_from_json(
    input: impl AsRef<Path>,
    config: &SelectionConfig,
    output: Option<&Path>,
) -> Result<SelectionResult> {
    let table = ScoreTable::from_json_file(input)?;
    let result = select_sites_with_config(&table, config)?;
    if let Some(path) = output {
        result.write_json(path)?;
    }
    Ok(result)
}
