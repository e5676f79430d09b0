//! Obstacle listing command handler

use crate::config::Config;
use anyhow::{Context, Result};
use std::path::PathBuf;
use taskload::{ObstacleScan, Workbook};

/// Print every obstacle marker of the workbook as JSON, grouped by column header
pub fn handle(input: Option<PathBuf>, marker: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let input = config.input_path(input);
    let options = config.extract_options(marker, None);

    let workbook = Workbook::open(&input)
        .with_context(|| format!("Failed to open workbook {}", input.display()))?;

    let scan = ObstacleScan::scan(&workbook, &options.marker);
    let json = serde_json::to_string_pretty(&scan).context("Failed to serialize obstacles")?;
    println!("{}", json);

    Ok(())
}
