//! Extract command handler
//!
//! Runs the full pipeline: workbook → level records → obstacles → scores →
//! carried video links → JSON output.

use crate::config::Config;
use anyhow::{Context, Result};
use std::path::PathBuf;
use taskload::{LevelSet, Workbook};
use tracing::info;

/// Handle the extract command
pub fn handle(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    prior: Option<PathBuf>,
    marker: Option<String>,
    sentinel: Option<String>,
) -> Result<()> {
    let config = Config::load()?;
    let input = config.input_path(input);
    let output = config.output_path(output);
    let prior_path = prior.unwrap_or_else(|| output.clone());
    let options = config.extract_options(marker, sentinel);

    info!("Reading {}", input.display());
    let workbook = Workbook::open(&input)
        .with_context(|| format!("Failed to open workbook {}", input.display()))?;

    let prior = LevelSet::load(&prior_path, &options.missing_sentinel)
        .with_context(|| format!("Failed to read previous output {}", prior_path.display()))?;

    let result = taskload::run(&workbook, &prior, &options);

    result
        .levels
        .write(&output, &options.missing_sentinel)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let summary = missing_summary(&result.levels);
    if summary.is_empty() {
        println!("All levels complete");
    } else {
        println!("Levels needing manual input:");
        for line in &summary {
            println!("  {}", line);
        }
    }

    println!();
    println!(
        "Wrote {} levels to {} ({} obstacle markers, {} video links carried)",
        result.levels.len(),
        output.display(),
        result.obstacles.occurrence_count(),
        result.carried
    );

    Ok(())
}

/// One line per level that still has missing spreadsheet fields
fn missing_summary(levels: &LevelSet) -> Vec<String> {
    levels
        .iter()
        .filter_map(|(key, record)| {
            let missing = record.missing_fields();
            if missing.is_empty() {
                return None;
            }
            let names: Vec<&str> = missing.iter().map(|f| f.name()).collect();
            Some(format!(
                "{}: {} missing ({})",
                key,
                missing.len(),
                names.join(", ")
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskload::{Field, FieldValue, LevelKey, LevelRecord};

    #[test]
    fn test_missing_summary_skips_complete_levels() {
        let mut complete = LevelRecord::new();
        for field in Field::ALL {
            complete.set(field, FieldValue::text("1"));
        }
        complete.set(Field::TipMultiplier, FieldValue::Missing);
        complete.set(Field::Notes, FieldValue::Missing);

        let mut levels = LevelSet::new();
        levels.insert(LevelKey::new(1, 1), complete);

        let mut full = LevelRecord::new();
        for field in Field::ALL {
            full.set(field, FieldValue::text("1"));
        }
        full.set(Field::VideoLink, FieldValue::text(""));
        levels.insert(LevelKey::new(1, 2), full);

        let summary = missing_summary(&levels);
        assert_eq!(
            summary,
            vec!["Level_1_1: 2 missing (tip_multiplier, notes)".to_string()]
        );
    }

    #[test]
    fn test_missing_summary_empty_set() {
        assert!(missing_summary(&LevelSet::new()).is_empty());
    }
}
