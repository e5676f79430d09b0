//! Score command handler
//!
//! Rescores a published output file in place, or explains one level's score.

use crate::config::Config;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use taskload::{apply_scores, format_number, LevelKey, LevelSet, ScoreBreakdown};

/// Handle the score command
pub fn handle(
    input: &Path,
    output: Option<PathBuf>,
    level: Option<String>,
    sentinel: Option<String>,
) -> Result<()> {
    let config = Config::load()?;
    let options = config.extract_options(None, sentinel);

    if !input.exists() {
        anyhow::bail!("Output file not found: {}", input.display());
    }
    let mut levels = LevelSet::load(input, &options.missing_sentinel)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    if let Some(level) = level {
        let key: LevelKey = level.parse()?;
        let record = levels
            .get(&key)
            .with_context(|| format!("{} not found in {}", key, input.display()))?;

        println!("{}", key);
        for line in breakdown_lines(&ScoreBreakdown::for_record(record)) {
            println!("  {}", line);
        }
        return Ok(());
    }

    apply_scores(&mut levels);

    let output = output.unwrap_or_else(|| input.to_path_buf());
    levels
        .write(&output, &options.missing_sentinel)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Rescored {} levels into {}", levels.len(), output.display());
    Ok(())
}

fn breakdown_lines(breakdown: &ScoreBreakdown) -> Vec<String> {
    let mut lines: Vec<String> = breakdown
        .terms()
        .iter()
        .map(|(label, points)| format!("{:<40} {:>4}", label, format_number(*points)))
        .collect();
    lines.push(format!(
        "{:<40} {:>4}",
        "Challenge score",
        format_number(breakdown.total())
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_lines_end_with_total() {
        let breakdown = ScoreBreakdown {
            start_at_go: 1.0,
            composite: 4.0,
            obstacles: 3.0,
            ..ScoreBreakdown::default()
        };

        let lines = breakdown_lines(&breakdown);
        assert_eq!(lines.len(), 10);
        assert!(lines[0].starts_with("Clock starts at \"Go\""));
        assert!(lines[0].ends_with("   1"));
        assert!(lines[9].starts_with("Challenge score"));
        assert!(lines[9].ends_with("   8"));
    }
}
