//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up taskload defaults.

use crate::config::{Config, DEFAULT_INPUT, DEFAULT_OUTPUT};
use anyhow::Result;
use std::path::PathBuf;
use taskload::{DEFAULT_MISSING_SENTINEL, DEFAULT_OBSTACLE_MARKER};

/// Handle the configure command
///
/// # Arguments
/// * `input`, `output` - Default workbook and output paths
/// * `marker`, `sentinel` - Default obstacle marker and missing-value text
/// * `show` - If true, show current configuration
pub fn handle(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    marker: Option<String>,
    sentinel: Option<String>,
    show: bool,
) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if !apply_settings(&mut config, input, output, marker, sentinel) {
        show_usage();
        return Ok(());
    }

    config.save()?;
    show_config(&config);
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Copy provided settings into the config; false when nothing was provided
fn apply_settings(
    config: &mut Config,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    marker: Option<String>,
    sentinel: Option<String>,
) -> bool {
    let mut changed = false;

    if let Some(path) = input {
        config.input = Some(path);
        changed = true;
    }
    if let Some(path) = output {
        config.output = Some(path);
        changed = true;
    }
    if let Some(text) = marker {
        config.marker = Some(text);
        changed = true;
    }
    if let Some(text) = sentinel {
        config.sentinel = Some(text);
        changed = true;
    }

    changed
}

/// Display current configuration
fn show_config(config: &Config) {
    let input = config.input_path(None);
    let output = config.output_path(None);
    let options = config.extract_options(None, None);

    println!("Workbook: {}", input.display());
    println!("Output: {}", output.display());
    println!("Obstacle marker: {}", options.marker);
    println!("Missing value text: {:?}", options.missing_sentinel);

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: taskload configure --input WORKBOOK --output JSON");
    println!("   or: taskload configure --marker TEXT --sentinel TEXT");
    println!("   or: taskload configure --show");
    println!();
    println!("Defaults: --input {:?} --output {:?}", DEFAULT_INPUT, DEFAULT_OUTPUT);
    println!(
        "          --marker {:?} --sentinel {:?}",
        DEFAULT_OBSTACLE_MARKER, DEFAULT_MISSING_SENTINEL
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_usage_does_not_panic() {
        show_usage();
    }

    #[test]
    fn test_apply_settings_nothing_provided() {
        let mut config = Config::default();
        assert!(!apply_settings(&mut config, None, None, None, None));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_apply_settings_keeps_unprovided_values() {
        let mut config = Config {
            input: Some(PathBuf::from("old.xlsx")),
            output: Some(PathBuf::from("old.json")),
            marker: None,
            sentinel: None,
        };

        let changed = apply_settings(
            &mut config,
            None,
            Some(PathBuf::from("new.json")),
            None,
            Some(String::new()),
        );

        assert!(changed);
        assert_eq!(config.input, Some(PathBuf::from("old.xlsx")));
        assert_eq!(config.output, Some(PathBuf::from("new.json")));
        assert_eq!(config.sentinel.as_deref(), Some(""));
    }
}
