//! Configuration management for the taskload CLI

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use taskload::ExtractOptions;

/// Workbook read when neither a flag nor the config names one
pub const DEFAULT_INPUT: &str = "Overcooked 2 Full Task Analysis.xlsx";

/// Output file used when neither a flag nor the config names one
pub const DEFAULT_OUTPUT: &str = "public/all_levels.json";

#[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub marker: Option<String>,
    pub sentinel: Option<String>,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("taskload");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Workbook path: flag, then config, then the default
    pub fn input_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.input.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT))
    }

    /// Output path: flag, then config, then the default
    pub fn output_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.output.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    /// Extraction options with flags layered over config over library defaults
    pub fn extract_options(&self, marker: Option<String>, sentinel: Option<String>) -> ExtractOptions {
        let defaults = ExtractOptions::default();
        ExtractOptions {
            marker: marker
                .or_else(|| self.marker.clone())
                .unwrap_or(defaults.marker),
            missing_sentinel: sentinel
                .or_else(|| self.sentinel.clone())
                .unwrap_or(defaults.missing_sentinel),
            worlds: defaults.worlds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskload::{DEFAULT_MISSING_SENTINEL, DEFAULT_OBSTACLE_MARKER};

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::default();
        assert_eq!(config.input_path(None), PathBuf::from(DEFAULT_INPUT));
        assert_eq!(config.output_path(None), PathBuf::from(DEFAULT_OUTPUT));

        let options = config.extract_options(None, None);
        assert_eq!(options.marker, DEFAULT_OBSTACLE_MARKER);
        assert_eq!(options.missing_sentinel, DEFAULT_MISSING_SENTINEL);
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config {
            input: Some(PathBuf::from("configured.xlsx")),
            output: None,
            marker: Some("Obstacles".to_string()),
            sentinel: Some("TODO".to_string()),
        };

        assert_eq!(config.input_path(None), PathBuf::from("configured.xlsx"));
        assert_eq!(
            config.input_path(Some(PathBuf::from("flag.xlsx"))),
            PathBuf::from("flag.xlsx")
        );

        let options = config.extract_options(None, Some(String::new()));
        assert_eq!(options.marker, "Obstacles");
        assert_eq!(options.missing_sentinel, "");
    }

    #[test]
    fn test_save_and_load_roundtrip() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("taskload").join("config.toml");

        assert_eq!(Config::load_from(&path)?, Config::default());

        let config = Config {
            input: Some(PathBuf::from("analysis.xlsx")),
            output: Some(PathBuf::from("out/levels.json")),
            marker: None,
            sentinel: Some("fill me in".to_string()),
        };
        config.save_to(&path)?;

        assert_eq!(Config::load_from(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_config_path_exists() {
        let result = Config::config_path();
        assert!(result.is_ok());
    }
}
