//! Configuration file support for macrocalc.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/macrocalc/config.toml` and
//! supplies defaults for the command-line flags.

use crate::{Error, MacroPercentages, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub targets: TargetsConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Default macro targets
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TargetsConfig {
    #[serde(default = "default_pct_carbs")]
    pub pct_carbs: i64,

    #[serde(default = "default_pct_protein")]
    pub pct_protein: i64,

    #[serde(default = "default_pct_fat")]
    pub pct_fat: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carb_limit: Option<i64>,

    #[serde(default = "default_pct_deficit")]
    pub pct_deficit: i64,
}

impl Default for TargetsConfig {
    fn default() -> Self {
        Self {
            pct_carbs: default_pct_carbs(),
            pct_protein: default_pct_protein(),
            pct_fat: default_pct_fat(),
            carb_limit: None,
            pct_deficit: default_pct_deficit(),
        }
    }
}

impl TargetsConfig {
    pub fn percentages(&self) -> MacroPercentages {
        MacroPercentages::new(self.pct_carbs, self.pct_protein, self.pct_fat)
    }
}

/// Report output configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

// Default value functions
fn default_pct_carbs() -> i64 {
    10
}

fn default_pct_protein() -> i64 {
    30
}

fn default_pct_fat() -> i64 {
    60
}

fn default_pct_deficit() -> i64 {
    20
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = match dirs::config_dir() {
            Some(dir) => dir,
            None => {
                let home = std::env::var("HOME").map_err(|_| {
                    Error::Config("Cannot locate config directory: HOME is not set".into())
                })?;
                PathBuf::from(home).join(".config")
            }
        };
        Ok(base.join("macrocalc").join("config.toml"))
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.targets.percentages(), MacroPercentages::new(10, 30, 60));
        assert_eq!(config.targets.carb_limit, None);
        assert_eq!(config.targets.pct_deficit, 20);
        assert_eq!(config.output.format, OutputFormat::Table);
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.targets.carb_limit = Some(25);
        config.output.format = OutputFormat::Json;

        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[targets]
pct_protein = 35
carb_limit = 30

[output]
format = "csv"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.targets.pct_protein, 35);
        assert_eq!(config.targets.pct_carbs, 10); // default
        assert_eq!(config.targets.carb_limit, Some(30));
        assert_eq!(config.output.format, OutputFormat::Csv);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.targets.pct_carbs = 5;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.targets.pct_carbs, 5);
    }

    #[test]
    fn test_load_missing_explicit_path_is_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = Config::load_from(&temp_dir.path().join("missing.toml"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_malformed_config_is_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[targets]\npct_carbs = \"lots\"\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Toml(_))));
    }
}
