//! Configuration file support for fitlog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/fitlog/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub profile: ProfileConfig,

    #[serde(default)]
    pub estimator: EstimatorConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Identity used to own logged workouts
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_user")]
    pub user: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            user: default_user(),
        }
    }
}

/// Calorie estimator parameters
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EstimatorConfig {
    /// Body weight plugged into the MET formula
    #[serde(default = "default_assumed_body_weight_kg")]
    pub assumed_body_weight_kg: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            assumed_body_weight_kg: default_assumed_body_weight_kg(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| home_dir().join(".local/share"));
    base.join("fitlog")
}

fn default_user() -> String {
    "default".into()
}

fn default_assumed_body_weight_kg() -> f64 {
    70.0
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
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
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Reject values the estimator cannot work with
    pub fn validate(&self) -> Result<()> {
        let weight = self.estimator.assumed_body_weight_kg;
        if !weight.is_finite() || weight <= 0.0 {
            return Err(Error::Config(format!(
                "estimator.assumed_body_weight_kg must be positive, got {}",
                weight
            )));
        }
        if self.profile.user.trim().is_empty() {
            return Err(Error::Config("profile.user must not be empty".into()));
        }
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| home_dir().join(".config"));
        base.join("fitlog").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
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
        assert_eq!(config.estimator.assumed_body_weight_kg, 70.0);
        assert_eq!(config.profile.user, "default");
        assert!(config.data.data_dir.ends_with("fitlog"));
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.profile.user = "sam".into();
        config.estimator.assumed_body_weight_kg = 82.5;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.profile.user, "sam");
        assert_eq!(loaded.estimator, config.estimator);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[estimator]
assumed_body_weight_kg = 64.0
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.estimator.assumed_body_weight_kg, 64.0);
        assert_eq!(config.profile.user, "default"); // default
    }

    #[test]
    fn test_rejects_non_positive_body_weight() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[estimator]\nassumed_body_weight_kg = 0.0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
