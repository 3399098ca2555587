//! Configuration file loading for `clubctl`.
//!
//! Settings live in a TOML file (`club.toml` by default) with a `[rating]`
//! table for engine constants and a `[schedule]` table for generator
//! settings. Every key is optional.

use std::path::{Path, PathBuf};

use club_rating::RatingConfig;
use club_schedule::BOX_SIZE;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The rating constants are inconsistent.
    #[error("Invalid rating config: {0}")]
    InvalidRating(#[from] club_rating::ConfigError),
    /// Box leagues only run with boxes of four.
    #[error("Invalid schedule config: box_size must be 4, got {0}")]
    InvalidBoxSize(usize),
}

/// Schedule generator settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ScheduleSettings {
    /// Players per box in a box league. Only 4 is accepted.
    #[serde(default = "default_box_size")]
    pub box_size: usize,
}

fn default_box_size() -> usize {
    BOX_SIZE
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            box_size: default_box_size(),
        }
    }
}

/// Top-level `clubctl` configuration.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct ClubConfig {
    #[serde(default)]
    pub rating: RatingConfig,
    #[serde(default)]
    pub schedule: ScheduleSettings,
}

impl ClubConfig {
    /// Loads configuration from `path`.
    ///
    /// If the file does not exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be
    /// read, [`ConfigError::ParseError`] if it is not valid TOML, or
    /// [`ConfigError::InvalidRating`] if the rating constants are
    /// inconsistent, or [`ConfigError::InvalidBoxSize`] if `box_size` is not 4.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str::<Self>(&content)?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };
        config.rating.validate()?;
        if config.schedule.box_size != BOX_SIZE {
            return Err(ConfigError::InvalidBoxSize(config.schedule.box_size));
        }
        Ok(config)
    }

    /// Default configuration file location.
    pub fn default_path() -> PathBuf {
        PathBuf::from("club.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use club_rating::FormulaVersion;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[rating]
formula = "legacy"
k_factor = 0.2
default_rating = 3.5

[schedule]
box_size = 4
"#;

        let config: ClubConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.rating.formula, FormulaVersion::Legacy);
        assert_eq!(config.rating.k_factor, 0.2);
        assert_eq!(config.rating.default_rating, 3.5);
        assert_eq!(config.rating.max_rating, 8.0); // default
        assert_eq!(config.schedule.box_size, 4);
    }

    #[test]
    fn test_empty_config_defaults() {
        let config: ClubConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClubConfig::default());
        assert_eq!(config.schedule.box_size, 4);
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClubConfig::load(&dir.path().join("club.toml")).unwrap();
        assert_eq!(config, ClubConfig::default());
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("club.toml");
        std::fs::write(&path, "[rating]\nk_factor = 0.05\n").unwrap();

        let config = ClubConfig::load(&path).unwrap();
        assert_eq!(config.rating.k_factor, 0.05);
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("club.toml");
        std::fs::write(&path, "[rating\nk_factor = ").unwrap();

        assert!(matches!(
            ClubConfig::load(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_rejects_inconsistent_rating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("club.toml");
        std::fs::write(&path, "[rating]\nmin_rating = 9.0\n").unwrap();

        assert!(matches!(
            ClubConfig::load(&path),
            Err(ConfigError::InvalidRating(_))
        ));
    }

    #[test]
    fn test_load_rejects_box_size_other_than_four() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("club.toml");
        std::fs::write(&path, "[schedule]\nbox_size = 5\n").unwrap();

        assert!(matches!(
            ClubConfig::load(&path),
            Err(ConfigError::InvalidBoxSize(5))
        ));
    }

    #[test]
    fn test_config_path_returns_expected_path() {
        assert_eq!(ClubConfig::default_path(), PathBuf::from("club.toml"));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = ClubConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: ClubConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized, config);
    }
}
