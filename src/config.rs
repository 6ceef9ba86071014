//! Configuration management for the tech-fit scoring tool

use crate::error::{Result, TechFitError};
use crate::processing::scoring::DEFAULT_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub artifacts: ArtifactConfig,
    pub scoring: ScoringConfig,
    pub training: TrainingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Directory holding the persisted vectorizer/classifier pair.
    pub artifacts_dir: PathBuf,
    pub model_file: String,
    pub vectorizer_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub default_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub min_df: usize,
    pub max_df: f64,
    pub max_features: usize,
    pub learning_rate: f64,
    pub epochs: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        let artifacts_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".tech-fit")
            .join("artifacts");

        Self {
            artifacts: ArtifactConfig {
                artifacts_dir,
                model_file: "model.json".to_string(),
                vectorizer_file: "tfidf.json".to_string(),
            },
            scoring: ScoringConfig {
                default_threshold: DEFAULT_THRESHOLD,
            },
            training: TrainingConfig {
                min_df: 2,
                max_df: 0.95,
                max_features: 50_000,
                learning_rate: 0.1,
                epochs: 300,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the given path, or from the default location, creating
    /// a default file there when none exists yet.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                TechFitError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else if path.is_some() {
            Err(TechFitError::Configuration(format!(
                "Config file not found: {}",
                config_path.display()
            )))
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            TechFitError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("tech-fit")
            .join("config.toml")
    }

    pub fn artifacts_dir(&self) -> &PathBuf {
        &self.artifacts.artifacts_dir
    }

    pub fn ensure_artifacts_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.artifacts.artifacts_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();

        assert_eq!(config.scoring.default_threshold, 0.6);
        assert_eq!(config.training.min_df, 2);
        assert_eq!(config.training.max_features, 50_000);
        assert_eq!(config.artifacts.model_file, "model.json");
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.training.epochs, config.training.epochs);
        assert_eq!(parsed.output.format, config.output.format);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let result = Config::load(Some(Path::new("/nonexistent/config.toml")));
        assert!(result.is_err());
    }
}
