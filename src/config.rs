//! Configuration management for cvsense

use crate::error::{CvSenseError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub vocabulary: VocabularyConfig,
    pub matching: MatchingConfig,
    pub models: ModelConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyConfig {
    /// Path to a skills bank JSON file. `None` uses the built-in bank.
    pub path: Option<PathBuf>,
}

/// Tunable thresholds for the matching pipeline.
///
/// The fuzzy-rescue and semantic thresholds are configuration, not
/// constants: the defaults mirror the reference values (92 and 0.70)
/// but callers can tighten or loosen them per deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Minimum token-set similarity (0-100) for fuzzy rescue.
    pub fuzzy_rescue_threshold: f64,
    /// Largest n-gram window tested during fuzzy rescue.
    pub max_ngram: usize,
    /// Minimum cosine similarity for a JD phrase to count as covered.
    pub semantic_threshold: f32,
    /// How many keyphrases to extract per document for the semantic path.
    pub keyphrase_top_n: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub models_dir: PathBuf,
    pub embedding_model: String,
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
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".cvsense")
            .join("models");

        Self {
            vocabulary: VocabularyConfig { path: None },
            matching: MatchingConfig {
                fuzzy_rescue_threshold: 92.0,
                max_ngram: 3,
                semantic_threshold: 0.70,
                keyphrase_top_n: 25,
            },
            models: ModelConfig {
                models_dir,
                embedding_model: "minishlab/M2V_base_output".to_string(),
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
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| CvSenseError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
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

        let content = toml::to_string_pretty(self)
            .map_err(|e| CvSenseError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("cvsense")
            .join("config.toml")
    }

    pub fn embedding_model_path(&self) -> PathBuf {
        let local = self.models.models_dir.join(&self.models.embedding_model);
        if local.exists() {
            local
        } else {
            PathBuf::from(&self.models.embedding_model)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = Config::default();
        assert_eq!(config.matching.fuzzy_rescue_threshold, 92.0);
        assert_eq!(config.matching.semantic_threshold, 0.70);
        assert_eq!(config.matching.max_ngram, 3);
    }

    #[test]
    fn test_config_round_trip() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.matching.fuzzy_rescue_threshold, 92.0);
        assert_eq!(parsed.matching.keyphrase_top_n, 25);
    }
}
