//! Configuration management for the experience matcher

use crate::error::{MatcherError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Weights and thresholds of the five relevance signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub title_weight: f64,
    pub keyword_weight: f64,
    pub skill_weight: f64,
    pub industry_bonus: f64,
    pub recency_window_years: f64,
    pub title_reason_threshold: f64,
    pub recency_reason_threshold: f64,
    pub max_matched_terms: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub max_experiences: usize,
    pub suggestion_min_score: u8,
    pub max_suggestions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
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

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            title_weight: 25.0,
            keyword_weight: 30.0,
            skill_weight: 25.0,
            industry_bonus: 10.0,
            recency_window_years: 10.0,
            title_reason_threshold: 0.3,
            recency_reason_threshold: 5.0,
            max_matched_terms: 10,
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_experiences: 3,
            suggestion_min_score: 30,
            max_suggestions: 3,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Load the user configuration, writing the defaults on first use.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| MatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| MatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("experience-matcher")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let scoring = &self.scoring;
        let weights = [
            ("scoring.title_weight", scoring.title_weight),
            ("scoring.keyword_weight", scoring.keyword_weight),
            ("scoring.skill_weight", scoring.skill_weight),
            ("scoring.industry_bonus", scoring.industry_bonus),
            ("scoring.recency_window_years", scoring.recency_window_years),
        ];

        for (key, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(MatcherError::Configuration(format!(
                    "{} must be a non-negative number, got {}",
                    key, value
                )));
            }
        }

        if scoring.max_matched_terms == 0 {
            return Err(MatcherError::Configuration(
                "scoring.max_matched_terms must be at least 1".to_string(),
            ));
        }

        if self.selection.max_experiences == 0 {
            return Err(MatcherError::Configuration(
                "selection.max_experiences must be at least 1".to_string(),
            ));
        }

        if self.selection.suggestion_min_score > 100 {
            return Err(MatcherError::Configuration(
                "selection.suggestion_min_score must be between 0 and 100".to_string(),
            ));
        }

        Ok(())
    }
}
