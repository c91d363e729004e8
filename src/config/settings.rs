//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Inference model settings
    #[serde(default)]
    pub models: ModelSettings,

    /// Analysis tuning
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Hosted-inference endpoint base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API token for the endpoint (empty = anonymous)
    #[serde(default)]
    pub api_token: Option<String>,

    /// Summarization model id
    #[serde(default = "default_summarization_model")]
    pub summarization_model: String,

    /// Sentiment classification model id
    #[serde(default = "default_sentiment_model")]
    pub sentiment_model: String,

    /// Named-entity recognition model id
    #[serde(default = "default_ner_model")]
    pub ner_model: String,

    /// Smaller summarization model used when primary initialization fails
    #[serde(default = "default_fallback_summarization_model")]
    pub fallback_summarization_model: String,

    /// Smaller sentiment model used when primary initialization fails
    #[serde(default = "default_fallback_sentiment_model")]
    pub fallback_sentiment_model: String,

    /// Whether entity recognition is configured at all
    #[serde(default = "default_true")]
    pub enable_ner: bool,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Target summary length passed to the summarizer
    #[serde(default = "default_max_summary_length")]
    pub max_summary_length: usize,
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_endpoint() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_summarization_model() -> String {
    "facebook/bart-large-cnn".to_string()
}

fn default_sentiment_model() -> String {
    "cardiffnlp/twitter-roberta-base-sentiment-latest".to_string()
}

fn default_ner_model() -> String {
    "dbmdz/bert-large-cased-finetuned-conll03-english".to_string()
}

fn default_fallback_summarization_model() -> String {
    "facebook/bart-base".to_string()
}

fn default_fallback_sentiment_model() -> String {
    "distilbert-base-uncased-finetuned-sst-2-english".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    45
}

fn default_max_summary_length() -> usize {
    150
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_token: None,
            summarization_model: default_summarization_model(),
            sentiment_model: default_sentiment_model(),
            ner_model: default_ner_model(),
            fallback_summarization_model: default_fallback_summarization_model(),
            fallback_sentiment_model: default_fallback_sentiment_model(),
            enable_ner: true,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            max_summary_length: default_max_summary_length(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            general: GeneralSettings::default(),
            models: ModelSettings::default(),
            analysis: AnalysisSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::info!("No config file found, using defaults");
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        let unset = self
            .models
            .api_token
            .as_deref()
            .map(|t| t.trim().is_empty())
            .unwrap_or(true);

        if unset {
            if let Ok(token) = std::env::var("RECAP_HF_TOKEN") {
                if !token.trim().is_empty() {
                    self.models.api_token = Some(token);
                }
            }
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "recap", "recap")
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &PathBuf) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}
