// src/config.rs
//! Credentials and service settings.
//!
//! Credentials come from the environment (a `.env` file is honoured).
//! Everything else has a default and can be overridden by a YAML file,
//! `jobgenie.yaml` in the working directory or the path in `JOBGENIE_CONFIG`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::error::ConfigError;

pub const RAPIDAPI_KEY_VAR: &str = "RAPIDAPI_KEY";
pub const OPENROUTER_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const HF_TOKEN_VAR: &str = "HF_API_TOKEN";
pub const CONFIG_PATH_VAR: &str = "JOBGENIE_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "jobgenie.yaml";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: Credentials,
    pub settings: Settings,
}

/// API credentials supplied at startup
#[derive(Clone)]
pub struct Credentials {
    pub rapidapi_key: String,
    pub openrouter_key: String,
    pub hf_token: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("rapidapi_key", &"<redacted>")
            .field("openrouter_key", &"<redacted>")
            .field("hf_token", &self.hf_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub chat: ChatSettings,
    pub job_search: JobSearchSettings,
    pub summary: SummarySettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1".to_string(),
            model: "mistralai/mistral-7b-instruct".to_string(),
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JobSearchSettings {
    pub base_url: String,
    pub host: String,
    pub primary_country: String,
    pub secondary_country: String,
    pub timeout_secs: u64,
}

impl Default for JobSearchSettings {
    fn default() -> Self {
        Self {
            base_url: "https://jsearch.p.rapidapi.com".to_string(),
            host: "jsearch.p.rapidapi.com".to_string(),
            primary_country: "IN".to_string(),
            secondary_country: "US".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SummarySettings {
    pub url: String,
    pub max_length: u32,
    pub min_length: u32,
    /// Length of the verbatim excerpt used when summarization fails
    pub excerpt_chars: usize,
    pub timeout_secs: u64,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            url: "https://api-inference.huggingface.co/models/facebook/bart-large-cnn"
                .to_string(),
            max_length: 250,
            min_length: 50,
            excerpt_chars: 1200,
            timeout_secs: 120,
        }
    }
}

impl ChatSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl JobSearchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SummarySettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Settings {
    /// Read settings from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.summary.min_length > self.summary.max_length {
            return Err(ConfigError::Invalid(format!(
                "summary.min_length ({}) exceeds summary.max_length ({})",
                self.summary.min_length, self.summary.max_length
            )));
        }

        let timeouts = [
            ("chat.timeout_secs", self.chat.timeout_secs),
            ("job_search.timeout_secs", self.job_search.timeout_secs),
            ("summary.timeout_secs", self.summary.timeout_secs),
        ];
        if let Some((name, _)) = timeouts.iter().find(|(_, secs)| *secs == 0) {
            return Err(ConfigError::Invalid(format!("{} must be positive", name)));
        }

        if self.job_search.primary_country.trim().is_empty()
            || self.job_search.secondary_country.trim().is_empty()
        {
            return Err(ConfigError::Invalid(
                "job_search countries must not be empty".to_string(),
            ));
        }

        if self.chat.model.trim().is_empty() {
            return Err(ConfigError::Invalid("chat.model must not be empty".to_string()));
        }

        Ok(())
    }
}

impl Credentials {
    /// Resolve credentials through `lookup`, usually the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingRequired(name))
        };

        Ok(Self {
            rapidapi_key: required(RAPIDAPI_KEY_VAR)?,
            openrouter_key: required(OPENROUTER_KEY_VAR)?,
            hf_token: lookup(HF_TOKEN_VAR).filter(|v| !v.trim().is_empty()),
        })
    }
}

impl AppConfig {
    /// Load `.env`, the optional settings file and the credentials
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            info!("Loaded environment from {}", path.display());
        }

        let settings = match Self::settings_path() {
            Some(path) => {
                info!("Loading settings from {}", path.display());
                Settings::from_file(&path)?
            }
            None => Settings::default(),
        };
        settings.validate()?;

        let credentials = Credentials::from_lookup(|name| std::env::var(name).ok())?;

        Ok(Self {
            credentials,
            settings,
        })
    }

    fn settings_path() -> Option<PathBuf> {
        match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            }
        }
    }
}
