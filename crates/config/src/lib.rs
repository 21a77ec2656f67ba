//! Configuration loading, validation, and management for daybook.
//!
//! Loads configuration from `~/.daybook/config.toml` with environment
//! variable overrides. Validates all settings at load time.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.daybook/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the model endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Default model
    #[serde(default = "default_model")]
    pub model: String,

    /// Default temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Default max tokens per model response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Name of the tracked subject (the day log's partition)
    #[serde(default = "default_subject")]
    pub subject: String,

    /// Record store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Reference guide configuration
    #[serde(default)]
    pub guide: GuideConfig,

    /// Orchestration configuration
    #[serde(default)]
    pub agent: AgentConfig,
}

fn default_api_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_model() -> String {
    "gpt-4o".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    1024
}
fn default_subject() -> String {
    "Baby".into()
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("subject", &self.subject)
            .field("store", &self.store)
            .field("guide", &self.guide)
            .field("agent", &self.agent)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend kind: "sqlite" or "in_memory"
    #[serde(default = "default_store_backend")]
    pub backend: String,

    /// SQLite database path; defaults to `~/.daybook/daybook.db`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

fn default_store_backend() -> String {
    "sqlite".into()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            path: None,
        }
    }
}

impl StoreConfig {
    /// Resolve the SQLite path, falling back to the config directory.
    pub fn sqlite_path(&self) -> PathBuf {
        self.path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| AppConfig::config_dir().join("daybook.db"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideConfig {
    /// Path to the extracted reference guide text;
    /// defaults to `~/.daybook/guide.md`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self { path: None }
    }
}

impl GuideConfig {
    pub fn guide_path(&self) -> PathBuf {
        self.path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| AppConfig::config_dir().join("guide.md"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum model rounds per user turn (cost/latency safety valve)
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
}

fn default_max_rounds() -> u32 {
    10
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_rounds: default_max_rounds(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.daybook/config.toml).
    ///
    /// Also checks environment variables:
    /// - `DAYBOOK_API_KEY` (highest priority), then `OPENAI_API_KEY`
    /// - `DAYBOOK_MODEL`
    /// - `DAYBOOK_SUBJECT`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if config.api_key.is_none() {
            config.api_key = std::env::var("DAYBOOK_API_KEY")
                .ok()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok());
        }

        if let Ok(model) = std::env::var("DAYBOOK_MODEL") {
            config.model = model;
        }

        if let Ok(subject) = std::env::var("DAYBOOK_SUBJECT") {
            config.subject = subject;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".daybook")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.temperature < 0.0 || self.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.agent.max_rounds == 0 {
            return Err(ConfigError::ValidationError(
                "agent.max_rounds must be at least 1".into(),
            ));
        }

        if self.store.backend != "sqlite" && self.store.backend != "in_memory" {
            return Err(ConfigError::ValidationError(format!(
                "unknown store backend '{}'",
                self.store.backend
            )));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a default config TOML string (for `onboard`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            subject: default_subject(),
            store: StoreConfig::default(),
            guide: GuideConfig::default(),
            agent: AgentConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.store.backend, "sqlite");
        assert_eq!(config.agent.max_rounds, 10);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.model, config.model);
        assert_eq!(parsed.subject, config.subject);
    }

    #[test]
    fn invalid_temperature_rejected() {
        let config = AppConfig {
            temperature: 5.0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_rounds_rejected() {
        let config = AppConfig {
            agent: AgentConfig { max_rounds: 0 },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_backend_rejected() {
        let config = AppConfig {
            store: StoreConfig {
                backend: "etcd".into(),
                path: None,
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().subject, "Baby");
    }

    #[test]
    fn parses_partial_config() {
        let toml_str = r#"
model = "gpt-4o-mini"
subject = "Aria"

[agent]
max_rounds = 5
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.subject, "Aria");
        assert_eq!(config.agent.max_rounds, 5);
        // Untouched sections fall back to defaults
        assert_eq!(config.store.backend, "sqlite");
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("gpt-4o"));
        assert!(toml_str.contains("sqlite"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = AppConfig {
            api_key: Some("sk-secret".into()),
            ..AppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
