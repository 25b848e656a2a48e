//! # Tasklane Config
//!
//! YAML configuration for the server binary: listen address and the optional
//! intent oracle settings. Every field has a default so an absent file or an
//! empty document is a valid configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Full service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TasklaneConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub oracle: OracleSettings,
}

/// HTTP server section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

/// Intent oracle section. `enabled: true` without a key in the environment
/// still yields a grammar-only service; the oracle is best-effort by design.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

fn default_listen() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_api_key_env() -> String {
    "TASKLANE_API_KEY".to_string()
}

/// Load configuration from a YAML file.
pub fn load_config(path: &Path) -> Result<TasklaneConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(TasklaneConfig::default());
    }
    let config: TasklaneConfig = serde_yaml::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &TasklaneConfig) -> Result<(), ConfigError> {
    if config.server.listen.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "server.listen must not be empty".to_string(),
        ));
    }

    if config.oracle.enabled {
        if config.oracle.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "oracle.endpoint must not be empty".to_string(),
            ));
        }
        if config.oracle.model.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "oracle.model must not be empty".to_string(),
            ));
        }
        if config.oracle.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "oracle.timeout_secs must be > 0".to_string(),
            ));
        }
    }

    Ok(())
}
