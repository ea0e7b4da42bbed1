//! Configuration management for Taskdeck
//!
//! Handles loading, parsing, validating, and merging configuration from a
//! YAML file, environment variables, and CLI overrides.

use crate::error::{Result, TaskdeckError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Taskdeck.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Remote service settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Profile storage settings
    #[serde(default)]
    pub profile: ProfileConfig,
}

/// Remote service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Taskdeck service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Client-wide request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Profile storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfileConfig {
    /// Explicit profile file path; defaults to the platform data directory
    #[serde(default)]
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from file with environment and CLI overrides.
    ///
    /// A missing file is not an error; defaults are used and a warning is
    /// logged. Precedence, lowest to highest: file, environment, CLI.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TaskdeckError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| TaskdeckError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("TASKDECK_API_URL") {
            self.api.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("TASKDECK_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.api.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid TASKDECK_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(profile) = std::env::var("TASKDECK_PROFILE") {
            self.profile.path = Some(profile);
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(api_url) = &cli.api_url {
            self.api.base_url = api_url.clone();
        }

        if let Some(profile) = &cli.profile {
            self.profile.path = Some(profile.clone());
        }
    }

    /// Validate the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TaskdeckError::Config`] when a value is unusable.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.is_empty() {
            return Err(TaskdeckError::Config("api.base_url must not be empty".into()).into());
        }

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(TaskdeckError::Config(format!(
                "api.base_url must start with http:// or https://, got '{}'",
                self.api.base_url
            ))
            .into());
        }

        if self.api.timeout_seconds == 0 {
            return Err(
                TaskdeckError::Config("api.timeout_seconds must be greater than 0".into()).into(),
            );
        }

        Ok(())
    }
}
