//! Configuration management for rollcall
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::catalog::Catalog;
use crate::error::{Result, RollcallError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for rollcall
///
/// This structure holds everything the client needs: where the
/// student-records server lives, how the session token is persisted,
/// and which courses the school offers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Remote server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Session token persistence settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Course catalog offered for enrollment
    #[serde(default)]
    pub catalog: Catalog,
}

/// Remote server configuration
///
/// The same base URL serves both the `/auth` and `/api` route families.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the student-records server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for individual HTTP requests (seconds)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Session token persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Service name under which the durable token is stored in the
    /// OS keyring
    #[serde(default = "default_session_service")]
    pub service: String,
}

fn default_session_service() -> String {
    "rollcall".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            service: default_session_service(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default_config()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn default_config() -> Self {
        Self {
            server: ServerConfig::default(),
            session: SessionConfig::default(),
            catalog: Catalog::default(),
        }
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RollcallError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| RollcallError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("ROLLCALL_SERVER_URL") {
            tracing::debug!(base_url = %base_url, "Env override: ROLLCALL_SERVER_URL");
            self.server.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("ROLLCALL_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.server.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid ROLLCALL_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(service) = std::env::var("ROLLCALL_SESSION_SERVICE") {
            tracing::debug!(service = %service, "Env override: ROLLCALL_SESSION_SERVICE");
            self.session.service = service;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(server) = &cli.server {
            tracing::debug!(server = %server, "CLI override: --server");
            self.server.base_url = server.clone();
        }

        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
    }

    /// Validate the configuration
    ///
    /// Ensures all configuration values are within acceptable ranges
    /// and that required fields are properly set.
    ///
    /// # Returns
    ///
    /// Returns Ok if configuration is valid
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.server.base_url.is_empty() {
            return Err(
                RollcallError::Config("server.base_url cannot be empty".to_string()).into(),
            );
        }

        let parsed = url::Url::parse(&self.server.base_url).map_err(|e| {
            RollcallError::Config(format!("Invalid server.base_url: {}", e))
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(RollcallError::Config(format!(
                "Invalid server.base_url scheme: {}. Must be http or https",
                parsed.scheme()
            ))
            .into());
        }

        if self.server.timeout_seconds == 0 {
            return Err(RollcallError::Config(
                "server.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.server.timeout_seconds > 300 {
            return Err(RollcallError::Config(
                "server.timeout_seconds must be less than or equal to 300".to_string(),
            )
            .into());
        }

        if self.session.service.is_empty() {
            return Err(
                RollcallError::Config("session.service cannot be empty".to_string()).into(),
            );
        }

        self.catalog.validate()?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
