//! Server configuration.
//!
//! Values come from an optional TOML file, then environment variables,
//! then command-line flags, each layer overriding the one before.

use std::path::Path;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    port: u16,

    /// SQLite database path (a `sqlite://` prefix is accepted).
    #[serde(default = "default_database_url")]
    database_url: String,

    /// Browser origins allowed by CORS.
    #[serde(default = "default_cors_origins")]
    cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_database_url() -> String {
    "tic_tac_toe.db".to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:4000".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: default_database_url(),
            cors_origins: default_cors_origins(),
        }
    }
}

/// Splits a comma-separated origin list, dropping blanks.
fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

impl ServerConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// File (if given) plus the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is unreadable or an environment
    /// value is malformed.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_env(|key| std::env::var(key).ok())
    }

    /// Applies `PORT`, `DATABASE_URL`, `TICTACTOE_DATABASE_URL` and
    /// `CORS_ORIGINS` as looked up by `lookup`.
    ///
    /// `DATABASE_URL` wins over `TICTACTOE_DATABASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `PORT` is not a valid port number.
    #[instrument(skip_all)]
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::new(format!("Invalid PORT: '{}'", port)))?;
        }
        if let Some(url) = lookup("DATABASE_URL").or_else(|| lookup("TICTACTOE_DATABASE_URL")) {
            self.database_url = url;
        }
        if let Some(origins) = lookup("CORS_ORIGINS") {
            self.cors_origins = split_origins(&origins);
        }
        debug!(config = ?self, "Environment applied");
        Ok(self)
    }

    /// Applies command-line overrides.
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        database_url: Option<String>,
    ) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(url) = database_url {
            self.database_url = url;
        }
        self
    }

    /// `host:port` for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
