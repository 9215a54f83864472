//! Configuration management for the bizdash dashboard

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix, e.g. `BIZDASH__API__BASE_URL`
pub const ENV_PREFIX: &str = "BIZDASH";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Remote API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Credential handling
    #[serde(default)]
    pub auth: AuthConfig,

    /// View behaviour
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin of the REST API; relative media paths resolve against it too
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

/// Credential configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// File the bearer token is persisted to between runs
    #[serde(default)]
    pub token_file: Option<PathBuf>,

    /// Where the route guard sends unauthenticated navigation
    #[serde(default = "default_sign_in_path")]
    pub sign_in_path: String,
}

/// How a view reconciles its collection after a successful per-item action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AfterActionPolicy {
    /// Remove or replace the affected entry in place
    #[default]
    Patch,
    /// Re-read the whole collection
    Refetch,
}

/// View behaviour configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Reconciliation after delete and status actions
    #[serde(default)]
    pub after_action: AfterActionPolicy,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or text)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:4000".to_string()
}

const fn default_request_timeout() -> u64 {
    30
}

const fn default_connect_timeout() -> u64 {
    5
}

fn default_sign_in_path() -> String {
    "/auth/sign-in".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_file: None,
            sign_in_path: default_sign_in_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from an optional file and the environment
    ///
    /// Without an explicit path a `bizdash.toml` in the working directory is
    /// used when present. Environment variables override file values.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, parsed or validated.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("bizdash").required(false),
        };

        let config: Self = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending field.
    pub fn validate(&self) -> crate::Result<()> {
        let base = self.api.base_url.trim();
        let rest = base
            .strip_prefix("http://")
            .or_else(|| base.strip_prefix("https://"))
            .ok_or_else(|| crate::Error::validation("api.base_url", "must use http or https"))?;
        if rest.trim_end_matches('/').is_empty() {
            return Err(crate::Error::validation("api.base_url", "missing host"));
        }

        if self.api.request_timeout_secs == 0 {
            return Err(crate::Error::validation(
                "api.request_timeout_secs",
                "must be greater than zero",
            ));
        }
        if self.api.connect_timeout_secs == 0 {
            return Err(crate::Error::validation(
                "api.connect_timeout_secs",
                "must be greater than zero",
            ));
        }

        if !self.auth.sign_in_path.starts_with('/') {
            return Err(crate::Error::validation(
                "auth.sign_in_path",
                "must be an absolute path",
            ));
        }

        if !matches!(self.logging.format.as_str(), "json" | "text") {
            return Err(crate::Error::validation(
                "logging.format",
                format!("unknown format '{}'", self.logging.format),
            ));
        }

        Ok(())
    }
}
