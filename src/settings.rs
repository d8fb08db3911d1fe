//! Layered configuration.
//!
//! Sources are applied in order, later ones winning:
//!
//! 1. Built-in defaults (fallback origin, 2s interval, 10s timeout)
//! 2. An optional settings file (TOML, JSON, YAML, ... by extension)
//! 3. `STATUSBOARD_*` environment variables
//! 4. Command-line flags (applied by the binary via [`Settings::with_overrides`])

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

use crate::data::duration::parse_duration;
use crate::source::{ApiBase, Endpoint, EndpointError};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "STATUSBOARD";

/// Errors raised while loading or resolving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid {field} {value:?}: {reason}")]
    InvalidDuration {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("polling interval must be greater than zero")]
    ZeroInterval,

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error(transparent)]
    Endpoint(#[from] EndpointError),
}

/// Raw settings as read from defaults, file and environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Network origin the endpoints are relative to. Unset means fallback.
    #[serde(default)]
    pub origin: Option<String>,
    /// Polling period, e.g. "2000ms".
    pub interval: String,
    /// Per-request timeout, e.g. "10s".
    pub timeout: String,
    /// Path polled for the "Agents" panel.
    pub status_path: String,
    /// Path polled for the "Messages" panel.
    pub messages_path: String,
}

/// Settings with durations parsed and endpoints resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub base: ApiBase,
    pub status: Endpoint,
    pub messages: Endpoint,
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            origin: None,
            interval: "2000ms".to_string(),
            timeout: "10s".to_string(),
            status_path: "/status".to_string(),
            messages_path: "/messages".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    fn load_with_prefix(path: Option<&Path>, env_prefix: &str) -> Result<Self, ConfigError> {
        let defaults = Settings::default();

        let mut builder = Config::builder()
            .set_default("interval", defaults.interval)?
            .set_default("timeout", defaults.timeout)?
            .set_default("status_path", defaults.status_path)?
            .set_default("messages_path", defaults.messages_path)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let settings = builder
            .add_source(Environment::with_prefix(env_prefix))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    /// Apply command-line overrides on top of the loaded settings.
    pub fn with_overrides(
        mut self,
        origin: Option<String>,
        interval: Option<String>,
        timeout: Option<String>,
    ) -> Self {
        if origin.is_some() {
            self.origin = origin;
        }
        if let Some(interval) = interval {
            self.interval = interval;
        }
        if let Some(timeout) = timeout {
            self.timeout = timeout;
        }
        self
    }

    /// Parse durations and resolve both endpoints.
    pub fn resolve(&self) -> Result<ResolvedSettings, ConfigError> {
        let interval = parse_field("interval", &self.interval)?;
        if interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        let timeout = parse_field("timeout", &self.timeout)?;
        if timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        let base = ApiBase::from_origin(self.origin.as_deref())?;
        let status = Endpoint::resolve(&base, &self.status_path)?;
        let messages = Endpoint::resolve(&base, &self.messages_path)?;

        Ok(ResolvedSettings {
            base,
            status,
            messages,
            interval,
            timeout,
        })
    }
}

fn parse_field(field: &'static str, value: &str) -> Result<Duration, ConfigError> {
    parse_duration(value).map_err(|e| ConfigError::InvalidDuration {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
