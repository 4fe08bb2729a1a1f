//! Client configuration loaded via OrthoConfig.
//!
//! Values come from `EVENT_BOARD_*` environment variables (and any
//! configuration file OrthoConfig discovers). Command-line flags are applied
//! on top by the binary.

use std::ffi::OsString;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RELOAD_DELAY_MS: u64 = 5_000;

/// Errors raised while resolving client settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// OrthoConfig could not load or merge the settings.
    #[error("failed to load settings: {message}")]
    Load {
        /// Loader error text.
        message: String,
    },
    /// The base URL does not parse.
    #[error("invalid store base URL {value:?}: {message}")]
    InvalidBaseUrl {
        /// The configured value.
        value: String,
        /// Parser error text.
        message: String,
    },
    /// The base URL parses but is not HTTP.
    #[error("store base URL {value:?} must use http or https")]
    UnsupportedScheme {
        /// The configured value.
        value: String,
    },
}

/// Settings controlling how the client reaches the event store.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EVENT_BOARD")]
pub struct ClientSettings {
    /// Root URL of the JSON store.
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Delay before the detail screen reloads after a save, in milliseconds.
    pub reload_delay_ms: Option<u64>,
    /// Emit logs as JSON lines instead of human-readable text.
    #[ortho_config(default = false)]
    pub log_json: bool,
}

impl ClientSettings {
    /// Load settings from the environment only.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when a value cannot be parsed.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        Self::load_from_iter([OsString::from("event-board")]).map_err(|error| ConfigError::Load {
            message: error.to_string(),
        })
    }

    /// Replace the base URL, typically from a command-line flag.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if base_url.is_some() {
            self.base_url = base_url;
        }
        self
    }

    /// Parsed store base URL, falling back to the local development store.
    ///
    /// # Errors
    ///
    /// Returns an error for unparsable URLs and for schemes other than
    /// `http` and `https`.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let value = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL).trim();
        let url = Url::parse(value).map_err(|error| ConfigError::InvalidBaseUrl {
            value: value.to_owned(),
            message: error.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(ConfigError::UnsupportedScheme {
                value: value.to_owned(),
            }),
        }
    }

    /// Request timeout; zero is raised to one second.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS).max(1))
    }

    /// Wait between a successful save and the detail reload.
    pub fn reload_delay(&self) -> Duration {
        Duration::from_millis(self.reload_delay_ms.unwrap_or(DEFAULT_RELOAD_DELAY_MS))
    }
}
