//! Client configuration and paths
//!
//! Configuration is loaded from (in order of precedence, highest first):
//! 1. Command-line overrides (`--api-url`, `--theme`)
//! 2. Environment variables (prefixed with `COLLEGE_CONNECT_`)
//! 3. TOML config file at `<config dir>/college-connect/config.toml`
//! 4. Default values

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};
use crate::theme::Theme;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory name under the platform config dir.
const APP_DIR_NAME: &str = "college-connect";

/// Environment variable prefix.
const ENV_PREFIX: &str = "COLLEGE_CONNECT_";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend connection settings.
    pub api: ApiConfig,
    /// Presentation settings.
    pub ui: UiConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the REST backend, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Light or dark palette.
    pub theme: Theme,
    /// Size of the analytics top lists.
    pub top_n: u32,
    /// Maximum number of autocomplete suggestions.
    pub suggestion_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            top_n: 5,
            suggestion_limit: crate::autocomplete::DEFAULT_LIMIT,
        }
    }
}

impl Config {
    /// Load configuration from the default file location.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A missing file is not an error; defaults and the environment still apply.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        tracing::debug!("Loading configuration from {}", config_file.display());

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api.base_url).map_err(|e| Error::ConfigValidation {
            message: format!("api.base_url '{}' is not a valid URL: {e}", self.api.base_url),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::ConfigValidation {
                message: format!("api.base_url must use http or https, got '{}'", url.scheme()),
            });
        }

        if self.api.timeout_secs == 0 {
            return Err(Error::ConfigValidation {
                message: "api.timeout_secs must be greater than 0".to_string(),
            });
        }

        if self.ui.top_n == 0 {
            return Err(Error::ConfigValidation {
                message: "ui.top_n must be greater than 0".to_string(),
            });
        }

        if self.ui.suggestion_limit == 0 {
            return Err(Error::ConfigValidation {
                message: "ui.suggestion_limit must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Apply a base URL given on the command line and re-validate.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Result<Self> {
        if let Some(url) = base_url {
            self.api.base_url = url;
            self.validate()?;
        }
        Ok(self)
    }

    /// Base URL without a trailing slash, ready for path concatenation.
    pub fn base_url(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }

    /// Get the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}
