//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; every section is optional. The
//! `KITFAB_STEAM_ID` environment variable overrides `default_account`.
//!
//! # Example
//!
//! ```no_run
//! use kitfab::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("kitfab.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::logging::LoggingConfig;
use super::pricing::PricingConfig;
use super::retry::RetryConfig;
use crate::adapter::outbound::http::parse_base;
use crate::adapter::outbound::settings::{HttpConfig, SourcesConfig};
use crate::error::{ConfigError, Result};

/// Environment variable that overrides the configured account.
pub const ACCOUNT_ENV: &str = "KITFAB_STEAM_ID";

/// Default config file path.
pub const DEFAULT_CONFIG_PATH: &str = "kitfab.toml";

/// Batch analysis settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    /// Candidates analyzed at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

const fn default_concurrency() -> usize {
    1
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Steam account whose inventory is read when none is given.
    #[serde(default)]
    pub default_account: Option<String>,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// HTTP client timeouts.
    #[serde(default)]
    pub http: HttpConfig,

    /// Retry budget for every external lookup.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Part prices, key rate and fiat display.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Batch analysis settings.
    #[serde(default)]
    pub batch: BatchConfig,

    /// External source locations.
    #[serde(default)]
    pub sources: SourcesConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Some(account) = std::env::var(ACCOUNT_ENV)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
        {
            config.default_account = Some(account);
        }

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise use the defaults.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        self.retry.validate()?;
        self.pricing.validate()?;

        if self.batch.concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "concurrency",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.http.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.sources.item_type.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "item_type" }.into());
        }
        parse_base("steam_community_url", &self.sources.steam_community_url)?;
        parse_base("backpack_url", &self.sources.backpack_url)?;

        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();

        assert_eq!(config.batch.concurrency, 1);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.sources.app_id, 440);
        assert!(config.pricing.key_rate.is_none());
        assert_eq!(config.pricing.parts.len(), 10);
    }

    #[test]
    fn parses_all_sections() {
        let toml = r#"
            default_account = "76561198000000000"

            [logging]
            level = "debug"
            format = "json"

            [retry]
            max_attempts = 5
            identities = ["firefox"]

            [pricing]
            key_rate = 59.11
            fiat_symbol = "$"

            [pricing.parts."Battle-Worn Robot KB-808"]
            primary = 1.22
            fiat = 0.04

            [batch]
            concurrency = 4
        "#;

        let config = Config::parse_toml(toml).unwrap();

        assert_eq!(config.logging.format, "json");
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.pricing.key_rate.map(|r| r.to_string()), Some("59.11".into()));
        assert_eq!(config.pricing.fiat_symbol, "$");
        assert_eq!(config.pricing.parts.len(), 1);
        assert_eq!(config.batch.concurrency, 4);
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let result = Config::parse_toml("[batch]\nconcurrency = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn bad_source_url_is_rejected() {
        let result = Config::parse_toml("[sources]\nbackpack_url = \"not a url\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Config::parse_toml("[batch\n").unwrap_err();
        assert!(err.to_string().starts_with("failed to parse config"));
    }
}
