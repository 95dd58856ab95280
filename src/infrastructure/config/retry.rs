//! Retry budget configuration for external lookups.

use std::time::Duration;

use serde::Deserialize;

use crate::application::RetryPolicy;
use crate::error::{ConfigError, Error, Result};
use crate::port::outbound::ClientIdentity;

/// Retry settings shared by every source.
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Attempts per lookup, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Lower bound of the pause between attempts (milliseconds).
    #[serde(default = "default_min_backoff_ms")]
    pub min_backoff_ms: u64,
    /// Upper bound of the pause between attempts (milliseconds).
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
    /// Time limit for a single attempt (milliseconds).
    #[serde(default = "default_attempt_timeout_ms")]
    pub attempt_timeout_ms: u64,
    /// Client identities to rotate through, by built-in profile name.
    #[serde(default = "default_identities")]
    pub identities: Vec<String>,
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_min_backoff_ms() -> u64 {
    1_000
}

const fn default_max_backoff_ms() -> u64 {
    3_000
}

const fn default_attempt_timeout_ms() -> u64 {
    30_000
}

fn default_identities() -> Vec<String> {
    vec!["chrome".into(), "firefox".into(), "safari".into()]
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            min_backoff_ms: default_min_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            attempt_timeout_ms: default_attempt_timeout_ms(),
            identities: default_identities(),
        }
    }
}

impl RetryConfig {
    #[allow(clippy::result_large_err)]
    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_attempts",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.max_backoff_ms < self.min_backoff_ms {
            return Err(ConfigError::InvalidValue {
                field: "max_backoff_ms",
                reason: "must be >= min_backoff_ms".to_string(),
            }
            .into());
        }
        if self.attempt_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "attempt_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.identities.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "identities",
                reason: "at least one identity is required".to_string(),
            }
            .into());
        }
        self.client_identities().map(|_| ())
    }

    /// Resolve the configured identity names.
    #[allow(clippy::result_large_err)]
    pub fn client_identities(&self) -> Result<Vec<ClientIdentity>> {
        self.identities
            .iter()
            .map(|name| {
                ClientIdentity::builtin(name).ok_or_else(|| {
                    Error::from(ConfigError::InvalidValue {
                        field: "identities",
                        reason: format!("unknown identity {name:?} (expected chrome, firefox or safari)"),
                    })
                })
            })
            .collect()
    }

    /// Build the runtime policy.
    #[allow(clippy::result_large_err)]
    pub fn policy(&self) -> Result<RetryPolicy> {
        Ok(RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.min_backoff_ms),
            Duration::from_millis(self.max_backoff_ms),
            Duration::from_millis(self.attempt_timeout_ms),
            self.client_identities()?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_rotates_three_identities() {
        let policy = RetryConfig::default().policy().unwrap();

        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.identity_for(1).name(), "chrome");
        assert_eq!(policy.identity_for(2).name(), "firefox");
        assert_eq!(policy.identity_for(3).name(), "safari");
    }

    #[test]
    fn unknown_identity_is_rejected() {
        let config = RetryConfig {
            identities: vec!["netscape".into()],
            ..RetryConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_backoff_window_is_rejected() {
        let config = RetryConfig {
            min_backoff_ms: 5_000,
            max_backoff_ms: 1_000,
            ..RetryConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
