//! Crate-wide error types.
//!
//! Per-candidate problems never surface here; the engine turns them into
//! skip reasons. These are the failures that end a command.

use std::time::Duration;

use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::selection::SelectionError;

/// Problems with the configuration file or its values.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures talking to an external item source.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The page loaded but lacked what the adapter scrapes for.
    #[error("{source_name} returned an incomplete page: {reason}")]
    Incomplete {
        source_name: &'static str,
        reason: String,
    },

    #[error("attempt timed out after {0:?}")]
    TimedOut(Duration),

    /// Every attempt of the retry budget failed.
    #[error("{what} unavailable after {attempts} attempts: {last_error}")]
    Exhausted {
        what: String,
        attempts: u32,
        last_error: String,
    },

    #[error("inventory for account {account} is private or does not exist")]
    AccountUnavailable { account: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// A response body that did not have the expected shape.
    #[error("unexpected response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// An interactive prompt was aborted or could not be shown.
    #[error("prompt failed: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Self::Prompt(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_errors_keep_their_message() {
        let err = Error::from(ConfigError::MissingField {
            field: "default_account",
        });
        assert_eq!(err.to_string(), "missing required field: default_account");

        let err = Error::from(LookupError::AccountUnavailable {
            account: "76561198000000000".into(),
        });
        assert!(err.to_string().contains("private"));
    }
}
