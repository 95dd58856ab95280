//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use rust_decimal::Decimal;

use crate::infrastructure::config::retry::RetryConfig;
use crate::infrastructure::config::settings::Config;

/// Default config with instant retries and the given fixed key rate.
///
/// `None` leaves the key rate to be fetched.
pub fn config(key_rate: Option<Decimal>) -> Config {
    let mut config = Config::default();
    config.retry = RetryConfig {
        max_attempts: 2,
        min_backoff_ms: 0,
        max_backoff_ms: 0,
        attempt_timeout_ms: 1_000,
        ..RetryConfig::default()
    };
    config.pricing.key_rate = key_rate;
    config
}
