//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../kitfab.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::hint(&format!("run `kitfab config validate -c {}`", path.display()));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = super::load_config(path)?;
    let key_rate = config
        .pricing
        .key_rate
        .map_or_else(|| "market".to_string(), |rate| format!("{rate:.2} ref"));

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "default_account": config.default_account,
            "key_rate": config.pricing.key_rate,
            "fallback_key_rate": config.pricing.fallback_key_rate,
            "fiat_per_primary": config.pricing.fiat_per_primary,
            "fiat_symbol": config.pricing.fiat_symbol,
            "parts": config.pricing.parts.len(),
            "concurrency": config.batch.concurrency,
            "max_attempts": config.retry.max_attempts,
            "identities": config.retry.identities,
            "steam_community_url": config.sources.steam_community_url,
            "backpack_url": config.sources.backpack_url,
            "app_id": config.sources.app_id,
            "item_type": config.sources.item_type,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Path", path.display());
    output::field(
        "Account",
        config.default_account.as_deref().unwrap_or("(prompt)"),
    );

    output::section("Pricing");
    output::field("Key rate", key_rate);
    output::field("Fallback", format!("{:.2} ref", config.pricing.fallback_key_rate));
    output::field(
        "Fiat per ref",
        format!("{}{}", config.pricing.fiat_symbol, config.pricing.fiat_per_primary),
    );
    output::field("Parts", config.pricing.parts.len());

    output::section("Lookups");
    output::field("Attempts", config.retry.max_attempts);
    output::field(
        "Backoff",
        format!("{}-{}ms", config.retry.min_backoff_ms, config.retry.max_backoff_ms),
    );
    output::field("Timeout", format!("{}ms", config.retry.attempt_timeout_ms));
    output::field("Identities", config.retry.identities.join(", "));
    output::field("Concurrency", config.batch.concurrency);

    output::section("Sources");
    output::field("Steam", &config.sources.steam_community_url);
    output::field("backpack.tf", &config.sources.backpack_url);
    output::field("App ID", config.sources.app_id);
    output::field("Item type", &config.sources.item_type);

    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    output::section("Config Validation");
    output::field("Path", path.display());
    let config = Config::load(path)?;
    output::success("Config file is valid");

    if config.default_account.is_none() {
        output::warning("No default_account set; analyze will prompt for a Steam ID");
    }
    if config.pricing.key_rate.is_none() {
        output::note("Key rate will be read from the market");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_is_a_valid_config() {
        assert!(Config::parse_toml(CONFIG_TEMPLATE).is_ok());
    }

    #[test]
    fn init_writes_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("kitfab.toml");

        execute_init(&path, false).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), CONFIG_TEMPLATE);
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kitfab.toml");
        fs::write(&path, "existing").unwrap();

        assert!(execute_init(&path, false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "existing");

        execute_init(&path, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), CONFIG_TEMPLATE);
    }

    #[test]
    fn validate_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(execute_validate(&dir.path().join("absent.toml")).is_err());
    }
}
