//! Part prices, key rate and fiat display settings.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::domain::{KeyRate, PartPrice, PriceTable};
use crate::error::{ConfigError, Result};

/// Pricing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    /// Fixed key rate in ref. When unset the rate is read from the market.
    #[serde(default)]
    pub key_rate: Option<Decimal>,
    /// Key rate used when the market read fails.
    #[serde(default = "default_fallback_key_rate")]
    pub fallback_key_rate: Decimal,
    /// Display currency per ref.
    #[serde(default = "default_fiat_per_primary")]
    pub fiat_per_primary: Decimal,
    /// Display currency symbol.
    #[serde(default = "default_fiat_symbol")]
    pub fiat_symbol: String,
    /// Crafting part prices by item name. Replaces the built-in table when set.
    #[serde(default = "default_parts")]
    pub parts: BTreeMap<String, PartPrice>,
}

fn default_fallback_key_rate() -> Decimal {
    KeyRate::DEFAULT_FALLBACK.value()
}

fn default_fiat_per_primary() -> Decimal {
    dec!(0.03)
}

fn default_fiat_symbol() -> String {
    "£".into()
}

fn default_parts() -> BTreeMap<String, PartPrice> {
    [
        ("Unique Killstreak Item", dec!(15.00), dec!(0.35)),
        ("Unique Specialized Killstreak Item", dec!(33.00), dec!(0.84)),
        ("Battle-Worn Robot Money Furnace", dec!(1.11), dec!(0.03)),
        ("Battle-Worn Robot Taunt Processor", dec!(1.11), dec!(0.03)),
        ("Battle-Worn Robot KB-808", dec!(1.11), dec!(0.03)),
        ("Reinforced Robot Humor Suppression Pump", dec!(0.11), dec!(0.02)),
        ("Reinforced Robot Emotion Detector", dec!(0.11), dec!(0.02)),
        ("Reinforced Robot Bomb Stabilizer", dec!(0.11), dec!(0.02)),
        ("Pristine Robot Currency Digester", dec!(2.55), dec!(0.09)),
        ("Pristine Robot Brainstorm Bulb", dec!(2.55), dec!(0.09)),
    ]
    .into_iter()
    .map(|(name, primary, fiat)| (name.to_string(), PartPrice::new(primary, fiat)))
    .collect()
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            key_rate: None,
            fallback_key_rate: default_fallback_key_rate(),
            fiat_per_primary: default_fiat_per_primary(),
            fiat_symbol: default_fiat_symbol(),
            parts: default_parts(),
        }
    }
}

impl PricingConfig {
    #[allow(clippy::result_large_err)]
    pub(crate) fn validate(&self) -> Result<()> {
        self.fixed_key_rate()?;
        self.fallback()?;
        if self.fiat_per_primary < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "fiat_per_primary",
                reason: "must be 0 or greater".to_string(),
            }
            .into());
        }
        if let Some((name, _)) = self
            .parts
            .iter()
            .find(|(_, price)| price.primary < Decimal::ZERO || price.fiat < Decimal::ZERO)
        {
            return Err(ConfigError::InvalidValue {
                field: "parts",
                reason: format!("price for {name:?} must be 0 or greater"),
            }
            .into());
        }
        Ok(())
    }

    /// The configured fixed key rate, if any.
    #[allow(clippy::result_large_err)]
    pub fn fixed_key_rate(&self) -> Result<Option<KeyRate>> {
        self.key_rate
            .map(|rate| {
                KeyRate::try_new(rate).map_err(|err| {
                    ConfigError::InvalidValue {
                        field: "key_rate",
                        reason: err.to_string(),
                    }
                    .into()
                })
            })
            .transpose()
    }

    /// Key rate used when the market read fails.
    #[allow(clippy::result_large_err)]
    pub fn fallback(&self) -> Result<KeyRate> {
        KeyRate::try_new(self.fallback_key_rate).map_err(|err| {
            ConfigError::InvalidValue {
                field: "fallback_key_rate",
                reason: err.to_string(),
            }
            .into()
        })
    }

    /// Lookup table for costing recipes.
    #[must_use]
    pub fn price_table(&self) -> PriceTable {
        PriceTable::new(
            self.parts
                .iter()
                .map(|(name, price)| (name.clone(), *price)),
        )
    }
}
