//! Price resolution against the run's key rate.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::rate::KeyRateCache;
use crate::domain::{price, KeyRate, MarketListing, Money, PriceParseError, Refined};

/// A price expression valued in ref.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// The price as quoted.
    pub price: Money,
    /// The price in ref.
    pub primary: Refined,
    /// The rate used, when the quote involved keys.
    pub key_rate: Option<KeyRate>,
}

/// Parses price expressions, resolving the key rate only when a quote
/// actually contains keys.
#[derive(Debug, Clone)]
pub struct PriceResolver {
    rates: Arc<KeyRateCache>,
}

impl PriceResolver {
    pub fn new(rates: Arc<KeyRateCache>) -> Self {
        Self { rates }
    }

    /// Value `expr` in ref.
    ///
    /// A key amount too large to fold into ref is an invalid expression.
    pub async fn resolve(&self, expr: &str) -> Result<Quote, PriceParseError> {
        let money = price::parse(expr)?;
        let quote = match money.primary_only() {
            Some(primary) => Quote {
                price: money,
                primary,
                key_rate: None,
            },
            None => {
                let rate = self.rates.get().await;
                let primary = money.in_primary(rate).ok_or_else(|| PriceParseError::Invalid {
                    expr: expr.to_string(),
                })?;
                Quote {
                    price: money,
                    primary,
                    key_rate: Some(rate),
                }
            }
        };
        Ok(quote)
    }
}

/// Picks the best buy order from a set of listings.
#[derive(Debug, Clone)]
pub struct MarketQuoter {
    resolver: PriceResolver,
}

impl MarketQuoter {
    pub fn new(resolver: PriceResolver) -> Self {
        Self { resolver }
    }

    /// Highest-valued clean listing with a positive price.
    ///
    /// Contaminated listings are ignored; unparseable or out-of-range prices
    /// are logged and count as zero.
    pub async fn best_offer(&self, listings: &[MarketListing]) -> Option<Quote> {
        let mut best: Option<Quote> = None;

        for listing in listings {
            if listing.is_contaminated() {
                debug!(price = %listing.price, markers = ?listing.markers, "Ignoring contaminated listing");
                continue;
            }

            let quote = match self.resolver.resolve(&listing.price).await {
                Ok(quote) => quote,
                Err(err) => {
                    warn!(error = %err, "Treating unparseable listing price as zero");
                    continue;
                }
            };

            if quote.primary <= Decimal::ZERO {
                continue;
            }
            if best.map_or(true, |current| quote.primary > current.primary) {
                best = Some(quote);
            }
        }

        best
    }
}
