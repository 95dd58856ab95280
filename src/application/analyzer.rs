//! Per-fabricator profitability analysis.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};

use super::quote::MarketQuoter;
use super::retry::RetryPolicy;
use crate::domain::analysis::roi;
use crate::domain::money::to_fiat;
use crate::domain::{
    compute_cost, normalize, AnalysisResult, Money, Outcome, PriceTable, SkipReason, Skipped,
};
use crate::port::outbound::{MarketPriceSource, RecipeInputsSource};

/// Compares a fabricator's crafting cost with the best buy order for its kit.
pub struct ArbitrageEngine {
    recipes: Arc<dyn RecipeInputsSource>,
    market: Arc<dyn MarketPriceSource>,
    table: Arc<PriceTable>,
    quoter: MarketQuoter,
    retry: RetryPolicy,
    fiat_per_primary: Decimal,
}

impl ArbitrageEngine {
    pub fn new(
        recipes: Arc<dyn RecipeInputsSource>,
        market: Arc<dyn MarketPriceSource>,
        table: Arc<PriceTable>,
        quoter: MarketQuoter,
        retry: RetryPolicy,
        fiat_per_primary: Decimal,
    ) -> Self {
        Self {
            recipes,
            market,
            table,
            quoter,
            retry,
            fiat_per_primary,
        }
    }

    /// Analyze one candidate display name.
    ///
    /// Never fails: every problem becomes an [`Outcome::Skipped`] with the
    /// reason, so a batch can carry on with the next candidate.
    pub async fn analyze(&self, candidate: &str) -> Outcome {
        let recipe = match normalize(candidate) {
            Ok(recipe) => recipe,
            Err(err) => {
                warn!(candidate, error = %err, "Skipping candidate");
                return skip(candidate, SkipReason::UnrecognizedName);
            }
        };
        info!(candidate, recipe = %recipe, "Analyzing fabricator");

        let recipes = &self.recipes;
        let inputs = self
            .retry
            .run("fabricator inputs", |identity| {
                let recipe = &recipe;
                async move { recipes.fetch_inputs(recipe, &identity).await }
            })
            .await;
        let inputs = match inputs {
            Ok(inputs) => inputs,
            Err(err) => {
                warn!(candidate, error = %err, "Skipping candidate");
                return skip(candidate, SkipReason::InputsUnavailable);
            }
        };

        let breakdown = compute_cost(&inputs, &self.table);
        let cost = breakdown.total_primary();

        let market = &self.market;
        let listings = self
            .retry
            .run("buy orders", |identity| {
                let recipe = &recipe;
                async move { market.fetch_buy_orders(recipe, &identity).await }
            })
            .await;
        let listings = match listings {
            Ok(listings) => listings,
            Err(err) => {
                warn!(candidate, error = %err, "Skipping candidate");
                return skip(candidate, SkipReason::MarketUnavailable);
            }
        };

        let Some(quote) = self.quoter.best_offer(&listings).await else {
            warn!(candidate, listings = listings.len(), "No qualifying buy orders");
            return skip(candidate, SkipReason::NoMarketPrice);
        };

        let amounts = quote.primary.checked_sub(cost).and_then(|profit| {
            to_fiat(profit, self.fiat_per_primary).map(|profit_fiat| (profit, profit_fiat))
        });
        let Some((profit, profit_fiat)) = amounts else {
            warn!(candidate, best_offer = %quote.primary, cost = %cost, "Profit out of range");
            return skip(candidate, SkipReason::NoMarketPrice);
        };

        let result = AnalysisResult {
            candidate: candidate.to_string(),
            reference_url: self.market.listing_url(&recipe),
            recipe,
            cost: Money::primary(cost),
            cost_fiat: breakdown.total_fiat,
            breakdown,
            market_price: quote.price,
            market_price_primary: quote.primary,
            key_rate: quote.key_rate,
            profit,
            profit_fiat,
            roi: roi(profit, cost),
        };

        info!(
            candidate,
            cost = %cost,
            best_offer = %quote.primary,
            profit = %profit,
            roi = ?result.roi,
            "Fabricator analyzed"
        );
        Outcome::Analyzed(Box::new(result))
    }
}

fn skip(candidate: &str, reason: SkipReason) -> Outcome {
    Outcome::Skipped(Skipped::new(candidate, reason))
}
