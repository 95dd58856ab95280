//! Market price ports.

use async_trait::async_trait;

use super::identity::ClientIdentity;
use crate::domain::{MarketListing, NormalizedRecipe, Refined};
use crate::error::Result;

/// Classifieds source for the crafted kit.
#[async_trait]
pub trait MarketPriceSource: Send + Sync {
    /// Current buy orders for the kit `recipe` produces.
    ///
    /// An empty list means the page loaded and nobody is buying; a page that
    /// could not be read is an error.
    async fn fetch_buy_orders(
        &self,
        recipe: &NormalizedRecipe,
        identity: &ClientIdentity,
    ) -> Result<Vec<MarketListing>>;

    /// Stable link to the kit's market page.
    fn listing_url(&self, recipe: &NormalizedRecipe) -> String;
}

/// Source for the key-to-ref conversion rate.
#[async_trait]
pub trait KeyRateSource: Send + Sync {
    /// Current value of one key in ref.
    async fn fetch_key_rate(&self, identity: &ClientIdentity) -> Result<Refined>;
}
