//! backpack.tf classifieds adapter.
//!
//! Supplies buy orders for crafted kits and the key rate, both scraped from
//! item stats pages.

mod page;

use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use self::page::Section;
use crate::adapter::outbound::http::{join_segments, HttpFetcher};
use crate::domain::{price, MarketListing, NormalizedRecipe, Refined};
use crate::error::{LookupError, Result};
use crate::port::outbound::{ClientIdentity, KeyRateSource, MarketPriceSource};

const SOURCE: &str = "backpack.tf";

/// Stats page name of the key that sets the key rate.
pub const KEY_ITEM: &str = "Mann Co. Supply Crate Key";

/// Reads backpack.tf stats pages for unique, tradable, craftable items.
#[derive(Debug, Clone)]
pub struct BackpackClient {
    http: HttpFetcher,
    base_url: Url,
}

impl BackpackClient {
    pub fn new(http: HttpFetcher, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Stats page for a unique, tradable, craftable item.
    pub fn stats_url(&self, item: &str) -> Url {
        join_segments(
            &self.base_url,
            &["stats", "Unique", item, "Tradable", "Craftable"],
        )
    }

    async fn section(
        &self,
        item: &str,
        section: Section,
        identity: &ClientIdentity,
    ) -> Result<Vec<MarketListing>> {
        let url = self.stats_url(item);
        let body = self.http.get_text(&url, identity).await?;

        page::listings(&body, section).ok_or_else(|| {
            LookupError::Incomplete {
                source_name: SOURCE,
                reason: format!("no {} section on the {item} page", section.heading()),
            }
            .into()
        })
    }
}

#[async_trait]
impl MarketPriceSource for BackpackClient {
    async fn fetch_buy_orders(
        &self,
        recipe: &NormalizedRecipe,
        identity: &ClientIdentity,
    ) -> Result<Vec<MarketListing>> {
        let item = recipe.display_name();
        let listings = self.section(&item, Section::BuyOrders, identity).await?;
        debug!(item, listings = listings.len(), "Buy orders read");
        Ok(listings)
    }

    fn listing_url(&self, recipe: &NormalizedRecipe) -> String {
        self.stats_url(&recipe.display_name()).to_string()
    }
}

#[async_trait]
impl KeyRateSource for BackpackClient {
    async fn fetch_key_rate(&self, identity: &ClientIdentity) -> Result<Refined> {
        let listings = self.section(KEY_ITEM, Section::SellOrders, identity).await?;
        let rate = lowest_primary_offer(&listings).ok_or_else(|| LookupError::Incomplete {
            source_name: SOURCE,
            reason: "no ref-priced key sell orders".to_string(),
        })?;
        debug!(rate = %rate, "Key rate read");
        Ok(rate)
    }
}

/// Cheapest positive price among listings priced in ref alone.
fn lowest_primary_offer(listings: &[MarketListing]) -> Option<Refined> {
    listings
        .iter()
        .filter_map(|listing| match price::parse(&listing.price) {
            Ok(money) => money.primary_only(),
            Err(err) => {
                warn!(price = %listing.price, error = %err, "Skipping unreadable sell order");
                None
            }
        })
        .filter(|amount| amount.is_sign_positive() && !amount.is_zero())
        .min()
}
