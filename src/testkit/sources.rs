//! In-memory implementations of the outbound ports.
//!
//! Each fake counts its calls so tests can assert how often a lookup ran.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{MarketListing, NormalizedRecipe, RecipeInputs, Refined};
use crate::error::{LookupError, Result};
use crate::infrastructure::bootstrap::Sources;
use crate::port::outbound::{
    ClientIdentity, InventorySource, KeyRateSource, MarketPriceSource, RecipeInputsSource,
};

fn incomplete(reason: impl Into<String>) -> crate::error::Error {
    LookupError::Incomplete {
        source_name: "testkit",
        reason: reason.into(),
    }
    .into()
}

/// Fixed inventory; `private` makes every lookup fail.
#[derive(Debug, Default)]
pub struct StaticInventory {
    items: Vec<String>,
    private: bool,
    calls: AtomicUsize,
}

impl StaticInventory {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn private() -> Self {
        Self {
            private: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InventorySource for StaticInventory {
    async fn list_items(&self, account: &str, _app_id: u32, _item_type: &str) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.private {
            return Err(LookupError::AccountUnavailable {
                account: account.to_string(),
            }
            .into());
        }
        Ok(self.items.clone())
    }
}

/// Recipe inputs keyed by kit display name.
#[derive(Debug, Default)]
pub struct StaticRecipes {
    inputs: HashMap<String, RecipeInputs>,
    failures_left: AtomicUsize,
    calls: AtomicUsize,
}

impl StaticRecipes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `inputs` for the kit named `display_name`.
    pub fn with(mut self, display_name: impl Into<String>, inputs: RecipeInputs) -> Self {
        self.inputs.insert(display_name.into(), inputs);
        self
    }

    /// Fail the first `count` lookups regardless of name.
    pub fn failing_first(self, count: usize) -> Self {
        self.failures_left.store(count, Ordering::SeqCst);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecipeInputsSource for StaticRecipes {
    async fn fetch_inputs(
        &self,
        recipe: &NormalizedRecipe,
        _identity: &ClientIdentity,
    ) -> Result<RecipeInputs> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if failing {
            return Err(incomplete("listing page throttled"));
        }

        let name = recipe.display_name();
        self.inputs
            .get(&name)
            .cloned()
            .ok_or_else(|| incomplete(format!("no inputs for {name}")))
    }
}

/// Buy orders keyed by kit display name.
#[derive(Debug, Default)]
pub struct StaticMarket {
    listings: HashMap<String, Vec<MarketListing>>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StaticMarket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `listings` for the kit named `display_name`.
    pub fn with(mut self, display_name: impl Into<String>, listings: Vec<MarketListing>) -> Self {
        self.listings.insert(display_name.into(), listings);
        self
    }

    /// Sleep before answering each lookup.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketPriceSource for StaticMarket {
    async fn fetch_buy_orders(
        &self,
        recipe: &NormalizedRecipe,
        _identity: &ClientIdentity,
    ) -> Result<Vec<MarketListing>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let name = recipe.display_name();
        self.listings
            .get(&name)
            .cloned()
            .ok_or_else(|| incomplete(format!("no listings for {name}")))
    }

    fn listing_url(&self, recipe: &NormalizedRecipe) -> String {
        format!("https://market.test/{}", recipe.display_name())
    }
}

/// Key-rate source that counts lookups; `None` fails every lookup.
#[derive(Debug, Default)]
pub struct CountingKeyRate {
    rate: Option<Decimal>,
    calls: AtomicUsize,
}

impl CountingKeyRate {
    pub fn new(rate: Decimal) -> Self {
        Self {
            rate: Some(rate),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyRateSource for CountingKeyRate {
    async fn fetch_key_rate(&self, _identity: &ClientIdentity) -> Result<Refined> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.rate.ok_or_else(|| incomplete("no key sell orders"))
    }
}

/// Handles to the fakes behind a [`Sources`] bundle.
pub struct Fakes {
    pub inventory: Arc<StaticInventory>,
    pub recipes: Arc<StaticRecipes>,
    pub market: Arc<StaticMarket>,
    pub key_rate: Arc<CountingKeyRate>,
}

impl Fakes {
    pub fn new(
        inventory: StaticInventory,
        recipes: StaticRecipes,
        market: StaticMarket,
        key_rate: CountingKeyRate,
    ) -> Self {
        Self {
            inventory: Arc::new(inventory),
            recipes: Arc::new(recipes),
            market: Arc::new(market),
            key_rate: Arc::new(key_rate),
        }
    }

    /// Port bundle backed by these fakes.
    pub fn sources(&self) -> Sources {
        Sources {
            inventory: self.inventory.clone(),
            recipes: self.recipes.clone(),
            market: self.market.clone(),
            key_rate: self.key_rate.clone(),
        }
    }
}
