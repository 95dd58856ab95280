//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::http::{parse_base, HttpFetcher};
use crate::adapter::outbound::{BackpackClient, SteamInventory, SteamListings};
use crate::application::{
    ArbitrageEngine, BatchRanker, KeyRateCache, MarketQuoter, PriceResolver, RetryPolicy,
};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::{
    InventorySource, KeyRateSource, MarketPriceSource, RecipeInputsSource,
};

/// Outbound adapters the analysis runs against.
pub struct Sources {
    pub inventory: Arc<dyn InventorySource>,
    pub recipes: Arc<dyn RecipeInputsSource>,
    pub market: Arc<dyn MarketPriceSource>,
    pub key_rate: Arc<dyn KeyRateSource>,
}

impl Sources {
    /// Live Steam and backpack.tf adapters.
    #[allow(clippy::result_large_err)]
    pub fn live(config: &Config) -> Result<Self> {
        let http = HttpFetcher::from_config(&config.http);
        let steam = parse_base("steam_community_url", &config.sources.steam_community_url)?;
        let backpack_url = parse_base("backpack_url", &config.sources.backpack_url)?;
        let retry = config.retry.policy()?;

        let backpack = Arc::new(BackpackClient::new(http.clone(), backpack_url));
        Ok(Self {
            inventory: Arc::new(SteamInventory::new(
                http.clone(),
                steam.clone(),
                retry.identity_for(1).clone(),
            )),
            recipes: Arc::new(SteamListings::new(http, steam, config.sources.app_id)),
            market: backpack.clone(),
            key_rate: backpack,
        })
    }
}

/// Build the key-rate cache: the fixed rate when configured, otherwise a
/// market read with the configured fallback.
#[allow(clippy::result_large_err)]
pub fn build_key_rates(
    config: &Config,
    source: Arc<dyn KeyRateSource>,
    retry: RetryPolicy,
) -> Result<Arc<KeyRateCache>> {
    let cache = match config.pricing.fixed_key_rate()? {
        Some(rate) => {
            info!(rate = %rate, "Using fixed key rate");
            KeyRateCache::fixed(rate)
        }
        None => KeyRateCache::fetched(source, retry, config.pricing.fallback()?),
    };
    Ok(Arc::new(cache))
}

/// Wire the engine over `sources`.
#[allow(clippy::result_large_err)]
pub fn build_engine(config: &Config, sources: &Sources) -> Result<Arc<ArbitrageEngine>> {
    let retry = config.retry.policy()?;
    let rates = build_key_rates(config, Arc::clone(&sources.key_rate), retry.clone())?;
    let quoter = MarketQuoter::new(PriceResolver::new(rates));

    Ok(Arc::new(ArbitrageEngine::new(
        Arc::clone(&sources.recipes),
        Arc::clone(&sources.market),
        Arc::new(config.pricing.price_table()),
        quoter,
        retry,
        config.pricing.fiat_per_primary,
    )))
}

/// Wire a batch ranker over `sources`. `concurrency` overrides the
/// configured value when given.
#[allow(clippy::result_large_err)]
pub fn build_ranker(
    config: &Config,
    sources: &Sources,
    concurrency: Option<usize>,
) -> Result<BatchRanker> {
    let engine = build_engine(config, sources)?;
    let concurrency = concurrency.unwrap_or(config.batch.concurrency);
    Ok(BatchRanker::new(engine, concurrency))
}
