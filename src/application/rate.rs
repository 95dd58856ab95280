//! Run-scoped key rate.
//!
//! The key-to-ref rate is either fixed in configuration or fetched the first
//! time a key-denominated price needs converting. A fetched rate is kept for
//! the rest of the run; concurrent analyses share one fetch.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use super::retry::RetryPolicy;
use crate::domain::KeyRate;
use crate::port::outbound::KeyRateSource;

/// Compute-once holder for the key rate.
pub struct KeyRateCache {
    fixed: Option<KeyRate>,
    fallback: KeyRate,
    source: Option<Arc<dyn KeyRateSource>>,
    retry: RetryPolicy,
    cell: OnceCell<KeyRate>,
}

impl KeyRateCache {
    /// A cache that fetches from `source` on first use and falls back to
    /// `fallback` if the fetch is exhausted.
    pub fn fetched(source: Arc<dyn KeyRateSource>, retry: RetryPolicy, fallback: KeyRate) -> Self {
        Self {
            fixed: None,
            fallback,
            source: Some(source),
            retry,
            cell: OnceCell::new(),
        }
    }

    /// A cache that always answers `rate` and never fetches.
    pub fn fixed(rate: KeyRate) -> Self {
        Self {
            fixed: Some(rate),
            fallback: rate,
            source: None,
            retry: RetryPolicy::default(),
            cell: OnceCell::new(),
        }
    }

    /// The rate for this run, fetching it on first call.
    pub async fn get(&self) -> KeyRate {
        if let Some(rate) = self.fixed {
            return rate;
        }
        *self.cell.get_or_init(|| self.resolve()).await
    }

    /// The rate if it is fixed or has already been resolved.
    pub fn cached(&self) -> Option<KeyRate> {
        self.fixed.or_else(|| self.cell.get().copied())
    }

    /// Forget a fetched rate so the next [`get`](Self::get) fetches again.
    pub fn invalidate(&mut self) {
        self.cell.take();
    }

    async fn resolve(&self) -> KeyRate {
        let Some(source) = self.source.as_ref() else {
            return self.fallback;
        };

        let fetched = self
            .retry
            .run("key rate", |identity| async move {
                source.fetch_key_rate(&identity).await
            })
            .await;

        match fetched.map(KeyRate::try_new) {
            Ok(Ok(rate)) => {
                info!(rate = %rate.value(), "Key rate resolved");
                rate
            }
            Ok(Err(err)) => {
                warn!(error = %err, fallback = %self.fallback, "Ignoring fetched key rate");
                self.fallback
            }
            Err(err) => {
                warn!(error = %err, fallback = %self.fallback, "Could not fetch key rate, using fallback");
                self.fallback
            }
        }
    }
}

impl std::fmt::Debug for KeyRateCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyRateCache")
            .field("fixed", &self.fixed)
            .field("fallback", &self.fallback)
            .field("cached", &self.cell.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, LookupError, Result};
    use crate::port::outbound::ClientIdentity;
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    struct CountingSource {
        calls: AtomicU32,
        rate: Option<Decimal>,
    }

    #[async_trait]
    impl KeyRateSource for CountingSource {
        async fn fetch_key_rate(&self, _identity: &ClientIdentity) -> Result<Decimal> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.rate.ok_or_else(|| {
                Error::from(LookupError::Incomplete {
                    source_name: "test",
                    reason: "no sell orders".into(),
                })
            })
        }
    }

    fn retry() -> RetryPolicy {
        RetryPolicy::new(2, Duration::ZERO, Duration::ZERO, Duration::from_secs(1), Vec::new())
    }

    #[tokio::test]
    async fn fetches_once_and_reuses() {
        let source = Arc::new(CountingSource {
            calls: AtomicU32::new(0),
            rate: Some(dec!(59.11)),
        });
        let cache = Arc::new(KeyRateCache::fetched(source.clone(), retry(), KeyRate::DEFAULT_FALLBACK));

        assert!(cache.cached().is_none());
        let (a, b) = tokio::join!(cache.get(), cache.get());
        let c = cache.get().await;

        assert_eq!(a.value(), dec!(59.11));
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn falls_back_when_fetch_fails() {
        let source = Arc::new(CountingSource {
            calls: AtomicU32::new(0),
            rate: None,
        });
        let cache = KeyRateCache::fetched(source.clone(), retry(), KeyRate::DEFAULT_FALLBACK);

        assert_eq!(cache.get().await.value(), dec!(60));
        assert_eq!(cache.get().await.value(), dec!(60));
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let source = Arc::new(CountingSource {
            calls: AtomicU32::new(0),
            rate: Some(dec!(58)),
        });
        let mut cache = KeyRateCache::fetched(source.clone(), retry(), KeyRate::DEFAULT_FALLBACK);

        cache.get().await;
        cache.invalidate();
        assert!(cache.cached().is_none());
        cache.get().await;

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn fixed_rate_never_fetches() {
        let cache = KeyRateCache::fixed(KeyRate::try_new(dec!(59.11)).unwrap());

        assert_eq!(cache.cached().map(KeyRate::value), Some(dec!(59.11)));
        assert_eq!(cache.get().await.value(), dec!(59.11));
    }
}
