//! Bounded retry with jittered backoff and rotating client identities.
//!
//! Steam and backpack.tf throttle or challenge repeated identical requests.
//! Every attempt is sent as the next [`ClientIdentity`] in the rotation, is
//! bounded by a timeout, and is followed by a uniformly random pause before
//! the next one.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};

use crate::error::{LookupError, Result};
use crate::port::outbound::ClientIdentity;

/// Retry budget shared by every external lookup.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    min_backoff: Duration,
    max_backoff: Duration,
    attempt_timeout: Duration,
    identities: Vec<ClientIdentity>,
}

impl RetryPolicy {
    /// Build a policy.
    ///
    /// At least one attempt is always made, the backoff window is widened so
    /// `max_backoff >= min_backoff`, and an empty identity list falls back to
    /// the built-in Chrome profile.
    pub fn new(
        max_attempts: u32,
        min_backoff: Duration,
        max_backoff: Duration,
        attempt_timeout: Duration,
        identities: Vec<ClientIdentity>,
    ) -> Self {
        let identities = if identities.is_empty() {
            ClientIdentity::builtin("chrome").into_iter().collect()
        } else {
            identities
        };

        Self {
            max_attempts: max_attempts.max(1),
            min_backoff,
            max_backoff: max_backoff.max(min_backoff),
            attempt_timeout,
            identities,
        }
    }

    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Identity used for the 1-based `attempt`.
    #[must_use]
    pub fn identity_for(&self, attempt: u32) -> &ClientIdentity {
        let index = attempt.saturating_sub(1) as usize % self.identities.len();
        &self.identities[index]
    }

    /// Pick a pause uniformly from the backoff window.
    fn backoff_delay(&self) -> Duration {
        let min_ms = self.min_backoff.as_millis() as u64;
        let max_ms = self.max_backoff.as_millis() as u64;
        if max_ms <= min_ms {
            return self.min_backoff;
        }
        Duration::from_millis(rand::thread_rng().gen_range(min_ms..=max_ms))
    }

    /// Run `op` until it succeeds or the attempt budget is spent.
    ///
    /// Errors and timeouts both count as failed attempts. `what` names the
    /// lookup in logs and in the final [`LookupError::Exhausted`].
    pub async fn run<T, F, Fut>(&self, what: &str, mut op: F) -> std::result::Result<T, LookupError>
    where
        F: FnMut(ClientIdentity) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut last_error = String::new();

        for attempt in 1..=self.max_attempts {
            let identity = self.identity_for(attempt).clone();
            debug!(what, attempt, identity = %identity, "Lookup attempt");

            match timeout(self.attempt_timeout, op(identity)).await {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(err)) => last_error = err.to_string(),
                Err(_) => last_error = LookupError::TimedOut(self.attempt_timeout).to_string(),
            }

            if attempt < self.max_attempts {
                let delay = self.backoff_delay();
                warn!(
                    what,
                    attempt,
                    max_attempts = self.max_attempts,
                    error = %last_error,
                    delay_ms = delay.as_millis() as u64,
                    "Lookup failed, retrying"
                );
                sleep(delay).await;
            }
        }

        warn!(what, attempts = self.max_attempts, error = %last_error, "Lookup exhausted retries");
        Err(LookupError::Exhausted {
            what: what.to_string(),
            attempts: self.max_attempts,
            last_error,
        })
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(
            3,
            Duration::from_secs(1),
            Duration::from_secs(3),
            Duration::from_secs(30),
            ["chrome", "firefox", "safari"]
                .into_iter()
                .filter_map(ClientIdentity::builtin)
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    fn instant_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(
            max_attempts,
            Duration::ZERO,
            Duration::ZERO,
            Duration::from_millis(200),
            ["chrome", "firefox"]
                .into_iter()
                .filter_map(ClientIdentity::builtin)
                .collect(),
        )
    }

    fn incomplete() -> Error {
        LookupError::Incomplete {
            source_name: "test",
            reason: "empty page".into(),
        }
        .into()
    }

    #[tokio::test]
    async fn returns_first_success() {
        let calls = AtomicU32::new(0);

        let value = instant_policy(3)
            .run("value", |_| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(incomplete())
                    } else {
                        Ok(n)
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(value, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn rotates_identities_and_stops_at_budget() {
        let seen = Mutex::new(Vec::new());

        let err = instant_policy(3)
            .run("inputs", |identity| {
                seen.lock().unwrap().push(identity.name().to_string());
                async { Err::<(), _>(incomplete()) }
            })
            .await
            .unwrap_err();

        assert_eq!(*seen.lock().unwrap(), ["chrome", "firefox", "chrome"]);
        assert!(matches!(err, LookupError::Exhausted { attempts: 3, .. }));
    }

    #[tokio::test]
    async fn timeouts_count_as_failed_attempts() {
        let policy = RetryPolicy::new(
            2,
            Duration::ZERO,
            Duration::ZERO,
            Duration::from_millis(10),
            Vec::new(),
        );
        let calls = AtomicU32::new(0);

        let err = policy
            .run("slow", |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    sleep(Duration::from_secs(5)).await;
                    Ok(())
                }
            })
            .await
            .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        match err {
            LookupError::Exhausted { last_error, .. } => assert!(last_error.contains("timed out")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn zero_attempts_still_tries_once() {
        let policy = RetryPolicy::new(0, Duration::ZERO, Duration::ZERO, Duration::ZERO, Vec::new());

        assert_eq!(policy.max_attempts(), 1);
        assert_eq!(policy.identity_for(1).name(), "chrome");
    }

    #[test]
    fn backoff_stays_within_window() {
        let policy = RetryPolicy::new(
            3,
            Duration::from_millis(1000),
            Duration::from_millis(3000),
            Duration::from_secs(1),
            Vec::new(),
        );

        for _ in 0..50 {
            let delay = policy.backoff_delay();
            assert!(delay >= Duration::from_millis(1000));
            assert!(delay <= Duration::from_millis(3000));
        }
    }
}
