//! Shared HTTP client for page and JSON fetches.

use std::time::Duration;

use reqwest::header::{ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::settings::HttpConfig;
use crate::error::{ConfigError, Result};
use crate::port::outbound::ClientIdentity;

/// Thin wrapper over [`reqwest::Client`] that stamps every request with the
/// caller's [`ClientIdentity`].
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: HttpClient,
}

impl HttpFetcher {
    #[must_use]
    pub fn from_config(config: &HttpConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self { http }
    }

    /// Send a GET and return the response whatever its status.
    pub async fn send(&self, url: &Url, identity: &ClientIdentity) -> Result<Response> {
        debug!(url = %url, identity = %identity, "GET");
        let response = self
            .http
            .get(url.clone())
            .header(USER_AGENT, identity.user_agent())
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;
        Ok(response)
    }

    /// GET a page body, failing on non-success statuses.
    pub async fn get_text(&self, url: &Url, identity: &ClientIdentity) -> Result<String> {
        let response = self.send(url, identity).await?.error_for_status()?;
        Ok(response.text().await?)
    }

    /// GET and decode a JSON body, failing on non-success statuses.
    pub async fn get_json<T>(&self, url: &Url, identity: &ClientIdentity) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(url, identity).await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::from_config(&HttpConfig::default())
    }
}

/// Parse a base URL that path segments can be appended to.
pub fn parse_base(field: &'static str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("{raw} cannot be used as a base URL"),
        }
        .into());
    }
    Ok(url)
}

/// Append percent-encoded path segments to `base`.
#[must_use]
pub fn join_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_are_percent_encoded() {
        let base = parse_base("backpack_url", "https://backpack.tf/").unwrap();

        let url = join_segments(
            &base,
            &["stats", "Unique", "Specialized Killstreak Rocket Launcher"],
        );

        assert_eq!(
            url.as_str(),
            "https://backpack.tf/stats/Unique/Specialized%20Killstreak%20Rocket%20Launcher"
        );
    }

    #[test]
    fn non_base_urls_are_rejected() {
        assert!(parse_base("backpack_url", "mailto:someone@example.com").is_err());
        assert!(parse_base("backpack_url", "not a url").is_err());
    }
}
