//! Client identities presented to external sites.

use std::fmt;

const CHROME_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
(KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
const FIREFOX_UA: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0";
const SAFARI_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4_1) AppleWebKit/605.1.15 \
(KHTML, like Gecko) Version/17.4.1 Safari/605.1.15";

/// Browser profile a request is sent as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    name: String,
    user_agent: String,
}

impl ClientIdentity {
    /// Create an identity with an explicit user agent.
    pub fn new(name: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Look up a built-in browser profile by name (`chrome`, `firefox`, `safari`).
    #[must_use]
    pub fn builtin(name: &str) -> Option<Self> {
        let user_agent = match name.trim().to_ascii_lowercase().as_str() {
            "chrome" => CHROME_UA,
            "firefox" => FIREFOX_UA,
            "safari" => SAFARI_UA,
            _ => return None,
        };
        Some(Self::new(name.trim().to_ascii_lowercase(), user_agent))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
