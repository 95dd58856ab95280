//! Market listings as scraped from a classifieds page.

use serde::Serialize;

/// Attribute fragment that marks a listing for a spelled (Halloween) item.
const SPELL_MARKER: &str = "spell";

/// One buy or sell order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketListing {
    /// Raw price expression, e.g. `"2 keys, 3 ref"`.
    pub price: String,
    /// Attribute names carried by the listed item.
    pub markers: Vec<String>,
}

impl MarketListing {
    pub fn new(price: impl Into<String>) -> Self {
        Self {
            price: price.into(),
            markers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.markers.push(marker.into());
        self
    }

    /// Whether the order is for a modified item that does not price the base kit.
    #[must_use]
    pub fn is_contaminated(&self) -> bool {
        self.markers
            .iter()
            .any(|marker| marker.to_ascii_lowercase().contains(SPELL_MARKER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spell_attributes_contaminate() {
        let clean = MarketListing::new("10 ref").with_marker("data-quality");
        let spelled = MarketListing::new("10 ref").with_marker("data-spell_1");
        let upper = MarketListing::new("10 ref").with_marker("data-SPELL");

        assert!(!clean.is_contaminated());
        assert!(spelled.is_contaminated());
        assert!(upper.is_contaminated());
    }
}
