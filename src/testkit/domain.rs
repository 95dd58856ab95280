//! Builders for domain primitives used across tests.

use crate::domain::{MarketListing, NormalizedRecipe, RecipeInputs, Variant};

/// Specialized fabricator name for `weapon`, as it appears in inventories.
pub fn specialized_fabricator(weapon: &str) -> String {
    NormalizedRecipe::new(weapon, Variant::Specialized).fabricator_name()
}

/// Display name of the specialized kit for `weapon`.
pub fn specialized_kit(weapon: &str) -> String {
    NormalizedRecipe::new(weapon, Variant::Specialized).display_name()
}

/// Inputs from `(part, quantity)` pairs.
pub fn inputs(parts: &[(&str, u32)]) -> RecipeInputs {
    parts.iter().map(|&(part, quantity)| (part, quantity)).collect()
}

/// A clean buy order at `price`.
pub fn listing(price: &str) -> MarketListing {
    MarketListing::new(price)
}

/// A buy order for a spelled item at `price`.
pub fn spelled_listing(price: &str) -> MarketListing {
    MarketListing::new(price).with_marker("data-spell_1")
}
