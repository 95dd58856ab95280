//! Robot part prices and recipe input lists.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::money::Refined;

/// Fixed price of one crafting part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartPrice {
    /// Cost in refined metal.
    pub primary: Refined,
    /// Informational cost in the display currency.
    #[serde(default)]
    pub fiat: Decimal,
}

impl PartPrice {
    #[must_use]
    pub const fn new(primary: Refined, fiat: Decimal) -> Self {
        Self { primary, fiat }
    }
}

/// Immutable part-name to price lookup, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    parts: HashMap<String, PartPrice>,
}

impl PriceTable {
    /// Build a table from `(name, price)` entries. Later duplicates win.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, PartPrice)>,
        S: Into<String>,
    {
        Self {
            parts: entries
                .into_iter()
                .map(|(name, price)| (name.into(), price))
                .collect(),
        }
    }

    pub fn get(&self, part: &str) -> Option<&PartPrice> {
        self.parts.get(part)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Entries sorted by part name.
    pub fn sorted(&self) -> Vec<(&str, &PartPrice)> {
        let mut entries: Vec<_> = self
            .parts
            .iter()
            .map(|(name, price)| (name.as_str(), price))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

/// Parts a fabricator consumes, with the quantity of each.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecipeInputs(BTreeMap<String, u32>);

impl RecipeInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a required part. Zero quantities are rejected; a repeated part
    /// replaces the earlier quantity.
    pub fn insert(&mut self, part: impl Into<String>, quantity: u32) -> Result<(), DomainError> {
        let part = part.into();
        if quantity == 0 {
            return Err(DomainError::ZeroQuantity { part });
        }
        self.0.insert(part, quantity);
        Ok(())
    }

    pub fn get(&self, part: &str) -> Option<u32> {
        self.0.get(part).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(part, quantity)| (part.as_str(), *quantity))
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for RecipeInputs {
    /// Collect inputs, silently dropping zero quantities.
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut inputs = Self::new();
        for (part, quantity) in iter {
            let _ = inputs.insert(part, quantity);
        }
        inputs
    }
}
