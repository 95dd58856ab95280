//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the external item sources the analyzer depends on:
//! the account inventory, fabricator recipe inputs, and market prices.

pub mod identity;
pub mod inventory;
pub mod market;
pub mod recipe;

pub use identity::ClientIdentity;
pub use inventory::InventorySource;
pub use market::{KeyRateSource, MarketPriceSource};
pub use recipe::RecipeInputsSource;
