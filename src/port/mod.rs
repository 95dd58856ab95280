//! Hexagonal ports. Depend only on the domain.
//!
//! The analysis core reaches the outside world through the outbound traits
//! here: Steam and backpack.tf adapters implement them for real runs, and the
//! `testkit` feature implements them in memory.
//!
//! ```text
//!   inventory ──► InventorySource ─────┐
//!   listing   ──► RecipeInputsSource ──┤
//!   classifieds ► MarketPriceSource ───┼──► ArbitrageEngine
//!   key price ──► KeyRateSource ───────┘
//! ```

pub mod outbound;
