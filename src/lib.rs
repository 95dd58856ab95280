//! kitfab - Killstreak kit fabricator profitability analysis.
//!
//! Estimates whether crafting a killstreak kit from a fabricator pays off by
//! comparing the cost of the fabricator's inputs, priced from a fixed part
//! table, with the best buy order for the finished kit.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Units, price parsing, name normalization, costing, ranking
//! - [`port`] - Traits for the inventory, recipe and market sources
//! - [`application`] - The analysis engine, batch ranking, retries, key rate
//! - [`adapter`] - Steam and backpack.tf sources, and the CLI
//! - [`infrastructure`] - Configuration loading and runtime wiring
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `testkit` - In-memory sources for tests
//!
//! # Example
//!
//! ```no_run
//! use kitfab::domain::{normalize, price};
//!
//! let recipe = normalize("Specialized Killstreak Rocket Launcher Kit Fabricator").unwrap();
//! assert_eq!(recipe.base_name(), "Rocket Launcher");
//! let offer = price::parse("2 keys, 3 ref").unwrap();
//! assert!(offer.needs_rate());
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
