//! In-memory collaborators for unit and integration tests.
//!
//! Compiled under `#[cfg(test)]` and behind the `testkit` feature, which the
//! crate enables for its own integration tests through a dev-dependency.
//!
//! - [`sources`] implements every outbound port with call counters
//! - [`domain`] builds recipes, inputs and listings
//! - [`config`] returns configs with instant retries

pub mod config;
pub mod domain;
pub mod sources;
