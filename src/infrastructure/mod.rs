//! Process-level plumbing with no analysis logic of its own.
//!
//! - [`config`] reads and validates `kitfab.toml`
//! - [`bootstrap`] turns a config into live sources, an engine and a ranker

pub mod bootstrap;
pub mod config;
