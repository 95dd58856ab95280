//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases.

pub mod analyzer;
pub mod batch;
pub mod quote;
pub mod rate;
pub mod retry;

pub use analyzer::ArbitrageEngine;
pub use batch::{BatchRanker, BatchReport};
pub use quote::{MarketQuoter, PriceResolver, Quote};
pub use rate::KeyRateCache;
pub use retry::RetryPolicy;
