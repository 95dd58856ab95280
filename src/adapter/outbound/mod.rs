//! Outbound adapters (driven side).

pub mod backpack;
pub mod http;
pub mod settings;
pub mod steam;

pub use backpack::BackpackClient;
pub use http::HttpFetcher;
pub use settings::{HttpConfig, SourcesConfig};
pub use steam::{SteamInventory, SteamListings};
