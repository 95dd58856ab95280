//! Steam Community adapters: account inventories and fabricator listings.

mod inventory;
mod listing;

pub use inventory::SteamInventory;
pub use listing::SteamListings;
