//! Inventory port.

use async_trait::async_trait;

use crate::error::Result;

/// Lists the items an account owns.
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Display names of every item of `item_type` in the account's inventory
    /// for game `app_id`. Duplicates are kept, one entry per owned item.
    async fn list_items(&self, account: &str, app_id: u32, item_type: &str) -> Result<Vec<String>>;
}
