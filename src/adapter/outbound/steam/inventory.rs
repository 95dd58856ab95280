//! Steam Community inventory source.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use crate::adapter::outbound::http::{join_segments, HttpFetcher};
use crate::error::{LookupError, Result};
use crate::port::outbound::{ClientIdentity, InventorySource};

/// Items requested per inventory page.
const PAGE_SIZE: &str = "2000";

#[derive(Debug, Deserialize)]
struct InventoryResponse {
    #[serde(default)]
    assets: Vec<Asset>,
    #[serde(default)]
    descriptions: Vec<Description>,
    #[serde(default)]
    success: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Asset {
    classid: String,
    #[serde(default)]
    instanceid: String,
}

#[derive(Debug, Deserialize)]
struct Description {
    classid: String,
    #[serde(default)]
    instanceid: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    market_hash_name: Option<String>,
    #[serde(rename = "type", default)]
    type_line: String,
    #[serde(default)]
    tags: Vec<Tag>,
}

#[derive(Debug, Deserialize)]
struct Tag {
    #[serde(default)]
    category: String,
    #[serde(default)]
    localized_tag_name: String,
}

impl Description {
    fn display_name(&self) -> &str {
        self.market_hash_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.name)
    }

    fn is_type(&self, item_type: &str) -> bool {
        let tagged = self
            .tags
            .iter()
            .any(|tag| tag.category == "Type" && tag.localized_tag_name.eq_ignore_ascii_case(item_type));
        tagged || self.type_line.contains(item_type)
    }
}

/// Reads public inventories from the Steam Community inventory endpoint.
#[derive(Debug, Clone)]
pub struct SteamInventory {
    http: HttpFetcher,
    base_url: Url,
    identity: ClientIdentity,
}

impl SteamInventory {
    pub fn new(http: HttpFetcher, base_url: Url, identity: ClientIdentity) -> Self {
        Self {
            http,
            base_url,
            identity,
        }
    }

    fn inventory_url(&self, account: &str, app_id: u32) -> Url {
        let app = app_id.to_string();
        let mut url = join_segments(&self.base_url, &["inventory", account, &app, "2"]);
        url.query_pairs_mut()
            .append_pair("l", "english")
            .append_pair("count", PAGE_SIZE);
        url
    }
}

#[async_trait]
impl InventorySource for SteamInventory {
    async fn list_items(&self, account: &str, app_id: u32, item_type: &str) -> Result<Vec<String>> {
        let url = self.inventory_url(account, app_id);
        info!(account, app_id, item_type, "Fetching inventory");

        let response = self.http.send(&url, &self.identity).await?;
        if matches!(response.status(), StatusCode::FORBIDDEN | StatusCode::NOT_FOUND) {
            return Err(LookupError::AccountUnavailable {
                account: account.to_string(),
            }
            .into());
        }
        let body: Option<InventoryResponse> = response.error_for_status()?.json().await?;

        match body {
            Some(inventory) if inventory.success.unwrap_or(1) == 1 => {
                let items = filter_inventory(&inventory, item_type);
                debug!(total = inventory.assets.len(), matching = items.len(), "Inventory filtered");
                Ok(items)
            }
            _ => Err(LookupError::AccountUnavailable {
                account: account.to_string(),
            }
            .into()),
        }
    }
}

/// Names of owned items whose type matches `item_type`, one per asset.
fn filter_inventory(inventory: &InventoryResponse, item_type: &str) -> Vec<String> {
    let descriptions: HashMap<(&str, &str), &Description> = inventory
        .descriptions
        .iter()
        .map(|d| ((d.classid.as_str(), d.instanceid.as_str()), d))
        .collect();

    inventory
        .assets
        .iter()
        .filter_map(|asset| descriptions.get(&(asset.classid.as_str(), asset.instanceid.as_str())))
        .filter(|description| description.is_type(item_type))
        .map(|description| description.display_name().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const INVENTORY: &str = r#"{
        "assets": [
            {"appid": 440, "contextid": "2", "assetid": "1", "classid": "100", "instanceid": "0", "amount": "1"},
            {"appid": 440, "contextid": "2", "assetid": "2", "classid": "100", "instanceid": "0", "amount": "1"},
            {"appid": 440, "contextid": "2", "assetid": "3", "classid": "200", "instanceid": "7", "amount": "1"},
            {"appid": 440, "contextid": "2", "assetid": "4", "classid": "300", "instanceid": "0", "amount": "1"}
        ],
        "descriptions": [
            {
                "classid": "100", "instanceid": "0",
                "name": "Specialized Killstreak Rocket Launcher Kit Fabricator",
                "market_hash_name": "Specialized Killstreak Rocket Launcher Kit Fabricator",
                "type": "Level 3 Recipe",
                "tags": [{"category": "Type", "internal_name": "Recipe", "localized_tag_name": "Recipe"}]
            },
            {
                "classid": "200", "instanceid": "7",
                "name": "Killstreak Fabricator - Scattergun",
                "type": "Level 1 Recipe",
                "tags": []
            },
            {
                "classid": "300", "instanceid": "0",
                "name": "Mann Co. Supply Crate Key",
                "market_hash_name": "Mann Co. Supply Crate Key",
                "type": "Level 5 Tool",
                "tags": [{"category": "Type", "localized_tag_name": "Tool"}]
            }
        ],
        "total_inventory_count": 4,
        "success": 1
    }"#;

    #[test]
    fn keeps_matching_items_once_per_asset() {
        let inventory: InventoryResponse = serde_json::from_str(INVENTORY).unwrap();

        let items = filter_inventory(&inventory, "Recipe");

        assert_eq!(
            items,
            [
                "Specialized Killstreak Rocket Launcher Kit Fabricator",
                "Specialized Killstreak Rocket Launcher Kit Fabricator",
                "Killstreak Fabricator - Scattergun",
            ]
        );
    }

    #[test]
    fn inventory_url_has_paging_query() {
        let inventory = SteamInventory::new(
            HttpFetcher::default(),
            Url::parse("https://steamcommunity.com").unwrap(),
            ClientIdentity::builtin("chrome").unwrap(),
        );

        assert_eq!(
            inventory.inventory_url("76561198000000000", 440).as_str(),
            "https://steamcommunity.com/inventory/76561198000000000/440/2?l=english&count=2000"
        );
    }
}
