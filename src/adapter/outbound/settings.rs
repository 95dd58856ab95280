//! Outbound source configuration.

use serde::Deserialize;

/// HTTP client settings shared by every source.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_http_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

const fn default_http_timeout_ms() -> u64 {
    20_000
}

const fn default_http_connect_timeout_ms() -> u64 {
    5_000
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_http_timeout_ms(),
            connect_timeout_ms: default_http_connect_timeout_ms(),
        }
    }
}

/// Where inventories, recipes and prices are read from.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    /// Steam Community base URL (inventories and market listings).
    #[serde(default = "default_steam_community_url")]
    pub steam_community_url: String,
    /// backpack.tf base URL (buy orders and key price).
    #[serde(default = "default_backpack_url")]
    pub backpack_url: String,
    /// Steam app ID of the game.
    #[serde(default = "default_app_id")]
    pub app_id: u32,
    /// Inventory item type that holds fabricators.
    #[serde(default = "default_item_type")]
    pub item_type: String,
}

fn default_steam_community_url() -> String {
    "https://steamcommunity.com".into()
}

fn default_backpack_url() -> String {
    "https://backpack.tf".into()
}

const fn default_app_id() -> u32 {
    440
}

fn default_item_type() -> String {
    "Recipe".into()
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            steam_community_url: default_steam_community_url(),
            backpack_url: default_backpack_url(),
            app_id: default_app_id(),
            item_type: default_item_type(),
        }
    }
}
