//! Steam Community Market listing page, read for fabricator inputs.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::adapter::outbound::http::{join_segments, HttpFetcher};
use crate::domain::{NormalizedRecipe, RecipeInputs};
use crate::error::{LookupError, Result};
use crate::port::outbound::{ClientIdentity, RecipeInputsSource};

const SOURCE: &str = "steam market";
const INPUTS_START: &str = "The following are the inputs";
const INPUTS_END: &str = "You will receive";

fn assets_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?s)var g_rgAssets = (.+?)};").ok())
        .as_ref()
}

#[derive(Debug, Deserialize)]
struct DescriptionLine {
    #[serde(default)]
    value: String,
}

/// Reads the inputs a fabricator consumes from its market listing page.
#[derive(Debug, Clone)]
pub struct SteamListings {
    http: HttpFetcher,
    base_url: Url,
    app_id: u32,
}

impl SteamListings {
    pub fn new(http: HttpFetcher, base_url: Url, app_id: u32) -> Self {
        Self {
            http,
            base_url,
            app_id,
        }
    }

    fn listing_url(&self, recipe: &NormalizedRecipe) -> Url {
        let app = self.app_id.to_string();
        join_segments(
            &self.base_url,
            &["market", "listings", &app, &recipe.fabricator_name()],
        )
    }
}

#[async_trait]
impl RecipeInputsSource for SteamListings {
    async fn fetch_inputs(
        &self,
        recipe: &NormalizedRecipe,
        identity: &ClientIdentity,
    ) -> Result<RecipeInputs> {
        let url = self.listing_url(recipe);
        let page = self.http.get_text(&url, identity).await?;

        let descriptions = first_asset_descriptions(&page, self.app_id)?;
        let inputs = extract_inputs(&descriptions);
        if inputs.is_empty() {
            return Err(incomplete("no fabricator inputs listed"));
        }
        debug!(recipe = %recipe, parts = inputs.len(), "Fabricator inputs read");
        Ok(inputs)
    }
}

fn incomplete(reason: impl Into<String>) -> crate::error::Error {
    LookupError::Incomplete {
        source_name: SOURCE,
        reason: reason.into(),
    }
    .into()
}

/// Description lines of the first asset embedded in a listing page.
fn first_asset_descriptions(page: &str, app_id: u32) -> Result<Vec<String>> {
    let captures = assets_pattern()
        .and_then(|pattern| pattern.captures(page))
        .ok_or_else(|| incomplete("asset data missing"))?;
    let json = format!("{}}}", &captures[1]);
    let assets: Value = serde_json::from_str(&json)?;

    let app = app_id.to_string();
    let first = assets
        .get(&app)
        .and_then(|contexts| contexts.get("2"))
        .and_then(Value::as_object)
        .and_then(|items| items.values().next())
        .ok_or_else(|| incomplete("no assets for the item context"))?;

    let lines: Vec<DescriptionLine> = match first.get("descriptions") {
        Some(descriptions) => serde_json::from_value(descriptions.clone())?,
        None => Vec::new(),
    };
    Ok(lines.into_iter().map(|line| line.value).collect())
}

/// Parts and quantities listed between the inputs header and the output line.
///
/// Lines that do not read `<part> x <quantity>` are skipped.
fn extract_inputs<S: AsRef<str>>(descriptions: &[S]) -> RecipeInputs {
    let mut inputs = RecipeInputs::new();
    let mut collecting = false;

    for line in descriptions {
        let text = line.as_ref().trim();
        if text.contains(INPUTS_START) {
            collecting = true;
            continue;
        }
        if text.contains(INPUTS_END) {
            break;
        }
        if !collecting {
            continue;
        }

        let Some((part, quantity)) = text.rsplit_once(" x ") else {
            continue;
        };
        match quantity.trim().parse::<u32>() {
            Ok(quantity) => {
                if let Err(err) = inputs.insert(part.trim(), quantity) {
                    warn!(line = text, error = %err, "Ignoring input line");
                }
            }
            Err(_) => debug!(line = text, "Ignoring non-input line"),
        }
    }

    inputs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Variant;

    const PAGE: &str = r#"<html><script>
        var g_rgListingInfo = [];
        var g_rgAssets = {"440":{"2":{"11223344":{"id":"11223344","classid":"1","descriptions":[
            {"type":"html","value":" "},
            {"type":"html","value":"The following are the inputs that must be fulfilled."},
            {"type":"html","value":"Battle-Worn Robot KB-808 x 3"},
            {"type":"html","value":"Battle-Worn Robot Money Furnace x 2"},
            {"type":"html","value":"Unique Killstreak Item x 1"},
            {"type":"html","value":"Broken line x many"},
            {"type":"html","value":"You will receive all of the following outputs once all of the inputs are fulfilled."},
            {"type":"html","value":"Specialized Killstreak Rocket Launcher Kit x 1"}
        ]}}}};
        var g_rgCurrency = [];
    </script></html>"#;

    #[test]
    fn reads_inputs_from_embedded_assets() {
        let descriptions = first_asset_descriptions(PAGE, 440).unwrap();
        let inputs = extract_inputs(&descriptions);

        assert_eq!(inputs.len(), 3);
        assert_eq!(inputs.get("Battle-Worn Robot KB-808"), Some(3));
        assert_eq!(inputs.get("Battle-Worn Robot Money Furnace"), Some(2));
        assert_eq!(inputs.get("Unique Killstreak Item"), Some(1));
        assert_eq!(inputs.get("Specialized Killstreak Rocket Launcher Kit"), None);
    }

    #[test]
    fn lines_before_the_header_are_ignored() {
        let inputs = extract_inputs(&["Stray Part x 4", INPUTS_START, "Reinforced Robot Bomb Stabilizer x 2"]);

        assert_eq!(inputs.get("Stray Part"), None);
        assert_eq!(inputs.get("Reinforced Robot Bomb Stabilizer"), Some(2));
    }

    #[test]
    fn page_without_assets_is_incomplete() {
        let err = first_asset_descriptions("<html>Access Denied</html>", 440).unwrap_err();
        assert!(err.to_string().contains("asset data missing"));
    }

    #[test]
    fn listing_url_names_the_fabricator() {
        let listings = SteamListings::new(
            HttpFetcher::default(),
            Url::parse("https://steamcommunity.com").unwrap(),
            440,
        );
        let recipe = NormalizedRecipe::new("Rocket Launcher", Variant::Specialized);

        assert_eq!(
            listings.listing_url(&recipe).as_str(),
            "https://steamcommunity.com/market/listings/440/Specialized%20Killstreak%20Rocket%20Launcher%20Kit%20Fabricator"
        );
    }
}
