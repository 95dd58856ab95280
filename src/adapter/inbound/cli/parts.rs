//! Handler for the `parts` command.

use std::path::Path;

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::error::Result;

#[derive(Tabled)]
struct PartRow {
    #[tabled(rename = "Part")]
    name: String,
    #[tabled(rename = "Price (ref)")]
    primary: String,
    #[tabled(rename = "Price (fiat)")]
    fiat: String,
}

/// List the configured part prices.
pub fn execute(path: &Path) -> Result<()> {
    let config = super::load_config(path)?;
    let table = config.pricing.price_table();
    let symbol = &config.pricing.fiat_symbol;

    if output::is_json() {
        let parts: Vec<_> = table
            .sorted()
            .into_iter()
            .map(|(name, price)| {
                json!({
                    "name": name,
                    "primary": price.primary,
                    "fiat": price.fiat,
                })
            })
            .collect();
        output::json_output(json!({
            "command": "parts",
            "parts": parts,
        }));
        return Ok(());
    }

    output::section("Part prices");
    if table.is_empty() {
        output::note("(no parts configured)");
        return Ok(());
    }

    let rows: Vec<PartRow> = table
        .sorted()
        .into_iter()
        .map(|(name, price)| PartRow {
            name: name.to_string(),
            primary: format!("{:.2}", price.primary),
            fiat: format!("{symbol}{:.2}", price.fiat),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());
    output::field("Parts", table.len());

    Ok(())
}
