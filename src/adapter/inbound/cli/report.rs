//! Rendering of analysis results and batch summaries.

use rust_decimal::Decimal;
use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::application::BatchReport;
use crate::domain::{AnalysisResult, Skipped};

#[derive(Tabled)]
struct PartRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Cost (ref)")]
    primary: String,
    #[tabled(rename = "Cost (fiat)")]
    fiat: String,
}

#[derive(Tabled, Debug, PartialEq)]
struct SummaryRow {
    #[tabled(rename = "Weapon")]
    weapon: String,
    #[tabled(rename = "Type")]
    variant: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Sell Price")]
    sell: String,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "ROI")]
    roi: String,
}

fn format_roi(roi: Option<Decimal>) -> String {
    roi.map_or_else(|| "n/a".to_string(), |roi| format!("{roi:.1}%"))
}

fn format_fiat(symbol: &str, amount: Decimal) -> String {
    format!("{symbol}{amount:.2}")
}

/// Sell price in keys when the best offer was quoted in keys, else in ref.
fn sell_price_label(result: &AnalysisResult) -> String {
    match result.market_price_in_keys() {
        Some(keys) => format!("{keys:.2} keys"),
        None => format!("{:.2} ref", result.market_price_primary),
    }
}

fn signed(value: Decimal, text: String) -> String {
    if value > Decimal::ZERO {
        output::positive(text)
    } else if value < Decimal::ZERO {
        output::negative(text)
    } else {
        text
    }
}

fn summary_rows<'a>(
    results: impl Iterator<Item = &'a AnalysisResult>,
) -> Vec<(SummaryRow, &'a str)> {
    results
        .map(|result| {
            let row = SummaryRow {
                weapon: result.recipe.base_name().to_string(),
                variant: result.recipe.variant().to_string(),
                cost: format!("{:.2} ref", result.cost.primary_component()),
                sell: sell_price_label(result),
                profit: format!("{:.2} ref", result.profit),
                roi: format_roi(result.roi),
            };
            (row, result.reference_url.as_str())
        })
        .collect()
}

/// Print the full breakdown for one analyzed fabricator.
pub fn render_detail(result: &AnalysisResult, fiat_symbol: &str) {
    if output::is_json() {
        output::json_output(json!({
            "command": "analyze",
            "result": result,
        }));
        return;
    }
    output::section(&result.candidate);
    output::field("Weapon", result.recipe.base_name());
    output::field("Type", result.recipe.variant());

    let rows: Vec<PartRow> = result
        .breakdown
        .items
        .iter()
        .map(|(item, line)| PartRow {
            item: item.clone(),
            quantity: line.quantity,
            primary: format!("{:.2}", line.primary),
            fiat: format_fiat(fiat_symbol, line.fiat),
        })
        .collect();
    if !rows.is_empty() {
        output::lines(&Table::new(rows).to_string());
    }
    for part in &result.breakdown.missing {
        output::warning(&format!("Price not found for {part}"));
    }

    output::field(
        "Total cost",
        format!(
            "{:.2} ref ({})",
            result.cost.primary_component(),
            format_fiat(fiat_symbol, result.cost_fiat)
        ),
    );
    output::field("Best buy order", result.market_price);
    if let Some(rate) = result.key_rate {
        output::field("Sell price", format!("{:.2} ref", result.market_price_primary));
        output::field("Key price", rate);
    }
    output::field(
        "Profit",
        signed(
            result.profit,
            format!(
                "{:.2} ref ({})",
                result.profit,
                format_fiat(fiat_symbol, result.profit_fiat)
            ),
        ),
    );
    output::field("ROI", format_roi(result.roi));

    if result.is_profitable() {
        output::success("Profitable to craft!");
    } else {
        output::warning("Not profitable to craft");
    }
    output::field("Market", output::highlight(&result.reference_url));
}

/// Print the ranked summary of a batch run.
pub fn render_summary(report: &BatchReport, profitable_only: bool) {
    if output::is_json() {
        output::json_output(json!({
            "command": "analyze",
            "report": report,
        }));
        return;
    }

    let rows = if profitable_only {
        summary_rows(report.profitable())
    } else {
        summary_rows(report.iter())
    };

    output::section("Overall Summary");
    if report.is_cancelled() {
        output::warning("Run interrupted; showing partial results");
    }

    if rows.is_empty() {
        if profitable_only {
            output::note("No profitable fabricators found");
        } else {
            output::note("No fabricators could be analyzed");
        }
    } else {
        let (table_rows, urls): (Vec<SummaryRow>, Vec<&str>) = rows.into_iter().unzip();
        output::lines(&Table::new(table_rows).to_string());

        output::section("Market pages");
        for url in urls {
            output::note(url);
        }
    }

    render_skipped(report.skipped());
    output::field(
        "Analyzed",
        format!("{} ranked, {} skipped", report.len(), report.skipped().len()),
    );
    output::field("Generated", report.generated_at().format("%Y-%m-%d %H:%M:%S UTC"));
}

/// List candidates that produced no result.
pub fn render_skipped(skipped: &[Skipped]) {
    if skipped.is_empty() {
        return;
    }
    output::section("Skipped");
    for skip in skipped {
        output::warning(&format!("{}: {}", skip.candidate, skip.reason));
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::{CostBreakdown, KeyRate, Money, NormalizedRecipe, Variant};

    fn result(keys: bool) -> AnalysisResult {
        AnalysisResult {
            candidate: "Specialized Killstreak Rocket Launcher Kit Fabricator".into(),
            recipe: NormalizedRecipe::new("Rocket Launcher", Variant::Specialized),
            cost: Money::primary(dec!(40)),
            cost_fiat: dec!(1.20),
            breakdown: CostBreakdown::default(),
            market_price: if keys {
                Money::with_keys(dec!(1), Decimal::ZERO)
            } else {
                Money::primary(dec!(60))
            },
            market_price_primary: dec!(60),
            key_rate: keys.then(|| KeyRate::try_new(dec!(60)).unwrap()),
            profit: dec!(20),
            profit_fiat: dec!(0.60),
            roi: Some(dec!(50)),
            reference_url: "https://backpack.tf/stats/Unique/x".into(),
        }
    }

    #[test]
    fn sell_price_uses_keys_only_when_quoted_in_keys() {
        assert_eq!(sell_price_label(&result(true)), "1.00 keys");
        assert_eq!(sell_price_label(&result(false)), "60.00 ref");
    }

    #[test]
    fn roi_formatting() {
        assert_eq!(format_roi(Some(dec!(12.345))), "12.3%");
        assert_eq!(format_roi(None), "n/a");
    }

    #[test]
    fn summary_row_fields() {
        let results = [result(false)];
        let rows = summary_rows(results.iter());

        assert_eq!(rows.len(), 1);
        let (row, url) = &rows[0];
        assert_eq!(row.weapon, "Rocket Launcher");
        assert_eq!(row.variant, "Specialized Killstreak");
        assert_eq!(row.cost, "40.00 ref");
        assert_eq!(row.profit, "20.00 ref");
        assert_eq!(row.roi, "50.0%");
        assert_eq!(*url, "https://backpack.tf/stats/Unique/x");
    }
}
