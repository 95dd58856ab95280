//! Crafting cost calculation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use super::money::{Money, Refined};
use super::part::{PriceTable, RecipeInputs};

/// Cost of one recipe line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineCost {
    pub quantity: u32,
    pub primary: Refined,
    pub fiat: Decimal,
}

/// Priced recipe: the total plus a per-part breakdown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CostBreakdown {
    /// Sum over every priced part, in ref.
    pub total: Money,
    /// Sum of the informational fiat costs.
    pub total_fiat: Decimal,
    /// Priced parts.
    pub items: BTreeMap<String, LineCost>,
    /// Required parts with no entry in the price table.
    pub missing: Vec<String>,
}

impl CostBreakdown {
    /// Total cost in ref.
    #[must_use]
    pub fn total_primary(&self) -> Refined {
        self.total.primary_component()
    }
}

/// Price every input against `table`.
///
/// Parts absent from the table, or whose cost overflows, are logged, listed
/// in [`CostBreakdown::missing`] and left out of the total.
pub fn compute_cost(inputs: &RecipeInputs, table: &PriceTable) -> CostBreakdown {
    let mut breakdown = CostBreakdown::default();
    let mut total = Decimal::ZERO;

    for (part, quantity) in inputs.iter() {
        let Some(price) = table.get(part) else {
            warn!(part = %part, quantity, "Price not found for part");
            breakdown.missing.push(part.to_string());
            continue;
        };

        let scale = Decimal::from(quantity);
        let priced = price.primary.checked_mul(scale).zip(price.fiat.checked_mul(scale));
        let sums = priced.and_then(|(primary, fiat)| {
            total
                .checked_add(primary)
                .zip(breakdown.total_fiat.checked_add(fiat))
                .map(|sums| (primary, fiat, sums))
        });
        let Some((primary, fiat, (next_total, next_fiat))) = sums else {
            warn!(part = %part, quantity, "Part cost out of range");
            breakdown.missing.push(part.to_string());
            continue;
        };

        total = next_total;
        breakdown.total_fiat = next_fiat;
        breakdown.items.insert(
            part.to_string(),
            LineCost {
                quantity,
                primary,
                fiat,
            },
        );
    }

    breakdown.total = Money::primary(total);
    breakdown
}
