//! Per-candidate analysis outcomes and ranking.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::cost::CostBreakdown;
use super::money::{KeyRate, Money, Refined};
use super::recipe::NormalizedRecipe;

/// Profitability verdict for one fabricator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Display name as it was analyzed.
    pub candidate: String,
    pub recipe: NormalizedRecipe,
    /// Crafting cost (ref only).
    pub cost: Money,
    pub cost_fiat: Decimal,
    pub breakdown: CostBreakdown,
    /// Best buy order, as quoted.
    pub market_price: Money,
    /// Best buy order, in ref.
    pub market_price_primary: Refined,
    /// Rate used to value the buy order, when it was quoted in keys.
    pub key_rate: Option<KeyRate>,
    /// `market_price_primary - cost`, may be negative.
    pub profit: Refined,
    pub profit_fiat: Decimal,
    /// `profit / cost * 100`; `None` when the cost is zero.
    pub roi: Option<Decimal>,
    /// Market page for the crafted kit.
    pub reference_url: String,
}

impl AnalysisResult {
    #[must_use]
    pub fn is_profitable(&self) -> bool {
        self.profit > Decimal::ZERO
    }

    /// Market price expressed in keys, when keys were involved.
    #[must_use]
    pub fn market_price_in_keys(&self) -> Option<Decimal> {
        self.key_rate
            .and_then(|rate| self.market_price_primary.checked_div(rate.value()))
    }
}

/// Return on investment in percent, undefined for a zero cost or when the
/// ratio is out of range.
#[must_use]
pub fn roi(profit: Refined, cost: Refined) -> Option<Decimal> {
    if cost > Decimal::ZERO {
        profit
            .checked_div(cost)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    } else {
        None
    }
}

/// Why a candidate produced no result.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    #[error("unparseable name")]
    UnrecognizedName,
    #[error("inputs unavailable")]
    InputsUnavailable,
    #[error("market price unavailable")]
    MarketUnavailable,
    #[error("no market price")]
    NoMarketPrice,
}

/// A candidate that was dropped from the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skipped {
    pub candidate: String,
    pub reason: SkipReason,
}

impl Skipped {
    pub fn new(candidate: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            candidate: candidate.into(),
            reason,
        }
    }
}

/// Result of analyzing one candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Analyzed(Box<AnalysisResult>),
    Skipped(Skipped),
}

/// Order results by ROI, highest first, undefined ROI last.
///
/// The sort is stable, so equal ROIs keep their input order.
pub fn rank(results: &mut [AnalysisResult]) {
    results.sort_by(|a, b| compare_roi(a.roi, b.roi));
}

fn compare_roi(a: Option<Decimal>, b: Option<Decimal>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recipe::Variant;
    use rust_decimal_macros::dec;

    fn result(candidate: &str, roi: Option<Decimal>) -> AnalysisResult {
        AnalysisResult {
            candidate: candidate.into(),
            recipe: NormalizedRecipe::new(candidate, Variant::Specialized),
            cost: Money::ZERO,
            cost_fiat: Decimal::ZERO,
            breakdown: CostBreakdown::default(),
            market_price: Money::ZERO,
            market_price_primary: Decimal::ZERO,
            key_rate: None,
            profit: Decimal::ZERO,
            profit_fiat: Decimal::ZERO,
            roi,
            reference_url: String::new(),
        }
    }

    #[test]
    fn roi_is_percentage_of_cost() {
        assert_eq!(roi(dec!(5), dec!(20)), Some(dec!(25)));
        assert_eq!(roi(dec!(-10), dec!(40)), Some(dec!(-25)));
    }

    #[test]
    fn roi_is_undefined_for_zero_cost() {
        assert_eq!(roi(dec!(70), Decimal::ZERO), None);
    }

    #[test]
    fn roi_out_of_range_is_undefined() {
        assert_eq!(roi(Decimal::MAX, dec!(1)), None);
    }

    #[test]
    fn rank_orders_by_roi_with_undefined_last() {
        let mut results = vec![
            result("a", None),
            result("b", Some(dec!(10))),
            result("c", Some(dec!(-5))),
            result("d", Some(dec!(42))),
        ];

        rank(&mut results);

        let order: Vec<_> = results.iter().map(|r| r.candidate.as_str()).collect();
        assert_eq!(order, ["d", "b", "c", "a"]);
    }

    #[test]
    fn rank_is_stable_for_equal_roi() {
        let mut results = vec![
            result("first", Some(dec!(10))),
            result("none-1", None),
            result("second", Some(dec!(10))),
            result("none-2", None),
            result("third", Some(dec!(10.0))),
        ];

        rank(&mut results);

        let order: Vec<_> = results.iter().map(|r| r.candidate.as_str()).collect();
        assert_eq!(order, ["first", "second", "third", "none-1", "none-2"]);
    }

    #[test]
    fn price_in_keys_uses_recorded_rate() {
        let mut analyzed = result("x", None);
        analyzed.market_price_primary = dec!(120);
        analyzed.key_rate = Some(KeyRate::try_new(dec!(60)).unwrap());

        assert_eq!(analyzed.market_price_in_keys(), Some(dec!(2)));
    }

    #[test]
    fn skip_reasons_render_for_summary() {
        assert_eq!(SkipReason::UnrecognizedName.to_string(), "unparseable name");
        assert_eq!(SkipReason::InputsUnavailable.to_string(), "inputs unavailable");
        assert_eq!(SkipReason::NoMarketPrice.to_string(), "no market price");
    }
}
