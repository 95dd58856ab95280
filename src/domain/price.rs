//! Price expression parser.
//!
//! Market listings quote prices as free text such as `"5 ref"`,
//! `"1.33 refined"`, `"2 keys"` or `"2 keys, 3.11 ref"`. [`parse`] turns such an
//! expression into a [`Money`] value without converting units; callers fold the
//! key component into ref with a [`KeyRate`] once one is available.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::error::PriceParseError;
use super::money::{KeyRate, Money, Refined};

const KEY_TOKEN: &str = "key";

/// Primary-unit labels, longest first so `refined` is not cut to `ined`.
const PRIMARY_LABELS: [&str; 2] = ["refined", "ref"];

/// Parse a price expression into its key and ref components.
///
/// Matching is case-insensitive and ignores surrounding whitespace. An empty
/// expression is zero. Any component that is not a non-negative decimal makes
/// the whole expression [`PriceParseError::Invalid`].
pub fn parse(expr: &str) -> Result<Money, PriceParseError> {
    let normalized = expr.trim().to_lowercase();
    if normalized.is_empty() {
        return Ok(Money::ZERO);
    }

    let invalid = || PriceParseError::Invalid {
        expr: expr.to_string(),
    };

    if let Some(at) = normalized.find(KEY_TOKEN) {
        let keys = parse_number(&normalized[..at]).ok_or_else(invalid)?;

        let rest = &normalized[at + KEY_TOKEN.len()..];
        let rest = rest.strip_prefix('s').unwrap_or(rest).trim_start();
        let rest = rest.strip_prefix(',').unwrap_or(rest).trim();

        let primary = if rest.is_empty() {
            Decimal::ZERO
        } else {
            parse_primary(rest).ok_or_else(invalid)?
        };
        return Ok(Money::with_keys(keys, primary));
    }

    parse_primary(&normalized)
        .map(Money::primary)
        .ok_or_else(invalid)
}

/// Parse a price expression straight into ref.
///
/// Key-denominated expressions need `rate`; without one the result is
/// [`PriceParseError::MissingRate`]; a total too large to represent is
/// [`PriceParseError::Invalid`].
pub fn parse_in_primary(expr: &str, rate: Option<KeyRate>) -> Result<Refined, PriceParseError> {
    let money = parse(expr)?;
    match (money.primary_only(), rate) {
        (Some(primary), _) => Ok(primary),
        (None, Some(rate)) => money.in_primary(rate).ok_or_else(|| PriceParseError::Invalid {
            expr: expr.to_string(),
        }),
        (None, None) => Err(PriceParseError::MissingRate {
            expr: expr.to_string(),
        }),
    }
}

fn parse_primary(text: &str) -> Option<Decimal> {
    let text = text.trim();
    let number = PRIMARY_LABELS
        .iter()
        .find_map(|label| text.strip_suffix(label))
        .unwrap_or(text);
    parse_number(number)
}

fn parse_number(text: &str) -> Option<Decimal> {
    let value = Decimal::from_str(text.trim()).ok()?;
    (value >= Decimal::ZERO).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rate(value: Decimal) -> KeyRate {
        KeyRate::try_new(value).unwrap()
    }

    #[test]
    fn pure_primary_amount() {
        let money = parse("5 ref").unwrap();

        assert_eq!(money.primary_component(), dec!(5));
        assert_eq!(money.keys(), Decimal::ZERO);
        assert_eq!(parse_in_primary("5 ref", None).unwrap(), dec!(5));
    }

    #[test]
    fn keys_with_residual_ref() {
        assert_eq!(
            parse_in_primary("2 keys, 3 ref", Some(rate(dec!(60.0)))).unwrap(),
            dec!(123)
        );
    }

    #[test]
    fn single_key_without_residual() {
        let money = parse("1 key").unwrap();

        assert_eq!(money.keys(), dec!(1));
        assert_eq!(money.in_primary(rate(dec!(59.11))), Some(dec!(59.11)));
    }

    #[test]
    fn matching_is_case_insensitive_and_trimmed() {
        let money = parse("  3 Keys, 1.33 REF ").unwrap();

        assert_eq!(money, Money::with_keys(dec!(3), dec!(1.33)));
    }

    #[test]
    fn refined_label_and_bare_number() {
        assert_eq!(parse("1.33 refined").unwrap(), Money::primary(dec!(1.33)));
        assert_eq!(parse("7").unwrap(), Money::primary(dec!(7)));
    }

    #[test]
    fn empty_expression_is_zero() {
        assert_eq!(parse("").unwrap(), Money::ZERO);
        assert_eq!(parse("   ").unwrap(), Money::ZERO);
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(matches!(
            parse("garbage"),
            Err(PriceParseError::Invalid { .. })
        ));
        assert!(matches!(
            parse("many keys"),
            Err(PriceParseError::Invalid { .. })
        ));
        assert!(matches!(
            parse("2 keys, lots of ref"),
            Err(PriceParseError::Invalid { .. })
        ));
        assert!(matches!(parse("-4 ref"), Err(PriceParseError::Invalid { .. })));
    }

    #[test]
    fn keys_without_rate_are_reported() {
        assert!(matches!(
            parse_in_primary("2 keys", None),
            Err(PriceParseError::MissingRate { .. })
        ));
    }

    #[test]
    fn key_total_beyond_decimal_range_is_invalid() {
        assert!(matches!(
            parse_in_primary("79228162514264337593543950335 keys", Some(rate(dec!(60)))),
            Err(PriceParseError::Invalid { .. })
        ));
    }
}
