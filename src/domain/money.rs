//! Two-unit currency model.
//!
//! Prices in the TF2 economy are quoted in refined metal (`ref`, the primary
//! unit) and Mann Co. Supply Crate Keys (the secondary unit). A [`Money`]
//! value keeps both components as quoted; [`Money::in_primary`] folds the key
//! component into ref using a [`KeyRate`].

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use super::error::DomainError;

/// Amount in the primary unit (refined metal).
pub type Refined = Decimal;

/// Number of refined metal one key is worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct KeyRate(Decimal);

impl KeyRate {
    /// Rate assumed when no rate is configured and none can be fetched.
    pub const DEFAULT_FALLBACK: Self = Self(Decimal::from_parts(60, 0, 0, false, 0));

    /// Create a key rate, rejecting zero and negative values.
    pub fn try_new(rate: Decimal) -> Result<Self, DomainError> {
        if rate <= Decimal::ZERO {
            return Err(DomainError::NonPositiveKeyRate { rate });
        }
        Ok(Self(rate))
    }

    /// Refined metal per key.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for KeyRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} ref", self.0)
    }
}

/// An amount quoted as `keys` plus a residual `primary` (ref) component.
///
/// Either component may be zero. Costs computed from the part table only
/// ever carry a primary component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Money {
    primary: Refined,
    keys: Decimal,
}

impl Money {
    /// The zero amount.
    pub const ZERO: Self = Self {
        primary: Decimal::ZERO,
        keys: Decimal::ZERO,
    };

    /// An amount denominated purely in ref.
    #[must_use]
    pub const fn primary(amount: Refined) -> Self {
        Self {
            primary: amount,
            keys: Decimal::ZERO,
        }
    }

    /// An amount of `keys` plus a residual `primary` ref component.
    #[must_use]
    pub const fn with_keys(keys: Decimal, primary: Refined) -> Self {
        Self { primary, keys }
    }

    /// The ref component.
    #[must_use]
    pub const fn primary_component(&self) -> Refined {
        self.primary
    }

    /// The key component.
    #[must_use]
    pub const fn keys(&self) -> Decimal {
        self.keys
    }

    /// Whether converting this amount to ref requires a key rate.
    #[must_use]
    pub fn needs_rate(&self) -> bool {
        !self.keys.is_zero()
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.primary.is_zero() && self.keys.is_zero()
    }

    /// Total value in ref: `primary + keys * rate`.
    ///
    /// `None` when the total does not fit in a `Decimal`.
    #[must_use]
    pub fn in_primary(&self, rate: KeyRate) -> Option<Refined> {
        self.keys
            .checked_mul(rate.value())
            .and_then(|keys| self.primary.checked_add(keys))
    }

    /// Total value in ref when no key component is present.
    ///
    /// Returns `None` if the amount carries keys.
    #[must_use]
    pub fn primary_only(&self) -> Option<Refined> {
        if self.needs_rate() {
            None
        } else {
            Some(self.primary)
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.keys.is_zero(), self.primary.is_zero()) {
            (true, _) => write!(f, "{:.2} ref", self.primary),
            (false, true) => write!(f, "{} keys", self.keys.normalize()),
            (false, false) => write!(f, "{} keys, {:.2} ref", self.keys.normalize(), self.primary),
        }
    }
}

/// Convert a ref amount into a fiat display amount, `None` on overflow.
#[must_use]
pub fn to_fiat(amount: Refined, fiat_per_primary: Decimal) -> Option<Decimal> {
    amount.checked_mul(fiat_per_primary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn key_rate_rejects_non_positive() {
        assert!(KeyRate::try_new(dec!(0)).is_err());
        assert!(KeyRate::try_new(dec!(-1)).is_err());
        assert_eq!(KeyRate::try_new(dec!(59.11)).unwrap().value(), dec!(59.11));
    }

    #[test]
    fn in_primary_folds_keys() {
        let rate = KeyRate::try_new(dec!(60)).unwrap();
        let money = Money::with_keys(dec!(2), dec!(3));

        assert_eq!(money.in_primary(rate), Some(dec!(123)));
        assert!(money.needs_rate());
        assert_eq!(money.primary_only(), None);
    }

    #[test]
    fn primary_amount_needs_no_rate() {
        let money = Money::primary(dec!(5));

        assert!(!money.needs_rate());
        assert_eq!(money.primary_only(), Some(dec!(5)));
        assert_eq!(money.keys(), Decimal::ZERO);
    }

    #[test]
    fn display_formats_both_units() {
        assert_eq!(Money::primary(dec!(3.3)).to_string(), "3.30 ref");
        assert_eq!(Money::with_keys(dec!(2), dec!(0)).to_string(), "2 keys");
        assert_eq!(
            Money::with_keys(dec!(1.5), dec!(4)).to_string(),
            "1.5 keys, 4.00 ref"
        );
    }

    #[test]
    fn fiat_conversion_scales_ref() {
        assert_eq!(to_fiat(dec!(10), dec!(0.03)), Some(dec!(0.30)));
        assert_eq!(to_fiat(Decimal::MAX, dec!(2)), None);
    }

    #[test]
    fn oversized_key_amount_does_not_fold() {
        let rate = KeyRate::try_new(dec!(60)).unwrap();

        assert_eq!(Money::with_keys(Decimal::MAX, dec!(0)).in_primary(rate), None);
        assert_eq!(Money::with_keys(dec!(1), Decimal::MAX).in_primary(rate), None);
    }
}
