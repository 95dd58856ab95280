//! Domain validation errors.
//!
//! These errors are returned when domain invariants are violated or when raw
//! text (names, price strings) cannot be interpreted. None of them is fatal to
//! a batch; callers turn them into skip outcomes or zero values.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A key rate must be strictly positive.
    #[error("key rate must be positive, got {rate}")]
    NonPositiveKeyRate {
        /// The rejected rate.
        rate: Decimal,
    },

    /// Recipe input quantities must be strictly positive.
    #[error("quantity for {part} must be positive")]
    ZeroQuantity {
        /// The part the quantity was given for.
        part: String,
    },
}

/// A display name that matches none of the known fabricator templates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("not a recognized fabricator name: {raw}")]
pub struct NotRecognized {
    /// The name as it was given.
    pub raw: String,
}

/// Failure to interpret a price expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceParseError {
    /// A numeric component could not be parsed.
    #[error("invalid price expression: {expr:?}")]
    Invalid {
        /// The offending expression.
        expr: String,
    },

    /// The expression carries keys but no key rate was supplied.
    #[error("price {expr:?} is denominated in keys and no key rate is available")]
    MissingRate {
        /// The key-denominated expression.
        expr: String,
    },
}
