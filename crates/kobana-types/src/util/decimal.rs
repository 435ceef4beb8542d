//! Number-like value parsing.
//!
//! Charge payloads carry monetary values and percentages either as JSON numbers
//! or, for the fee fields, as numeric strings. This module converts both into a
//! [`Decimal`] so range checks such as `>= 0.01` or `<= 100` compare exact
//! decimal values rather than binary floats.
//!
//! # Supported Formats
//!
//! - JSON integers and floats: `100`, `0.01`
//! - Scientific notation produced by float rendering: `1e-7`
//! - Numeric strings with surrounding whitespace: `" 10.50 "`
//!
//! # Example
//!
//! ```rust
//! use kobana_types::util::decimal::to_decimal;
//! use rust_decimal::Decimal;
//! use serde_json::json;
//!
//! assert_eq!(to_decimal(&json!(0.01)), Some(Decimal::new(1, 2)));
//! assert_eq!(to_decimal(&json!("10.50")), Some(Decimal::new(1050, 2)));
//! assert_eq!(to_decimal(&json!("ten")), None);
//! ```

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Number, Value};
use std::cmp::Ordering;
use std::str::FromStr;

/// Errors that can occur when parsing a number-like string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecimalParseError {
    /// Nothing left after trimming whitespace.
    #[error("Empty number")]
    Empty,
    /// The input string could not be parsed as a number.
    #[error("Invalid number format: {0}")]
    InvalidFormat(String),
}

/// Parses a plain or scientific-notation decimal string.
///
/// # Errors
///
/// Returns an error if the trimmed input is empty, is not a number, or does
/// not fit into a [`Decimal`].
pub fn parse_decimal(input: &str) -> Result<Decimal, DecimalParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DecimalParseError::Empty);
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| DecimalParseError::InvalidFormat(trimmed.to_string()))
}

/// Converts a JSON number into a [`Decimal`] through its shortest textual form.
///
/// Going through the text avoids the binary noise of `f64`: `0.01` stays
/// exactly `0.01`.
pub fn number_to_decimal(number: &Number) -> Option<Decimal> {
    parse_decimal(&number.to_string()).ok()
}

/// Converts a number or numeric string into a [`Decimal`].
///
/// Returns `None` for any other JSON type and for strings that do not parse.
pub fn to_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => number_to_decimal(n),
        Value::String(s) => parse_decimal(s).ok(),
        _ => None,
    }
}

/// A number-like value for range checks.
///
/// Values that fit a [`Decimal`] compare exactly. Finite values outside its
/// range or precision (`1e-30`, `1e30`) keep their `f64` approximation, so
/// they still compare on the correct side of a bound instead of being lost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberLike {
    Exact(Decimal),
    Approximate(f64),
}

impl NumberLike {
    pub fn from_number(number: &Number) -> Option<Self> {
        number_to_decimal(number)
            .map(NumberLike::Exact)
            .or_else(|| finite(number.as_f64()).map(NumberLike::Approximate))
    }

    /// Accepts JSON numbers and numeric strings; `None` for anything else.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Self::from_number(n),
            Value::String(s) => parse_decimal(s)
                .ok()
                .map(NumberLike::Exact)
                .or_else(|| finite(s.trim().parse::<f64>().ok()).map(NumberLike::Approximate)),
            _ => None,
        }
    }

    /// Orders this value against `bound`.
    pub fn cmp_decimal(&self, bound: Decimal) -> Option<Ordering> {
        match self {
            NumberLike::Exact(value) => Some(value.cmp(&bound)),
            NumberLike::Approximate(value) => value.partial_cmp(&bound.to_f64()?),
        }
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|f| f.is_finite())
}
