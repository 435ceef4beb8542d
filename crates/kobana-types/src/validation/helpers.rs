//! Stateless format predicates shared by the validators.
//!
//! Every predicate takes text and answers `true`/`false`; none of them panics.
//! [`text_matches`] lifts a predicate to arbitrary JSON so that booleans, arrays
//! or objects degrade to "invalid" instead of being coerced.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::payload::as_text;

pub use super::states::is_brazilian_state;

static UUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\A[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}\z")
        .expect("valid regex")
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\A[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+\z",
    )
    .expect("valid regex")
});

/// Number of digits in a CEP.
pub const CEP_DIGITS: usize = 8;

/// `true` iff `value` has the textual UUID shape `8-4-4-4-12` hex digits, any case.
pub fn is_uuid(value: &str) -> bool {
    UUID.is_match(value)
}

/// `true` iff exactly eight digits remain after dropping every non-digit.
///
/// Accepts `"12345678"`, `"12345-678"` and `"12.345-678"`.
pub fn is_brazilian_zip(value: &str) -> bool {
    only_digits(value).len() == CEP_DIGITS
}

/// `true` for a plausibly deliverable address: `local@domain.tld`, no whitespace.
pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Applies a text predicate to a string or number value; anything else is invalid.
pub fn text_matches(value: &Value, predicate: impl Fn(&str) -> bool) -> bool {
    as_text(value).is_some_and(|text| predicate(&text))
}

/// Keeps only ASCII digits, as used by CEP and CPF/CNPJ normalization.
pub fn only_digits(value: &str) -> Vec<u32> {
    value.chars().filter_map(|c| c.to_digit(10)).collect()
}
