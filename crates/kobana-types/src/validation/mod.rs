//! Pre-flight validation of request payloads.
//!
//! Validation runs entirely in memory, before any request leaves the process.
//! Each rule group is a pure function from the payload to the list of messages
//! it produces. The engine concatenates those lists in a fixed order, so every
//! applicable violation is reported in one pass and the same payload always
//! yields the same [`Validation`].
//!
//! # Rule Groups (charge PIX)
//!
//! 1. Required fields: `amount`, `payer`, `pix_account_uid`, `expire_at`, `external_id`
//! 2. `amount` type and minimum
//! 3. `payer`: document number and name, CPF/CNPJ checksum, e-mail, [`address`]
//! 4. `pix_account_uid` UUID shape
//! 5. `expire_at` ISO-8601 format
//! 6. `registration_kind` membership
//! 7. [`fee`] structures: fine, reduction, interest
//! 8. `tags` shape
//!
//! # Example
//!
//! ```
//! use kobana_types::validation::{ChargePixValidator, Validator};
//! use serde_json::json;
//!
//! let validation = ChargePixValidator.validate(&json!({ "amount": 0 }));
//! assert!(!validation.is_valid());
//! assert!(validation.errors().contains(&"payer is required".to_string()));
//! ```

pub mod address;
pub mod document;
pub mod fee;
pub mod helpers;
pub mod states;

use rust_decimal::Decimal;
use serde_json::Value;
use std::cmp::Ordering;

use crate::payload::{Payload, as_text, is_blank};
use crate::timestamp::is_iso8601;
use crate::util::NumberLike;
use helpers::{is_email, is_uuid};

#[cfg(feature = "telemetry")]
use tracing::instrument;

/// Fields that must be present in every charge, in reporting order.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "amount",
    "payer",
    "pix_account_uid",
    "expire_at",
    "external_id",
];

/// Accepted values for `registration_kind`.
pub const REGISTRATION_KINDS: [&str; 2] = ["instant", "billing"];

/// The registration kind that requires a full payer address.
pub const BILLING: &str = "billing";

/// Outcome of validating one payload.
///
/// Holds every violation message in the order the rules produced them. An empty
/// list means the payload is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    errors: Vec<String>,
}

impl Validation {
    pub fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// All messages joined with `", "`.
    pub fn error_messages(&self) -> String {
        self.errors.join(", ")
    }

    /// Converts into a `Result`, failing with the full message list.
    pub fn into_result(self) -> Result<(), ValidationFailed> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ValidationFailed {
                errors: self.errors,
            })
        }
    }
}

impl FromIterator<String> for Validation {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A payload broke one or more rules.
///
/// Carries every message from a single validation pass, never just the first.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Validation failed: {}", .errors.join(", "))]
pub struct ValidationFailed {
    errors: Vec<String>,
}

impl ValidationFailed {
    /// HTTP-style status attached to validation failures.
    pub const CODE: u16 = 422;

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    pub fn code(&self) -> u16 {
        Self::CODE
    }
}

impl From<Vec<String>> for ValidationFailed {
    fn from(errors: Vec<String>) -> Self {
        Self { errors }
    }
}

/// Pre-flight checks for one request kind.
pub trait Validator {
    /// Checks `payload` without modifying it.
    fn validate(&self, payload: &Value) -> Validation;

    /// Succeeds when [`Validator::validate`] finds nothing.
    fn call(&self, payload: &Value) -> Result<(), ValidationFailed> {
        self.validate(payload).into_result()
    }
}

/// Validator for request kinds that have no pre-flight rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Validator for AcceptAll {
    fn validate(&self, _payload: &Value) -> Validation {
        Validation::default()
    }
}

/// Validator for the charge PIX request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChargePixValidator;

impl Validator for ChargePixValidator {
    #[cfg_attr(feature = "telemetry", instrument(name = "kobana.validate.charge_pix", skip_all))]
    fn validate(&self, payload: &Value) -> Validation {
        let payload = Payload::new(payload);
        let validation: Validation = [
            check_required(payload),
            check_amount(payload),
            check_payer(payload),
            check_pix_account_uid(payload),
            check_expire_at(payload),
            check_registration_kind(payload),
            fee::FINE.check(payload),
            fee::REDUCTION.check(payload),
            fee::INTEREST.check(payload),
            check_tags(payload),
        ]
        .into_iter()
        .flatten()
        .collect();
        #[cfg(feature = "telemetry")]
        tracing::debug!(errors = validation.errors().len(), "Validated charge payload");
        validation
    }
}

fn check_required(payload: Payload<'_>) -> Vec<String> {
    REQUIRED_FIELDS
        .iter()
        .filter(|field| payload.field(field).is_none())
        .map(|field| format!("{field} is required"))
        .collect()
}

fn check_amount(payload: Payload<'_>) -> Vec<String> {
    let Some(amount) = payload.field("amount") else {
        return Vec::new();
    };
    let Value::Number(number) = amount else {
        return vec!["amount must be a number".to_string()];
    };
    let minimum = Decimal::new(1, 2);
    match NumberLike::from_number(number).and_then(|value| value.cmp_decimal(minimum)) {
        Some(Ordering::Greater | Ordering::Equal) => Vec::new(),
        _ => vec!["amount must be greater than or equal to 0.01".to_string()],
    }
}

fn check_payer(payload: Payload<'_>) -> Vec<String> {
    let Some(payer) = payload.field("payer") else {
        return Vec::new();
    };
    if !payer.is_object() {
        return vec!["payer must be an object".to_string()];
    }
    let payer = Payload::new(payer);
    let mut errors = Vec::new();

    let document_number = payer.field("document_number");
    if is_blank(document_number) {
        errors.push("payer.document_number is required".to_string());
    }
    if is_blank(payer.field("name")) {
        errors.push("payer.name is required".to_string());
    }
    let document_valid = document_number
        .and_then(as_text)
        .is_some_and(|text| document::is_cpf_or_cnpj(&text));
    if !document_valid {
        errors.push(
            "payer.document_number must be a valid CPF (11 digits) or CNPJ (14 digits)".to_string(),
        );
    }
    if let Some(email) = payer.field("email") {
        let valid = matches!(email, Value::String(s) if is_email(s));
        if !valid {
            errors.push("payer.email must be a valid email address".to_string());
        }
    }
    if let Some(address) = payer.field("address") {
        errors.extend(address::check_address(address, is_billing(payload)));
    }
    errors
}

// A missing value was already reported by `check_required`.
fn check_pix_account_uid(payload: Payload<'_>) -> Vec<String> {
    let Some(uid) = payload.field("pix_account_uid") else {
        return Vec::new();
    };
    match as_text(uid) {
        Some(text) if text.trim().is_empty() => vec!["pix_account_uid is required".to_string()],
        Some(text) if is_uuid(&text) => Vec::new(),
        _ => vec!["pix_account_uid must be a valid UUID".to_string()],
    }
}

fn check_expire_at(payload: Payload<'_>) -> Vec<String> {
    let Some(expire_at) = payload.field("expire_at") else {
        return Vec::new();
    };
    match expire_at {
        Value::String(s) if s.trim().is_empty() => vec!["expire_at is required".to_string()],
        Value::String(s) if is_iso8601(s) => Vec::new(),
        _ => vec!["expire_at must be in ISO8601 format (e.g., 2024-12-31T23:59:59Z)".to_string()],
    }
}

fn check_registration_kind(payload: Payload<'_>) -> Vec<String> {
    let Some(kind) = payload.field("registration_kind") else {
        return Vec::new();
    };
    let known = matches!(kind, Value::String(s) if REGISTRATION_KINDS.contains(&s.as_str()));
    if known {
        Vec::new()
    } else {
        vec![format!(
            "registration_kind must be one of: {}",
            REGISTRATION_KINDS.join(", ")
        )]
    }
}

fn check_tags(payload: Payload<'_>) -> Vec<String> {
    let Some(tags) = payload.field("tags") else {
        return Vec::new();
    };
    let Value::Array(tags) = tags else {
        return vec!["tags must be an array".to_string()];
    };
    tags.iter()
        .enumerate()
        .filter(|(_, tag)| !tag.is_string())
        .map(|(index, _)| format!("tags[{index}] must be a string"))
        .collect()
}

fn is_billing(payload: Payload<'_>) -> bool {
    payload.field("registration_kind").and_then(Value::as_str) == Some(BILLING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "amount": 100.50,
            "payer": {
                "document_number": "57345658570",
                "name": "John Doe",
                "email": "test@example.com"
            },
            "pix_account_uid": "550e8400-e29b-41d4-a716-446655440000",
            "external_id": "external-123",
            "expire_at": "2024-12-31T23:59:59Z"
        })
    }

    fn errors_for(payload: Value) -> Vec<String> {
        ChargePixValidator.validate(&payload).errors().to_vec()
    }

    #[test]
    fn test_valid_payload() {
        let validation = ChargePixValidator.validate(&valid_payload());
        assert!(validation.is_valid(), "{:?}", validation.errors());
        assert_eq!(validation.error_messages(), "");
        assert!(validation.into_result().is_ok());
    }

    #[test]
    fn test_all_required_reported_together() {
        assert_eq!(
            errors_for(json!({})),
            vec![
                "amount is required",
                "payer is required",
                "pix_account_uid is required",
                "expire_at is required",
                "external_id is required",
            ]
        );
    }

    #[test]
    fn test_null_counts_as_missing() {
        let mut payload = valid_payload();
        payload["external_id"] = Value::Null;
        assert_eq!(errors_for(payload), vec!["external_id is required"]);
    }

    #[test]
    fn test_non_object_payload() {
        assert_eq!(errors_for(json!("charge")).len(), 5);
    }

    #[test]
    fn test_amount_rules() {
        let mut payload = valid_payload();
        payload["amount"] = json!(0.01);
        assert!(errors_for(payload.clone()).is_empty());

        payload["amount"] = json!(0.009999);
        assert_eq!(
            errors_for(payload.clone()),
            vec!["amount must be greater than or equal to 0.01"]
        );

        payload["amount"] = json!(0);
        assert_eq!(
            errors_for(payload.clone()),
            vec!["amount must be greater than or equal to 0.01"]
        );

        payload["amount"] = json!(-5);
        assert_eq!(
            errors_for(payload.clone()),
            vec!["amount must be greater than or equal to 0.01"]
        );

        payload["amount"] = json!("100");
        assert_eq!(errors_for(payload), vec!["amount must be a number"]);
    }

    #[test]
    fn test_amount_outside_decimal_range() {
        for tiny in [json!(1e-30), json!(1e-29), json!(5e-300), json!(-1e30)] {
            let mut payload = valid_payload();
            payload["amount"] = tiny;
            assert_eq!(
                errors_for(payload),
                vec!["amount must be greater than or equal to 0.01"]
            );
        }
        let mut payload = valid_payload();
        payload["amount"] = json!(1e30);
        assert!(errors_for(payload).is_empty());
    }

    #[test]
    fn test_payer_not_an_object() {
        let mut payload = valid_payload();
        payload["payer"] = json!("John Doe");
        assert_eq!(errors_for(payload), vec!["payer must be an object"]);
    }

    #[test]
    fn test_missing_document_also_fails_checksum() {
        let mut payload = valid_payload();
        payload["payer"].as_object_mut().unwrap().remove("document_number");
        assert_eq!(
            errors_for(payload),
            vec![
                "payer.document_number is required",
                "payer.document_number must be a valid CPF (11 digits) or CNPJ (14 digits)",
            ]
        );
    }

    #[test]
    fn test_empty_email_is_checked() {
        let mut payload = valid_payload();
        payload["payer"]["email"] = json!("");
        assert_eq!(
            errors_for(payload),
            vec!["payer.email must be a valid email address"]
        );
    }

    #[test]
    fn test_pix_account_uid() {
        let mut payload = valid_payload();
        payload["pix_account_uid"] = json!("   ");
        assert_eq!(errors_for(payload.clone()), vec!["pix_account_uid is required"]);

        payload["pix_account_uid"] = json!("not-a-uuid");
        assert_eq!(
            errors_for(payload.clone()),
            vec!["pix_account_uid must be a valid UUID"]
        );

        payload["pix_account_uid"] = json!(42);
        assert_eq!(
            errors_for(payload.clone()),
            vec!["pix_account_uid must be a valid UUID"]
        );

        payload["pix_account_uid"] = json!("550E8400-E29B-41D4-A716-446655440000");
        assert!(errors_for(payload).is_empty());
    }

    #[test]
    fn test_expire_at() {
        let mut payload = valid_payload();
        payload["expire_at"] = json!("");
        assert_eq!(errors_for(payload.clone()), vec!["expire_at is required"]);

        payload["expire_at"] = json!("2024/12/31");
        assert_eq!(
            errors_for(payload.clone()),
            vec!["expire_at must be in ISO8601 format (e.g., 2024-12-31T23:59:59Z)"]
        );

        payload["expire_at"] = json!(1735689599);
        assert_eq!(
            errors_for(payload.clone()),
            vec!["expire_at must be in ISO8601 format (e.g., 2024-12-31T23:59:59Z)"]
        );

        payload["expire_at"] = json!("2024-12-31T23:59:59+00:00");
        assert!(errors_for(payload).is_empty());
    }

    #[test]
    fn test_registration_kind() {
        let mut payload = valid_payload();
        payload["registration_kind"] = json!("instant");
        assert!(errors_for(payload.clone()).is_empty());

        payload["registration_kind"] = json!("scheduled");
        assert_eq!(
            errors_for(payload.clone()),
            vec!["registration_kind must be one of: instant, billing"]
        );

        payload["registration_kind"] = json!(1);
        assert_eq!(
            errors_for(payload),
            vec!["registration_kind must be one of: instant, billing"]
        );
    }

    #[test]
    fn test_tags() {
        let mut payload = valid_payload();
        payload["tags"] = json!(["a", "b"]);
        assert!(errors_for(payload.clone()).is_empty());

        payload["tags"] = json!([]);
        assert!(errors_for(payload.clone()).is_empty());

        payload["tags"] = json!(["a", 123, null]);
        assert_eq!(
            errors_for(payload.clone()),
            vec!["tags[1] must be a string", "tags[2] must be a string"]
        );

        payload["tags"] = json!("not-an-array");
        assert_eq!(errors_for(payload), vec!["tags must be an array"]);
    }

    #[test]
    fn test_rule_groups_do_not_short_circuit() {
        let payload = json!({
            "amount": "lots",
            "payer": { "document_number": "12345678900", "name": "" },
            "pix_account_uid": "nope",
            "expire_at": "tomorrow",
            "external_id": "ext",
            "registration_kind": "express",
            "fine_type": 7,
            "reduction_type": 1,
            "interest_type": 2,
            "interest_percentage": 120,
            "tags": [1]
        });
        assert_eq!(
            errors_for(payload),
            vec![
                "amount must be a number",
                "payer.name is required",
                "payer.document_number must be a valid CPF (11 digits) or CNPJ (14 digits)",
                "pix_account_uid must be a valid UUID",
                "expire_at must be in ISO8601 format (e.g., 2024-12-31T23:59:59Z)",
                "registration_kind must be one of: instant, billing",
                "fine_type must be 0 (none), 1 (value), or 2 (percentage)",
                "reduction_amount is required when reduction_type is 1",
                "interest_percentage must be between 0 and 100",
                "tags[0] must be a string",
            ]
        );
    }

    #[test]
    fn test_validation_failed_carries_all_messages() {
        let failed = ChargePixValidator.call(&json!({})).unwrap_err();
        assert_eq!(failed.errors().len(), 5);
        assert_eq!(failed.code(), 422);
        assert!(
            failed
                .to_string()
                .starts_with("Validation failed: amount is required, payer is required")
        );
    }

    #[test]
    fn test_accept_all() {
        assert!(AcceptAll.validate(&json!(null)).is_valid());
        assert!(AcceptAll.call(&json!({ "anything": 1 })).is_ok());
    }

    #[test]
    fn test_idempotent() {
        let payload = json!({ "amount": 0, "tags": "x" });
        let first = ChargePixValidator.validate(&payload);
        let second = ChargePixValidator.validate(&payload);
        assert_eq!(first, second);
    }
}
