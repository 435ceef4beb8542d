//! Payer address rules.
//!
//! Billing charges need a full postal address; instant charges need none. A ZIP
//! code or state that is supplied must be well-formed whatever the registration
//! kind.

use serde_json::Value;

use super::helpers::{is_brazilian_state, is_brazilian_zip, text_matches};
use crate::payload::{is_blank, present};

/// Address fields a billing charge cannot go without, in reporting order.
pub const BILLING_REQUIRED_FIELDS: [&str; 6] = [
    "street",
    "zip_code",
    "number",
    "neighborhood",
    "city_name",
    "state",
];

/// Validates `address` (the value of `payer.address`).
///
/// `billing` tells whether the charge uses the billing registration kind. Under
/// billing every missing field in [`BILLING_REQUIRED_FIELDS`] is reported, not
/// just the first. A non-object address is reported once and not inspected.
pub fn check_address(address: &Value, billing: bool) -> Vec<String> {
    let Value::Object(fields) = address else {
        return vec!["payer.address must be an object".to_string()];
    };

    let missing: Vec<String> = if billing {
        BILLING_REQUIRED_FIELDS
            .iter()
            .filter(|field| is_blank(fields.get(**field)))
            .map(|field| format!("payer.address.{field} is required for billing registration_kind"))
            .collect()
    } else {
        Vec::new()
    };

    let zip_code = present(fields.get("zip_code"))
        .filter(|v| !text_matches(v, is_brazilian_zip))
        .map(|_| "payer.address.zip_code must be a valid Brazilian ZIP code (8 digits)".to_string());

    let state = present(fields.get("state"))
        .filter(|v| !text_matches(v, is_brazilian_state))
        .map(|_| "payer.address.state must be a valid Brazilian state code".to_string());

    missing.into_iter().chain(zip_code).chain(state).collect()
}
