//! Read-only access to loosely typed request payloads.
//!
//! Request payloads arrive as arbitrary JSON. Validators must tell apart a key
//! that is absent, a key that is present but empty, and a key that holds a value
//! of the wrong type, without ever failing on unexpected shapes. [`Payload`]
//! wraps a borrowed [`serde_json::Value`] and exposes exactly those lookups.
//!
//! A JSON `null` is treated the same as a missing key.
//!
//! # Example
//!
//! ```
//! use kobana_types::payload::Payload;
//! use serde_json::json;
//!
//! let raw = json!({ "payer": { "name": "John Doe", "email": null } });
//! let payload = Payload::new(&raw);
//!
//! assert!(payload.path(&["payer", "name"]).is_some());
//! assert!(payload.path(&["payer", "email"]).is_none());
//! assert!(payload.field("amount").is_none());
//! ```

use serde_json::Value;
use std::borrow::Cow;

/// A borrowed, read-only view over a JSON request payload.
#[derive(Debug, Clone, Copy)]
pub struct Payload<'a>(&'a Value);

impl<'a> Payload<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self(value)
    }

    /// Returns the wrapped JSON value.
    pub fn as_value(&self) -> &'a Value {
        self.0
    }

    /// Looks up a top-level key. Missing keys, `null` values and non-object
    /// payloads all yield `None`.
    pub fn field(&self, key: &str) -> Option<&'a Value> {
        present(self.0.get(key))
    }

    /// Walks nested objects along `keys`, stopping at the first absent step.
    pub fn path(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .try_fold(self.0, |current, key| present(current.get(*key)))
    }
}

/// Filters out JSON `null`, which payloads use interchangeably with a missing key.
pub fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Textual form of a scalar: strings as-is, numbers via their JSON rendering.
///
/// Returns `None` for booleans, arrays, objects and `null`, so callers can
/// report such values as invalid instead of guessing a representation.
pub fn as_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        _ => None,
    }
}

/// `true` when a value is absent or is an empty string.
///
/// Non-string values are never blank: a number or an object is "something",
/// even when it turns out to be of the wrong type.
pub fn is_blank(value: Option<&Value>) -> bool {
    match present(value) {
        None => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_treats_null_as_absent() {
        let raw = json!({ "amount": null, "external_id": "ext-1" });
        let payload = Payload::new(&raw);
        assert!(payload.field("amount").is_none());
        assert_eq!(payload.field("external_id"), Some(&json!("ext-1")));
    }

    #[test]
    fn test_field_on_non_object_payload() {
        let raw = json!(["amount"]);
        let payload = Payload::new(&raw);
        assert!(payload.field("amount").is_none());
    }

    #[test]
    fn test_path_nested() {
        let raw = json!({ "payer": { "address": { "state": "SP" } } });
        let payload = Payload::new(&raw);
        assert_eq!(
            payload.path(&["payer", "address", "state"]),
            Some(&json!("SP"))
        );
        assert!(payload.path(&["payer", "address", "city_name"]).is_none());
        assert!(payload.path(&["payer", "name", "first"]).is_none());
    }

    #[test]
    fn test_as_text() {
        assert_eq!(as_text(&json!("abc")).as_deref(), Some("abc"));
        assert_eq!(as_text(&json!(12345678)).as_deref(), Some("12345678"));
        assert!(as_text(&json!(true)).is_none());
        assert!(as_text(&json!({})).is_none());
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some(&json!(null))));
        assert!(is_blank(Some(&json!(""))));
        assert!(!is_blank(Some(&json!(" "))));
        assert!(!is_blank(Some(&json!(0))));
    }
}
