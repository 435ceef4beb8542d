//! Wire format types for Kobana requests.
//!
//! These structs describe the JSON bodies sent to the Kobana API. Every field
//! the caller may leave out is an `Option` and is omitted from the serialized
//! body when absent, so a body never carries `null` placeholders.
//!
//! # Key Types
//!
//! - [`ChargePixBody`] - Body of `POST /v2/charge/pix`
//! - [`PayerBody`] / [`AddressBody`] - Payer data nested in a charge
//! - [`CreatePixAccountBody`] - Body of `POST /v2/charge/pix_accounts`
//! - [`Scalar`] - A value the API accepts either as a string or as a number
//!
//! # Wire Format
//!
//! Field names are snake_case, matching the request payload keys.
//!
//! ```json
//! {
//!   "amount": 100.5,
//!   "payer": { "document_number": "57345658570", "name": "John Doe" },
//!   "pix_account_uid": "550e8400-e29b-41d4-a716-446655440000",
//!   "external_id": "external-123",
//!   "expire_at": "2024-12-31T23:59:59Z",
//!   "registration_kind": "instant",
//!   "reduction_type": 0,
//!   "interest_type": 0
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Number, Value};
use serde_with::skip_serializing_none;
use std::fmt;
use std::fmt::Display;

/// A value accepted either as JSON text or as a JSON number.
///
/// Serializes back in the representation it was read in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(Number),
    Text(String),
}

impl Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{n}"),
            Scalar::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Scalar::Number(value.into())
    }
}

/// Body of a charge PIX request.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChargePixBody {
    pub amount: Option<Number>,
    pub payer: Option<PayerBody>,
    pub pix_account_uid: Option<String>,
    pub external_id: Option<Scalar>,
    pub expire_at: Option<String>,
    pub txid: Option<String>,
    pub revoke_days: Option<u32>,
    pub message: Option<String>,
    pub additional_info: Option<Value>,
    pub custom_data: Option<Value>,
    /// `"instant"` or `"billing"`.
    pub registration_kind: Option<String>,
    #[serde(default, deserialize_with = "fee_type")]
    pub fine_type: Option<u8>,
    pub fine_amount: Option<Scalar>,
    pub fine_percentage: Option<Scalar>,
    #[serde(default, deserialize_with = "fee_type")]
    pub reduction_type: Option<u8>,
    pub reduction_amount: Option<Scalar>,
    pub reduction_percentage: Option<Scalar>,
    #[serde(default, deserialize_with = "fee_type")]
    pub interest_type: Option<u8>,
    pub interest_amount: Option<Scalar>,
    pub interest_percentage: Option<Scalar>,
    pub tags: Option<Vec<String>>,
}

/// The payer of a charge.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayerBody {
    /// CPF or CNPJ, with or without punctuation.
    pub document_number: Option<Scalar>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<AddressBody>,
}

/// Postal address of a payer.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressBody {
    pub street: Option<String>,
    pub zip_code: Option<Scalar>,
    pub complement: Option<String>,
    pub number: Option<Scalar>,
    pub neighborhood: Option<String>,
    pub city_name: Option<String>,
    /// Two-letter UF code.
    pub state: Option<String>,
}

/// Body of a create PIX account request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePixAccountBody {
    pub custom_name: String,
    pub financial_provider_slug: String,
    /// The PIX key (e-mail, phone, CPF/CNPJ or random key).
    pub key: String,
    pub enabled: bool,
    pub default: bool,
}

impl Default for CreatePixAccountBody {
    fn default() -> Self {
        Self {
            custom_name: defaults::CUSTOM_NAME.to_string(),
            financial_provider_slug: defaults::PROVIDER_SLUG.to_string(),
            key: defaults::PIX_KEY.to_string(),
            enabled: true,
            default: true,
        }
    }
}

/// Values filled in when a request omits them.
pub mod defaults {
    pub const REGISTRATION_KIND: &str = "instant";
    pub const FEE_TYPE: u8 = 0;
    pub const CUSTOM_NAME: &str = "Conta principal";
    pub const PROVIDER_SLUG: &str = "example_bank";
    pub const PIX_KEY: &str = "keyexample@email.com";
}

/// Fee type codes are integers on the wire; integral floats such as `1.0` are
/// accepted on input.
fn fee_type<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(number) = Option::<Number>::deserialize(deserializer)? else {
        return Ok(None);
    };
    number
        .as_u64()
        .or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                .map(|f| f as u64)
        })
        .and_then(|code| u8::try_from(code).ok())
        .map(Some)
        .ok_or_else(|| de::Error::custom(format!("invalid fee type code: {number}")))
}
