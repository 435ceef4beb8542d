//! Registry of the request kinds the client can prepare.
//!
//! Every request kind is bound at compile time to exactly one validator and one
//! translator through the [`Operation`] trait. Adding a request kind means adding
//! a [`RequestKind`] variant and an [`Operation`] implementation; there is no
//! lookup by name at runtime beyond parsing a [`RequestKind`] slug.

use kobana_types::translate::{ChargePixTranslator, CreatePixAccountTranslator, Translator};
use kobana_types::validation::{AcceptAll, ChargePixValidator, Validator};
use serde::Serialize;
use std::fmt;
use std::fmt::Display;
use std::str::FromStr;

/// Kinds of request known to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    ChargePix,
    CreatePixAccount,
}

struct RequestKindInfo {
    kind: RequestKind,
    slug: &'static str,
    endpoint: &'static str,
}

static REQUEST_KINDS: [RequestKindInfo; 2] = [
    RequestKindInfo {
        kind: RequestKind::ChargePix,
        slug: "charge-pix",
        endpoint: "/v2/charge/pix",
    },
    RequestKindInfo {
        kind: RequestKind::CreatePixAccount,
        slug: "create-pix-account",
        endpoint: "/v2/charge/pix_accounts",
    },
];

impl RequestKind {
    pub const ALL: [RequestKind; 2] = [RequestKind::ChargePix, RequestKind::CreatePixAccount];

    fn info(&self) -> &'static RequestKindInfo {
        match self {
            RequestKind::ChargePix => &REQUEST_KINDS[0],
            RequestKind::CreatePixAccount => &REQUEST_KINDS[1],
        }
    }

    /// API path, relative to the environment's base URL.
    pub fn endpoint(&self) -> &'static str {
        self.info().endpoint
    }

    pub fn slug(&self) -> &'static str {
        self.info().slug
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown request kind: {0}")]
pub struct UnknownRequestKind(String);

impl FromStr for RequestKind {
    type Err = UnknownRequestKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        REQUEST_KINDS
            .iter()
            .find(|info| info.slug == s)
            .map(|info| info.kind)
            .ok_or_else(|| UnknownRequestKind(s.to_string()))
    }
}

impl Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl Serialize for RequestKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.slug())
    }
}

/// Binds a [`RequestKind`] to its validator and translator.
pub trait Operation {
    const KIND: RequestKind;

    type Validator: Validator + Default;
    type Translator: Translator + Default;

    fn validator() -> Self::Validator {
        Self::Validator::default()
    }

    fn translator() -> Self::Translator {
        Self::Translator::default()
    }
}

/// `POST /v2/charge/pix`.
#[derive(Debug, Clone, Copy)]
pub struct ChargePix;

impl Operation for ChargePix {
    const KIND: RequestKind = RequestKind::ChargePix;
    type Validator = ChargePixValidator;
    type Translator = ChargePixTranslator;
}

/// `POST /v2/charge/pix_accounts`. Has no pre-flight rules.
#[derive(Debug, Clone, Copy)]
pub struct CreatePixAccount;

impl Operation for CreatePixAccount {
    const KIND: RequestKind = RequestKind::CreatePixAccount;
    type Validator = AcceptAll;
    type Translator = CreatePixAccountTranslator;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip() {
        for kind in RequestKind::ALL {
            assert_eq!(kind.to_string().parse::<RequestKind>(), Ok(kind));
        }
        assert_eq!(
            "charge-pix".parse::<RequestKind>(),
            Ok(RequestKind::ChargePix)
        );
        assert!("charge_pix".parse::<RequestKind>().is_err());
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(RequestKind::ChargePix.endpoint(), "/v2/charge/pix");
        assert_eq!(
            RequestKind::CreatePixAccount.endpoint(),
            "/v2/charge/pix_accounts"
        );
        assert_eq!(ChargePix::KIND, RequestKind::ChargePix);
        assert_eq!(CreatePixAccount::KIND, RequestKind::CreatePixAccount);
    }
}
