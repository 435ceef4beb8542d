//! Translation of request payloads into Kobana wire bodies.
//!
//! A [`Translator`] reads the caller's original payload and produces the typed
//! body for one request kind, filling in the defaults the API expects when a
//! field is omitted. Translators run after validation and do not re-validate.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::proto::{ChargePixBody, CreatePixAccountBody, defaults};

#[cfg(feature = "telemetry")]
use tracing::instrument;

/// The payload could not be mapped onto the wire body.
#[derive(Debug, thiserror::Error)]
#[error("Can not translate {kind} payload: {source}")]
pub struct TranslateError {
    kind: &'static str,
    #[source]
    source: serde_json::Error,
}

impl TranslateError {
    pub fn new(kind: &'static str, source: serde_json::Error) -> Self {
        Self { kind, source }
    }

    /// Name of the request kind being translated.
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

/// Maps a payload to the wire body of one request kind.
pub trait Translator {
    type Body: Serialize;

    fn translate(&self, payload: &Value) -> Result<Self::Body, TranslateError>;
}

/// Builds a [`ChargePixBody`].
///
/// Defaults `registration_kind` to `"instant"` and both `reduction_type` and
/// `interest_type` to `0`. Unknown payload keys are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChargePixTranslator;

impl Translator for ChargePixTranslator {
    type Body = ChargePixBody;

    #[cfg_attr(feature = "telemetry", instrument(name = "kobana.translate.charge_pix", skip_all, err))]
    fn translate(&self, payload: &Value) -> Result<ChargePixBody, TranslateError> {
        let mut body =
            ChargePixBody::deserialize(payload).map_err(|e| TranslateError::new("charge pix", e))?;
        body.registration_kind
            .get_or_insert_with(|| defaults::REGISTRATION_KIND.to_string());
        body.reduction_type.get_or_insert(defaults::FEE_TYPE);
        body.interest_type.get_or_insert(defaults::FEE_TYPE);
        Ok(body)
    }
}

/// Input keys accepted by [`CreatePixAccountTranslator`].
#[derive(Debug, Default, Deserialize)]
struct CreatePixAccountInput {
    custom_name: Option<String>,
    provider_slug: Option<String>,
    key: Option<String>,
    enabled: Option<bool>,
    default: Option<bool>,
}

/// Builds a [`CreatePixAccountBody`].
///
/// The payload's `provider_slug` becomes `financial_provider_slug`. Omitted or
/// `null` fields take the values of [`CreatePixAccountBody::default`].
///
/// `enabled` and `default` fall back to `true` only when omitted or `null`. An
/// explicit `false` is sent as `false`, so a caller can create a disabled or
/// non-default account.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreatePixAccountTranslator;

impl Translator for CreatePixAccountTranslator {
    type Body = CreatePixAccountBody;

    #[cfg_attr(feature = "telemetry", instrument(name = "kobana.translate.create_pix_account", skip_all, err))]
    fn translate(&self, payload: &Value) -> Result<CreatePixAccountBody, TranslateError> {
        let input = if payload.is_null() {
            CreatePixAccountInput::default()
        } else {
            CreatePixAccountInput::deserialize(payload)
                .map_err(|e| TranslateError::new("create pix account", e))?
        };
        let fallback = CreatePixAccountBody::default();
        Ok(CreatePixAccountBody {
            custom_name: input.custom_name.unwrap_or(fallback.custom_name),
            financial_provider_slug: input
                .provider_slug
                .unwrap_or(fallback.financial_provider_slug),
            key: input.key.unwrap_or(fallback.key),
            enabled: input.enabled.unwrap_or(fallback.enabled),
            default: input.default.unwrap_or(fallback.default),
        })
    }
}
