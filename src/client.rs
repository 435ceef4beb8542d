//! Request preparation.
//!
//! [`KobanaClient`] turns a caller's payload into a [`PreparedRequest`]: the
//! payload is validated first, and only a valid payload is translated into the
//! wire body. Sending the request is left to the caller's HTTP stack.

use kobana_types::translate::Translator;
use kobana_types::validation::{Validation, Validator};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument};
use url::Url;

use crate::config::KobanaConfig;
use crate::error::KobanaError;
use crate::operation::{ChargePix, CreatePixAccount, Operation, RequestKind};

/// A validated, translated request ready for a transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedRequest {
    pub kind: RequestKind,
    pub method: &'static str,
    pub url: Url,
    /// `Bearer <api key>`.
    #[serde(skip_serializing)]
    pub authorization: String,
    pub body: Value,
}

impl PreparedRequest {
    /// Headers to send along with [`PreparedRequest::body`].
    pub fn headers(&self) -> [(&'static str, &str); 2] {
        [
            ("Authorization", self.authorization.as_str()),
            ("Content-Type", "application/json"),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct KobanaClient {
    config: KobanaConfig,
}

impl KobanaClient {
    pub fn new(config: KobanaConfig) -> Self {
        Self { config }
    }

    /// Builds a client from `KOBANA_API_KEY` and `KOBANA_ENV`.
    pub fn from_env() -> Result<Self, KobanaError> {
        KobanaConfig::from_env().map(Self::new)
    }

    pub fn config(&self) -> &KobanaConfig {
        &self.config
    }

    /// Validates and translates `payload` for the operation `O`.
    ///
    /// # Errors
    ///
    /// - [`KobanaError::Validation`] with every violated rule; nothing is
    ///   translated in that case.
    /// - [`KobanaError::Translate`] if the payload does not fit the wire body.
    /// - [`KobanaError::Serialize`] if the wire body does not serialize.
    #[instrument(skip_all, err, fields(kind = %O::KIND))]
    pub fn prepare<O: Operation>(&self, payload: &Value) -> Result<PreparedRequest, KobanaError> {
        O::validator().call(payload)?;
        let body = O::translator().translate(payload)?;
        let body = serde_json::to_value(body)?;
        let url = self.endpoint_url(O::KIND)?;
        info!(%url, "Prepared request");
        Ok(PreparedRequest {
            kind: O::KIND,
            method: "POST",
            url,
            authorization: format!("Bearer {}", self.config.api_key()),
            body,
        })
    }

    /// [`KobanaClient::prepare`] for a kind chosen at runtime.
    pub fn prepare_kind(
        &self,
        kind: RequestKind,
        payload: &Value,
    ) -> Result<PreparedRequest, KobanaError> {
        match kind {
            RequestKind::ChargePix => self.prepare::<ChargePix>(payload),
            RequestKind::CreatePixAccount => self.prepare::<CreatePixAccount>(payload),
        }
    }

    /// Absolute URL of a request kind in the configured environment.
    pub fn endpoint_url(&self, kind: RequestKind) -> Result<Url, KobanaError> {
        Ok(self.config.base_url()?.join(kind.endpoint())?)
    }
}

/// Runs only the validator of `kind`. Needs no configuration.
pub fn validate_kind(kind: RequestKind, payload: &Value) -> Validation {
    let validation = match kind {
        RequestKind::ChargePix => ChargePix::validator().validate(payload),
        RequestKind::CreatePixAccount => CreatePixAccount::validator().validate(payload),
    };
    debug!(%kind, valid = validation.is_valid(), "Validated payload");
    validation
}
