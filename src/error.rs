//! Errors raised by the Kobana facade.

use kobana_types::translate::TranslateError;
use kobana_types::validation::ValidationFailed;

/// Any failure while configuring the client or preparing a request.
#[derive(Debug, thiserror::Error)]
pub enum KobanaError {
    /// The payload broke one or more pre-flight rules.
    #[error(transparent)]
    Validation(#[from] ValidationFailed),
    #[error("API key is required")]
    MissingApiKey,
    #[error(transparent)]
    Translate(#[from] TranslateError),
    #[error("Can not serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl KobanaError {
    /// Status code reported alongside the error: 422 for validation failures,
    /// 500 for everything else.
    pub fn code(&self) -> u16 {
        match self {
            KobanaError::Validation(failed) => failed.code(),
            _ => 500,
        }
    }

    /// Validation messages, if this is a validation failure.
    pub fn validation_errors(&self) -> Option<&[String]> {
        match self {
            KobanaError::Validation(failed) => Some(failed.errors()),
            _ => None,
        }
    }
}
