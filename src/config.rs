//! Client configuration.
//!
//! A [`KobanaConfig`] holds the API key and the target [`Environment`]. It can
//! be built directly, read from the process environment, or loaded from a JSON
//! document whose values are either literals or environment references:
//!
//! ```json
//! {
//!   "api_key": "$KOBANA_API_KEY",
//!   "environment": "${KOBANA_ENV}"
//! }
//! ```
//!
//! Environment variables:
//! - `KOBANA_API_KEY` - API key (required)
//! - `KOBANA_ENV` - `production` or anything else for the sandbox

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::fmt::Display;
use std::fs;
use std::ops::Deref;
use std::path::Path;
use std::str::FromStr;
use url::Url;

use crate::error::KobanaError;

pub const API_KEY_VAR: &str = "KOBANA_API_KEY";
pub const ENVIRONMENT_VAR: &str = "KOBANA_ENV";

const PRODUCTION_URL: &str = "https://api.kobana.com.br";
const SANDBOX_URL: &str = "https://api-sandbox.kobana.com.br";

/// Target API environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    Production,
    /// The sandbox. Any name other than `production` selects it.
    #[default]
    Development,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Production => PRODUCTION_URL,
            Environment::Development => SANDBOX_URL,
        }
    }
}

impl FromStr for Environment {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("production") {
            Ok(Environment::Production)
        } else {
            Ok(Environment::Development)
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Development => write!(f, "development"),
        }
    }
}

impl Serialize for Environment {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A value given either literally or as a `$VAR` / `${VAR}` reference that is
/// resolved from the environment during deserialization.
///
/// Derefs to the inner value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralOrEnv<T>(T);

impl<T> LiteralOrEnv<T> {
    pub fn from_literal(value: T) -> Self {
        Self(value)
    }

    pub fn into_inner(self) -> T {
        self.0
    }

    /// Name of the referenced variable, if `s` is `$VAR` or `${VAR}`.
    fn env_var_name(s: &str) -> Option<&str> {
        if let Some(name) = s.strip_prefix("${").and_then(|rest| rest.strip_suffix('}')) {
            return Some(name);
        }
        s.strip_prefix('$')
            .filter(|name| !name.is_empty())
            .filter(|name| name.chars().all(|c| c.is_alphanumeric() || c == '_'))
    }
}

impl<T> Deref for LiteralOrEnv<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de, T> Deserialize<'de> for LiteralOrEnv<T>
where
    T: FromStr,
    T::Err: Display,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let value = match Self::env_var_name(&raw) {
            Some(name) => std::env::var(name).map_err(|_| {
                serde::de::Error::custom(format!(
                    "Environment variable '{name}' not found (referenced as '{raw}')"
                ))
            })?,
            None => raw,
        };
        value
            .parse::<T>()
            .map(LiteralOrEnv)
            .map_err(|e| serde::de::Error::custom(format!("Failed to parse value: {e}")))
    }
}

impl<T: Serialize> Serialize for LiteralOrEnv<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    api_key: Option<LiteralOrEnv<String>>,
    #[serde(default)]
    environment: Option<LiteralOrEnv<Environment>>,
}

/// Credentials and target environment for a [`crate::KobanaClient`].
#[derive(Clone, PartialEq, Eq)]
pub struct KobanaConfig {
    api_key: String,
    environment: Environment,
}

impl fmt::Debug for KobanaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KobanaConfig")
            .field("api_key", &"<redacted>")
            .field("environment", &self.environment)
            .finish()
    }
}

impl KobanaConfig {
    /// Builds a configuration from an explicit API key.
    ///
    /// # Errors
    ///
    /// [`KobanaError::MissingApiKey`] if the key is empty.
    pub fn new(api_key: impl Into<String>, environment: Environment) -> Result<Self, KobanaError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(KobanaError::MissingApiKey);
        }
        Ok(Self {
            api_key,
            environment,
        })
    }

    /// Loads `.env`, then reads `KOBANA_API_KEY` and `KOBANA_ENV`.
    pub fn from_env() -> Result<Self, KobanaError> {
        dotenvy::dotenv().ok();
        Self::resolve(None, None)
    }

    /// Uses the explicit values where given and falls back to the environment
    /// for the rest. An explicit API key always wins.
    pub fn resolve(
        api_key: Option<String>,
        environment: Option<Environment>,
    ) -> Result<Self, KobanaError> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_VAR).ok())
            .ok_or(KobanaError::MissingApiKey)?;
        let environment = environment.unwrap_or_else(|| {
            std::env::var(ENVIRONMENT_VAR)
                .ok()
                .and_then(|name| name.parse().ok())
                .unwrap_or_default()
        });
        Self::new(api_key, environment)
    }

    /// Parses a JSON configuration document, resolving environment references.
    ///
    /// A missing `environment` selects [`Environment::Development`].
    pub fn from_json(json: &str) -> Result<Self, KobanaError> {
        let raw: RawConfig =
            serde_json::from_str(json).map_err(|e| KobanaError::Config(e.to_string()))?;
        let api_key = raw
            .api_key
            .map(LiteralOrEnv::into_inner)
            .ok_or(KobanaError::MissingApiKey)?;
        let environment = raw
            .environment
            .map(LiteralOrEnv::into_inner)
            .unwrap_or_default();
        Self::new(api_key, environment)
    }

    /// Reads and parses a JSON configuration file, see [`KobanaConfig::from_json`].
    pub fn from_file(path: &Path) -> Result<Self, KobanaError> {
        let json = fs::read_to_string(path)
            .map_err(|e| KobanaError::Config(format!("Failed to read {}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn base_url(&self) -> Result<Url, KobanaError> {
        Ok(Url::parse(self.environment.base_url())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!("production".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("PRODUCTION".parse::<Environment>(), Ok(Environment::Production));
        assert_eq!("development".parse::<Environment>(), Ok(Environment::Development));
        assert_eq!("staging".parse::<Environment>(), Ok(Environment::Development));
        assert_eq!(Environment::default(), Environment::Development);
    }

    #[test]
    fn test_base_urls() {
        assert_eq!(
            Environment::Production.base_url(),
            "https://api.kobana.com.br"
        );
        assert_eq!(
            Environment::Development.base_url(),
            "https://api-sandbox.kobana.com.br"
        );
    }

    #[test]
    fn test_env_var_syntax() {
        assert_eq!(LiteralOrEnv::<String>::env_var_name("$API_KEY"), Some("API_KEY"));
        assert_eq!(
            LiteralOrEnv::<String>::env_var_name("${API_KEY}"),
            Some("API_KEY")
        );
        assert_eq!(LiteralOrEnv::<String>::env_var_name("$"), None);
        assert_eq!(LiteralOrEnv::<String>::env_var_name("$api-key"), None);
        assert_eq!(LiteralOrEnv::<String>::env_var_name("plain"), None);
    }

    #[test]
    fn test_explicit_key_required() {
        assert!(matches!(
            KobanaConfig::new("", Environment::Production),
            Err(KobanaError::MissingApiKey)
        ));
        assert!(matches!(
            KobanaConfig::new("   ", Environment::Production),
            Err(KobanaError::MissingApiKey)
        ));
        let config = KobanaConfig::new("secret", Environment::Production).unwrap();
        assert_eq!(config.api_key(), "secret");
        assert_eq!(config.environment(), Environment::Production);
    }

    #[test]
    fn test_explicit_key_wins() {
        let config =
            KobanaConfig::resolve(Some("explicit".into()), Some(Environment::Development)).unwrap();
        assert_eq!(config.api_key(), "explicit");
    }

    #[test]
    fn test_from_json_literals() {
        let config =
            KobanaConfig::from_json(r#"{ "api_key": "secret", "environment": "production" }"#)
                .unwrap();
        assert_eq!(config.api_key(), "secret");
        assert_eq!(
            config.base_url().unwrap().as_str(),
            "https://api.kobana.com.br/"
        );

        let config = KobanaConfig::from_json(r#"{ "api_key": "secret" }"#).unwrap();
        assert_eq!(config.environment(), Environment::Development);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            KobanaConfig::from_json("{}"),
            Err(KobanaError::MissingApiKey)
        ));
        assert!(matches!(
            KobanaConfig::from_json(r#"{ "api_key": "$KOBANA_TEST_UNSET_VARIABLE" }"#),
            Err(KobanaError::Config(_))
        ));
        assert!(matches!(
            KobanaConfig::from_json("not json"),
            Err(KobanaError::Config(_))
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = KobanaConfig::new("secret", Environment::Production).unwrap();
        assert!(!format!("{config:?}").contains("secret"));
    }
}
