//! Rust SDK for [Kobana](https://www.kobana.com.br) PIX charges.
//!
//! This crate prepares requests for the Kobana API without sending them. A
//! charge payload is checked against every pre-flight rule before anything
//! else happens; a payload that breaks any rule yields one error listing every
//! violation, and a valid payload is translated into the wire body together
//! with the endpoint URL and authorization header.
//!
//! # Modules
//!
//! - [`config`] - API key and environment resolution (explicit, `.env`, JSON)
//! - [`operation`] - Request kinds and their validator/translator pairs
//! - [`client`] - Validation plus translation into a [`PreparedRequest`]
//! - [`error`] - The [`KobanaError`] type and its status codes
//! - [`telemetry`] - `tracing` subscriber setup for the CLI
//!
//! The pure validation and wire types live in [`kobana_types`] and are
//! re-exported as [`types`].
//!
//! # Example
//!
//! ```
//! use kobana::{ChargePix, Environment, KobanaClient, KobanaConfig};
//! use serde_json::json;
//!
//! let config = KobanaConfig::new("my-api-key", Environment::Development).unwrap();
//! let client = KobanaClient::new(config);
//!
//! let error = client.prepare::<ChargePix>(&json!({ "amount": 0 })).unwrap_err();
//! assert_eq!(error.code(), 422);
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod operation;
pub mod telemetry;

pub use kobana_types as types;

pub use client::{KobanaClient, PreparedRequest, validate_kind};
pub use config::{Environment, KobanaConfig};
pub use error::KobanaError;
pub use operation::{ChargePix, CreatePixAccount, Operation, RequestKind};
