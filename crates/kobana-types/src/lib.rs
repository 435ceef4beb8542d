#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for Kobana PIX charge requests.
//!
//! This crate holds everything that can be decided about a request without
//! talking to the API: payload access, pre-flight validation, and translation
//! into the wire format. It performs no I/O and keeps no mutable global state.
//!
//! # Overview
//!
//! A charge request arrives as a loosely typed JSON document. Before it is sent,
//! the [`validation`] engine checks it against every rule group and reports all
//! violations in one ordered list. A valid payload is then handed to a
//! [`translate::Translator`], which produces the typed body defined in [`proto`].
//!
//! # Modules
//!
//! - [`payload`] - Read-only view over a JSON payload
//! - [`validation`] - Validation engine, CPF/CNPJ checksums, fee and address rules
//! - [`proto`] - Wire bodies for charge and PIX account requests
//! - [`translate`] - Payload to wire body translation with API defaults
//! - [`timestamp`] - ISO-8601 parsing for expiration dates
//! - [`util`] - Decimal conversion helpers
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation for validation and translation

pub mod payload;
pub mod proto;
pub mod timestamp;
pub mod translate;
pub mod util;
pub mod validation;
