//! Utility types and functions for Kobana payloads.
//!
//! - [`decimal`] - Exact conversion of number-like JSON values into decimals

pub mod decimal;

pub use decimal::*;
