//! # txp-gateway - TransFirst Transaction Express client
//!
//! A Rust client for the TransFirst Transaction Express (TXP) payment
//! gateway. The service speaks SOAP 1.1: one `SendTranRequest` operation
//! carries every transaction type, discriminated by a numeric `tranCode`.
//! This library builds the XML payloads for authorize, purchase, capture,
//! credit, and void, posts them over HTTPS, and normalizes the two-character
//! response codes into a success/failure result with a readable message.

pub mod codes;
pub mod error;
pub mod gateway;
pub mod types;

mod request;
mod response;

// Re-exports for convenience
pub use error::{Result, TxpError};
pub use gateway::{TxpGateway, TxpGatewayBuilder, CERT_ENDPOINT};
pub use types::*;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Gateway display name
pub const DISPLAY_NAME: &str = "TransFirst TXP";

/// Gateway homepage
pub const HOMEPAGE_URL: &str = "https://www.transfirst.com/";

/// Merchant countries supported by the gateway, as 2-digit ISO country codes
pub const SUPPORTED_COUNTRIES: &[&str] = &["US"];

/// Card brands supported by the gateway
pub const SUPPORTED_CARD_BRANDS: &[&str] = &["visa", "master", "american_express", "discover"];
