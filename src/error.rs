//! Error types for the TXP gateway client

use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, TxpError>;

/// Main error type for gateway operations
#[derive(Error, Debug)]
pub enum TxpError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// XML read/write error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A required element was absent from the gateway response
    #[error("Missing required element: {0}")]
    MissingElement(String),

    /// Response body that is neither a transaction response nor a SOAP fault
    #[error("Unexpected gateway response (status {status}): {body}")]
    UnexpectedResponse { status: u16, body: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TxpError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing-element error
    pub fn missing_element(name: impl Into<String>) -> Self {
        Self::MissingElement(name.into())
    }
}
