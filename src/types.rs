//! Core types for the TXP gateway

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Transaction-type discriminator carried in the `tranCode` element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranCode {
    /// Authorization only
    Authorize,
    /// Authorization and capture in a single step
    Sale,
    /// Void of a prior transaction
    Void,
    /// Capture of a prior authorization
    Capture,
    /// Credit (refund) against a settled transaction
    Credit,
}

impl TranCode {
    /// Wire value for the `tranCode` element
    pub fn as_str(&self) -> &'static str {
        match self {
            TranCode::Authorize => "0",
            TranCode::Sale => "1",
            TranCode::Void => "2",
            TranCode::Capture => "3",
            TranCode::Credit => "4",
        }
    }
}

/// Credit card presented for payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCard {
    /// Primary account number
    pub number: String,
    /// Expiry month (1-12)
    pub month: u8,
    /// Four-digit expiry year
    pub year: u16,
    /// Cardholder first name
    pub first_name: String,
    /// Cardholder last name
    pub last_name: String,
    /// Card verification value (CVV2), when collected
    pub verification_value: Option<String>,
}

impl CreditCard {
    /// Create a new credit card
    pub fn new(
        number: impl Into<String>,
        month: u8,
        year: u16,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            month,
            year,
            first_name: first_name.into(),
            last_name: last_name.into(),
            verification_value: None,
        }
    }

    /// Attach a verification value
    pub fn with_verification_value(mut self, value: impl Into<String>) -> Self {
        self.verification_value = Some(value.into());
        self
    }

    /// Expiry in the gateway's `YYMM` wire format
    pub fn expiration(&self) -> String {
        format!("{:02}{:02}", self.year % 100, self.month)
    }

    /// Cardholder name as sent in the contact block
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Billing address attached to authorize and purchase requests
///
/// Absent fields are omitted from the request XML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
}

/// Transaction-data block of a `SendTranResponse`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranData {
    /// Gateway transaction number, the reference for capture/credit/void
    pub tran_nr: Option<String>,
    /// Issuer authorization code
    pub auth: Option<String>,
    /// Processed amount as reported by the gateway
    pub amount: Option<String>,
    /// System trace audit number
    pub stan: Option<String>,
    /// Switch key
    pub switch_key: Option<String>,
    /// Gateway timestamp
    pub timestamp: Option<NaiveDateTime>,
}

/// Parsed `SendTranResponse`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranResponse {
    /// Two-character response code; `"00"` is the only approval
    pub rsp_code: String,
    /// Transaction-data block
    pub tran_data: TranData,
    /// Address verification result code
    pub avs_code: Option<String>,
    /// CVV2 verification result code
    pub cvv2_code: Option<String>,
    /// MAP CAID reported by the gateway
    pub map_caid: Option<String>,
    /// Card type indicator
    pub card_type: Option<String>,
}

/// Normalized outcome of a gateway operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResponse {
    /// Whether the transaction was approved
    pub success: bool,
    /// Human-readable message for the response code
    pub message: String,
    /// Raw response code, or the formatted fault text when the gateway faulted
    pub code: String,
    /// Gateway transaction number to reference in capture/credit/void
    pub authorization: Option<String>,
    /// Address verification result code
    pub avs_code: Option<String>,
    /// CVV2 verification result code
    pub cvv_code: Option<String>,
    /// Whether the gateway was in test mode
    pub test: bool,
    /// Raw parsed response; absent for fault-derived declines
    pub tran: Option<TranResponse>,
}
