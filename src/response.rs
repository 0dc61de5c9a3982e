//! SOAP response parsing for `SendTranResponse`

use chrono::{DateTime, NaiveDateTime};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{Result, TxpError};
use crate::types::{TranData, TranResponse};

/// SOAP fault returned by the transaction service
#[derive(Debug, Clone)]
pub(crate) struct SoapFault {
    pub code: String,
    pub reason: String,
}

impl SoapFault {
    /// The fault rendered the way declines report it as a response code,
    /// e.g. `(S:Server) Validation Failure`
    pub fn as_code(&self) -> String {
        format!("({}) {}", self.code, self.reason)
    }
}

/// Body of a SOAP response from the transaction service
#[derive(Debug, Clone)]
pub(crate) enum SoapBody {
    Tran(TranResponse),
    Fault(SoapFault),
}

/// Parse a SOAP response body
///
/// Namespace prefixes are ignored; only local element names are matched.
pub(crate) fn parse(xml: &str) -> Result<SoapBody> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<String> = Vec::new();

    let mut saw_tran = false;
    let mut saw_fault = false;

    let mut rsp_code: Option<String> = None;
    let mut tran_data = TranData::default();
    let mut avs_code: Option<String> = None;
    let mut cvv2_code: Option<String> = None;
    let mut map_caid: Option<String> = None;
    let mut card_type: Option<String> = None;

    let mut fault_code: Option<String> = None;
    let mut fault_reason: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(start) => {
                let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                match name.as_str() {
                    "SendTranResponse" => saw_tran = true,
                    "Fault" => saw_fault = true,
                    _ => {}
                }
                stack.push(name);
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Text(text) => {
                let value = text.unescape()?.trim().to_string();
                if value.is_empty() {
                    continue;
                }
                let leaf = stack.last().map(String::as_str).unwrap_or("");
                let parent = stack
                    .len()
                    .checked_sub(2)
                    .map(|i| stack[i].as_str())
                    .unwrap_or("");
                match (parent, leaf) {
                    ("SendTranResponse", "rspCode") => rsp_code = Some(value),
                    ("SendTranResponse", "avsCode") => avs_code = Some(value),
                    ("SendTranResponse", "cvv2Code") => cvv2_code = Some(value),
                    ("SendTranResponse", "mapCaid") => map_caid = Some(value),
                    ("SendTranResponse", "cardType") => card_type = Some(value),
                    ("tranData", "tranNr") => tran_data.tran_nr = Some(value),
                    ("tranData", "auth") => tran_data.auth = Some(value),
                    ("tranData", "amt") => tran_data.amount = Some(value),
                    ("tranData", "stan") => tran_data.stan = Some(value),
                    ("tranData", "swchKey") => tran_data.switch_key = Some(value),
                    ("tranData", "dtTm") => tran_data.timestamp = parse_timestamp(&value),
                    ("Fault", "faultcode") => fault_code = Some(value),
                    ("Fault", "faultstring") => fault_reason = Some(value),
                    _ => {}
                }
            }
            _ => {}
        }
    }

    if saw_fault {
        let code = fault_code.ok_or_else(|| TxpError::missing_element("faultcode"))?;
        let reason = fault_reason.unwrap_or_default();
        return Ok(SoapBody::Fault(SoapFault { code, reason }));
    }

    if saw_tran {
        let rsp_code = rsp_code.ok_or_else(|| TxpError::missing_element("rspCode"))?;
        return Ok(SoapBody::Tran(TranResponse {
            rsp_code,
            tran_data,
            avs_code,
            cvv2_code,
            map_caid,
            card_type,
        }));
    }

    Err(TxpError::missing_element("SendTranResponse"))
}

// The gateway reports xsd:dateTime values, with or without an offset.
// Malformed timestamps are dropped rather than failing the transaction.
fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.naive_utc())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok())
}
