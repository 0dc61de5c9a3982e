//! XML payload construction for `SendTranRequest`

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::Result;
use crate::types::{Address, CreditCard, TranCode};

/// SOAP 1.1 envelope namespace
const ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Merchant web service namespace
const SERVICE_NS: &str = "http://postilion/realtime/merchantframework/xsd/v1/";

/// Input type 1 selects the merchant web service interface
const INPUT_TYPE: &str = "1";

// Field limits enforced by the service schema
const MAX_NAME: usize = 61;
const MAX_PHONE: usize = 15;
const MAX_ADDRESS_LINE: usize = 50;
const MAX_CITY: usize = 40;
const MAX_STATE: usize = 2;
const MAX_ZIP: usize = 9;
const MAX_COUNTRY: usize = 2;

type XmlWriter = Writer<Vec<u8>>;

/// Merchant credentials carried in every request
#[derive(Debug, Clone)]
pub(crate) struct Merchant<'a> {
    pub gateway_id: &'a str,
    pub registration_key: &'a str,
}

/// Build an authorize (tranCode 0) or sale (tranCode 1) payload
pub(crate) fn payment(
    merchant: &Merchant<'_>,
    code: TranCode,
    card: &CreditCard,
    address: &Address,
    amount: u64,
) -> Result<String> {
    send_tran(|w| {
        merchant_block(w, merchant)?;
        leaf(w, "v1:tranCode", code.as_str())?;
        card_block(w, card)?;
        contact_block(w, card, address)?;
        amount_block(w, amount)
    })
}

/// Build a capture (tranCode 3) or credit (tranCode 4) payload referencing
/// a prior transaction
pub(crate) fn reference(
    merchant: &Merchant<'_>,
    code: TranCode,
    authorization: &str,
    amount: u64,
) -> Result<String> {
    send_tran(|w| {
        merchant_block(w, merchant)?;
        leaf(w, "v1:tranCode", code.as_str())?;
        amount_block(w, amount)?;
        orig_tran_block(w, authorization)
    })
}

/// Build a void (tranCode 2) payload; voids carry no amount
pub(crate) fn void(merchant: &Merchant<'_>, authorization: &str) -> Result<String> {
    send_tran(|w| {
        merchant_block(w, merchant)?;
        leaf(w, "v1:tranCode", TranCode::Void.as_str())?;
        orig_tran_block(w, authorization)
    })
}

fn send_tran<F>(build: F) -> Result<String>
where
    F: FnOnce(&mut XmlWriter) -> Result<()>,
{
    let mut w = Writer::new(Vec::new());
    let mut envelope = BytesStart::new("env:Envelope");
    envelope.push_attribute(("xmlns:env", ENVELOPE_NS));
    envelope.push_attribute(("xmlns:v1", SERVICE_NS));
    w.write_event(Event::Start(envelope))?;
    open(&mut w, "env:Body")?;
    open(&mut w, "v1:SendTranRequest")?;
    build(&mut w)?;
    close(&mut w, "v1:SendTranRequest")?;
    close(&mut w, "env:Body")?;
    close(&mut w, "env:Envelope")?;
    Ok(String::from_utf8_lossy(&w.into_inner()).into_owned())
}

fn merchant_block(w: &mut XmlWriter, merchant: &Merchant<'_>) -> Result<()> {
    open(w, "v1:merc")?;
    leaf(w, "v1:id", merchant.gateway_id)?;
    leaf(w, "v1:regKey", merchant.registration_key)?;
    leaf(w, "v1:inType", INPUT_TYPE)?;
    close(w, "v1:merc")
}

fn card_block(w: &mut XmlWriter, card: &CreditCard) -> Result<()> {
    open(w, "v1:card")?;
    leaf(w, "v1:pan", &card.number)?;
    if let Some(sec) = card.verification_value.as_deref() {
        leaf(w, "v1:sec", sec)?;
    }
    leaf(w, "v1:xprDt", &card.expiration())?;
    close(w, "v1:card")
}

fn contact_block(w: &mut XmlWriter, card: &CreditCard, address: &Address) -> Result<()> {
    open(w, "v1:contact")?;
    leaf(w, "v1:fullName", clip(&card.full_name(), MAX_NAME))?;
    if let Some(phone) = address.phone.as_deref() {
        open(w, "v1:phone")?;
        // Phone type 0 is "home" in the service schema
        leaf(w, "v1:type", "0")?;
        leaf(w, "v1:nr", clip(phone, MAX_PHONE))?;
        close(w, "v1:phone")?;
    }
    leaf_opt(w, "v1:addrLn1", address.address1.as_deref(), MAX_ADDRESS_LINE)?;
    leaf_opt(w, "v1:addrLn2", address.address2.as_deref(), MAX_ADDRESS_LINE)?;
    leaf_opt(w, "v1:city", address.city.as_deref(), MAX_CITY)?;
    leaf_opt(w, "v1:state", address.state.as_deref(), MAX_STATE)?;
    leaf_opt(w, "v1:zipCode", address.zip.as_deref(), MAX_ZIP)?;
    leaf_opt(w, "v1:ctry", address.country.as_deref(), MAX_COUNTRY)?;
    close(w, "v1:contact")
}

fn orig_tran_block(w: &mut XmlWriter, authorization: &str) -> Result<()> {
    open(w, "v1:origTranData")?;
    leaf(w, "v1:tranNr", authorization)?;
    close(w, "v1:origTranData")
}

// The wire format prefixes the integer cent amount with a literal zero
fn amount_block(w: &mut XmlWriter, amount: u64) -> Result<()> {
    leaf(w, "v1:reqAmt", &format!("0{}", amount))
}

fn open(w: &mut XmlWriter, name: &str) -> Result<()> {
    w.write_event(Event::Start(BytesStart::new(name)))?;
    Ok(())
}

fn close(w: &mut XmlWriter, name: &str) -> Result<()> {
    w.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn leaf(w: &mut XmlWriter, name: &str, value: &str) -> Result<()> {
    open(w, name)?;
    w.write_event(Event::Text(BytesText::new(value)))?;
    close(w, name)
}

fn leaf_opt(w: &mut XmlWriter, name: &str, value: Option<&str>, max: usize) -> Result<()> {
    if let Some(value) = value {
        leaf(w, name, clip(value, max))?;
    }
    Ok(())
}

// Character-safe truncation; the service limits are in characters
fn clip(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}
