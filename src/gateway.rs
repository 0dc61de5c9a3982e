//! Gateway client for the TXP merchant web service

use std::time::Duration;

use http::HeaderMap;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument};
use url::Url;

use crate::codes;
use crate::error::{Result, TxpError};
use crate::request::{self, Merchant};
use crate::response::{self, SoapBody, SoapFault};
use crate::types::{Address, CreditCard, PaymentResponse, TranCode, TranResponse};

/// Certification (test) endpoint of the merchant web service
pub const CERT_ENDPOINT: &str =
    "https://ws.cert.processnow.com/portal/merchantframework/MerchantWebServices-v1";

/// SOAPAction header value for the transaction operation
const SOAP_ACTION: &str = "SendTranRequest";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the TXP transaction service
///
/// All five operations are translated into a single SOAP `SendTranRequest`
/// discriminated by [`TranCode`], posted to the configured endpoint, and
/// normalized into a [`PaymentResponse`].
#[derive(Debug, Clone)]
pub struct TxpGateway {
    gateway_id: String,
    registration_key: String,
    endpoint: Url,
    headers: HeaderMap,
    client: reqwest::Client,
    test: bool,
}

/// Builder for [`TxpGateway`]
#[derive(Debug, Clone)]
pub struct TxpGatewayBuilder {
    gateway_id: String,
    registration_key: String,
    endpoint: Option<String>,
    headers: HeaderMap,
    client: Option<reqwest::Client>,
    test: bool,
}

impl TxpGatewayBuilder {
    /// Override the service endpoint (e.g. a merchant-specific production
    /// URL). A trailing `?wsdl` query, as found in WSDL-style configuration,
    /// is stripped.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set headers sent with every request (e.g. tracing or routing headers)
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Override the underlying reqwest client
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Mark the gateway as live; responses no longer carry the test flag
    pub fn live(mut self) -> Self {
        self.test = false;
        self
    }

    /// Build the gateway, validating credentials and the endpoint URL
    pub fn build(self) -> Result<TxpGateway> {
        if self.gateway_id.is_empty() {
            return Err(TxpError::config("gateway_id is required"));
        }
        if self.registration_key.is_empty() {
            return Err(TxpError::config("registration_key is required"));
        }

        let raw = self.endpoint.unwrap_or_else(|| CERT_ENDPOINT.to_string());
        let raw = raw.trim_end_matches("?wsdl");
        let endpoint = Url::parse(raw)
            .map_err(|e| TxpError::config(format!("Invalid endpoint URL: {}", e)))?;

        let client = self.client.unwrap_or_else(|| {
            reqwest::Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new())
        });

        Ok(TxpGateway {
            gateway_id: self.gateway_id,
            registration_key: self.registration_key,
            endpoint,
            headers: self.headers,
            client,
            test: self.test,
        })
    }
}

impl TxpGateway {
    /// Start building a gateway for the given merchant credentials
    ///
    /// The default endpoint is the certification host and the gateway is in
    /// test mode; call [`TxpGatewayBuilder::with_endpoint`] and
    /// [`TxpGatewayBuilder::live`] for production use.
    pub fn builder(
        gateway_id: impl Into<String>,
        registration_key: impl Into<String>,
    ) -> TxpGatewayBuilder {
        TxpGatewayBuilder {
            gateway_id: gateway_id.into(),
            registration_key: registration_key.into(),
            endpoint: None,
            headers: HeaderMap::new(),
            client: None,
            test: true,
        }
    }

    /// Create a gateway with default settings against the certification host
    pub fn new(
        gateway_id: impl Into<String>,
        registration_key: impl Into<String>,
    ) -> Result<Self> {
        Self::builder(gateway_id, registration_key).build()
    }

    /// The configured service endpoint
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Whether the gateway is in test mode
    pub fn is_test(&self) -> bool {
        self.test
    }

    /// Authorize an amount (in cents) against a card without capturing it
    #[instrument(skip(self, card, address))]
    pub async fn authorize(
        &self,
        amount: u64,
        card: &CreditCard,
        address: &Address,
    ) -> Result<PaymentResponse> {
        let body = request::payment(&self.merchant(), TranCode::Authorize, card, address, amount)?;
        self.commit(body).await
    }

    /// Authorize and capture an amount (in cents) in a single step
    #[instrument(skip(self, card, address))]
    pub async fn purchase(
        &self,
        amount: u64,
        card: &CreditCard,
        address: &Address,
    ) -> Result<PaymentResponse> {
        let body = request::payment(&self.merchant(), TranCode::Sale, card, address, amount)?;
        self.commit(body).await
    }

    /// Capture a previously authorized amount; `authorization` is the
    /// transaction number returned by [`authorize`](Self::authorize)
    #[instrument(skip(self))]
    pub async fn capture(&self, amount: u64, authorization: &str) -> Result<PaymentResponse> {
        let body = request::reference(&self.merchant(), TranCode::Capture, authorization, amount)?;
        self.commit(body).await
    }

    /// Credit (refund) a settled transaction
    #[instrument(skip(self))]
    pub async fn credit(&self, amount: u64, authorization: &str) -> Result<PaymentResponse> {
        let body = request::reference(&self.merchant(), TranCode::Credit, authorization, amount)?;
        self.commit(body).await
    }

    /// Void an unsettled transaction
    #[instrument(skip(self))]
    pub async fn void(&self, authorization: &str) -> Result<PaymentResponse> {
        let body = request::void(&self.merchant(), authorization)?;
        self.commit(body).await
    }

    fn merchant(&self) -> Merchant<'_> {
        Merchant {
            gateway_id: &self.gateway_id,
            registration_key: &self.registration_key,
        }
    }

    async fn commit(&self, envelope: String) -> Result<PaymentResponse> {
        debug!(endpoint = %self.endpoint, "sending transaction request");

        let reply = self
            .client
            .post(self.endpoint.clone())
            .headers(self.headers.clone())
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", SOAP_ACTION)
            .body(envelope)
            .send()
            .await?;

        let status = reply.status();
        // Faults arrive as HTTP 500 with a Fault body; read the body
        // before judging the status.
        let body = reply.text().await?;

        match response::parse(&body) {
            Ok(SoapBody::Tran(tran)) => {
                debug!(code = %tran.rsp_code, "transaction response received");
                Ok(self.tran_response(tran))
            }
            Ok(SoapBody::Fault(fault)) => {
                debug!(fault = %fault.as_code(), "gateway returned a fault");
                Ok(self.fault_response(fault))
            }
            Err(_) if !status.is_success() => Err(TxpError::UnexpectedResponse {
                status: status.as_u16(),
                body,
            }),
            Err(err) => Err(err),
        }
    }

    fn tran_response(&self, tran: TranResponse) -> PaymentResponse {
        PaymentResponse {
            success: codes::is_approved(&tran.rsp_code),
            message: codes::message_for(&tran.rsp_code),
            code: tran.rsp_code.clone(),
            authorization: tran.tran_data.tran_nr.clone(),
            avs_code: tran.avs_code.clone(),
            cvv_code: tran.cvv2_code.clone(),
            test: self.test,
            tran: Some(tran),
        }
    }

    // A fault is reported as a decline whose code is the fault text, so the
    // message reads `Unhandled Error Code: (S:Server) ...`.
    fn fault_response(&self, fault: SoapFault) -> PaymentResponse {
        let code = fault.as_code();
        PaymentResponse {
            success: false,
            message: codes::message_for(&code),
            code,
            authorization: None,
            avs_code: None,
            cvv_code: None,
            test: self.test,
            tran: None,
        }
    }
}
