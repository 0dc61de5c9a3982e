//! Integration tests for the TXP gateway against a mock SOAP endpoint

use txp_gateway::{Address, CreditCard, TxpError, TxpGateway};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn credit_card() -> CreditCard {
    CreditCard::new("4000100011112224", 9, 2030, "Longbob", "Longsen")
        .with_verification_value("123")
}

fn us_address() -> Address {
    Address {
        address1: Some("456 My Street".to_string()),
        address2: Some("Apt 1".to_string()),
        city: Some("New York".to_string()),
        state: Some("NY".to_string()),
        zip: Some("10120".to_string()),
        country: Some("US".to_string()),
        phone: Some("(555)555-5555".to_string()),
    }
}

fn gateway_for(server: &MockServer) -> TxpGateway {
    TxpGateway::builder("GATEWAY_ID", "REG_KEY")
        .with_endpoint(server.uri())
        .build()
        .unwrap()
}

// Response body as captured from the certification host
const SUCCESSFUL_PURCHASE: &str = concat!(
    "<S:Envelope xmlns:S=\"http://schemas.xmlsoap.org/soap/envelope/\">",
    "<S:Body>",
    "<SendTranResponse xmlns=\"http://postilion/realtime/portal/soa/xsd/Faults/2009/01\" ",
    "xmlns:ns2=\"http://postilion/realtime/merchantframework/xsd/v1/\">",
    "<rspCode>00</rspCode>",
    "<authRsp><aci>Y</aci></authRsp>",
    "<tranData>",
    "<swchKey>0A10092D13BBAAEE27BCC70CEBF801</swchKey>",
    "<dtTm>2012-12-20T15:38:41</dtTm>",
    "<amt>000000000100</amt>",
    "<auth>Lexc05</auth>",
    "<stan>000941</stan>",
    "<tranNr>000000740641</tranNr>",
    "</tranData>",
    "<mapCaid>300979940268000</mapCaid>",
    "<cardType>0</cardType>",
    "</SendTranResponse>",
    "</S:Body>",
    "</S:Envelope>",
);

const VALIDATION_FAULT: &str = concat!(
    "<S:Envelope xmlns:S=\"http://schemas.xmlsoap.org/soap/envelope/\">",
    "<S:Body>",
    "<S:Fault>",
    "<faultcode>S:Server</faultcode>",
    "<faultstring>Validation Failure</faultstring>",
    "</S:Fault>",
    "</S:Body>",
    "</S:Envelope>",
);

const SERVICE_EXCEPTION_FAULT: &str = concat!(
    "<S:Envelope xmlns:S=\"http://schemas.xmlsoap.org/soap/envelope/\">",
    "<S:Body>",
    "<S:Fault>",
    "<faultcode>S:Server</faultcode>",
    "<faultstring>Service Exception</faultstring>",
    "</S:Fault>",
    "</S:Body>",
    "</S:Envelope>",
);

fn tran_response_body(rsp_code: &str, tran_nr: &str) -> String {
    format!(
        concat!(
            "<S:Envelope xmlns:S=\"http://schemas.xmlsoap.org/soap/envelope/\">",
            "<S:Body><SendTranResponse>",
            "<rspCode>{}</rspCode>",
            "<tranData><tranNr>{}</tranNr></tranData>",
            "</SendTranResponse></S:Body></S:Envelope>",
        ),
        rsp_code, tran_nr
    )
}

#[tokio::test]
async fn test_successful_purchase() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("Content-Type", "text/xml; charset=utf-8"))
        .and(header("SOAPAction", "SendTranRequest"))
        .and(body_string_contains("<v1:tranCode>1</v1:tranCode>"))
        .and(body_string_contains("<v1:id>GATEWAY_ID</v1:id>"))
        .and(body_string_contains("<v1:pan>4000100011112224</v1:pan>"))
        .and(body_string_contains("<v1:reqAmt>0100</v1:reqAmt>"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(SUCCESSFUL_PURCHASE, "text/xml"))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let response = gateway
        .purchase(100, &credit_card(), &us_address())
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.message, "Approved or completed successfully");
    assert_eq!(response.code, "00");
    assert_eq!(response.authorization.as_deref(), Some("000000740641"));
    assert!(response.test);

    let tran = response.tran.expect("parsed response should be present");
    assert_eq!(tran.tran_data.auth.as_deref(), Some("Lexc05"));
    assert_eq!(tran.tran_data.stan.as_deref(), Some("000941"));
}

#[tokio::test]
async fn test_declined_purchase() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(tran_response_body("51", "000000740651"), "text/xml"),
        )
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let response = gateway
        .purchase(21, &credit_card(), &us_address())
        .await
        .unwrap();

    assert!(!response.success);
    assert_eq!(response.message, "Not sufficient funds");
    assert_eq!(response.code, "51");
    assert_eq!(response.authorization.as_deref(), Some("000000740651"));
    assert!(response.test);
}

#[tokio::test]
async fn test_authorize_and_capture() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("<v1:tranCode>0</v1:tranCode>"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(tran_response_body("00", "000000740731"), "text/xml"),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("<v1:tranCode>3</v1:tranCode>"))
        .and(body_string_contains("<v1:tranNr>000000740731</v1:tranNr>"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(tran_response_body("00", "000000740731"), "text/xml"),
        )
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);

    let auth = gateway
        .authorize(100, &credit_card(), &us_address())
        .await
        .unwrap();
    assert!(auth.success);
    assert_eq!(auth.message, "Approved or completed successfully");
    let authorization = auth.authorization.expect("authorization should be present");

    let capture = gateway.capture(100, &authorization).await.unwrap();
    assert!(capture.success);
}

#[tokio::test]
async fn test_credit() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("<v1:tranCode>4</v1:tranCode>"))
        .and(body_string_contains("<v1:tranNr>000000667151</v1:tranNr>"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(tran_response_body("00", "000000667151"), "text/xml"),
        )
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let response = gateway.credit(100, "000000667151").await.unwrap();
    assert!(response.success);
}

#[tokio::test]
async fn test_void_carries_no_amount() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_string_contains("<v1:tranCode>2</v1:tranCode>"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(tran_response_body("00", "000000740791"), "text/xml"),
        )
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let response = gateway.void("000000740791").await.unwrap();
    assert!(response.success);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body = String::from_utf8_lossy(&requests[0].body).into_owned();
    assert!(body.contains("<v1:origTranData><v1:tranNr>000000740791</v1:tranNr>"));
    assert!(!body.contains("<v1:reqAmt>"));
    assert!(!body.contains("<v1:card>"));
}

#[tokio::test]
async fn test_failed_capture_with_validation_fault() {
    init_tracing();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_raw(VALIDATION_FAULT, "text/xml"))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let response = gateway.capture(100, "").await.unwrap();

    assert!(!response.success);
    assert_eq!(response.code, "(S:Server) Validation Failure");
    assert_eq!(
        response.message,
        "Unhandled Error Code: (S:Server) Validation Failure"
    );
    assert!(response.authorization.is_none());
}

#[tokio::test]
async fn test_invalid_login() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_raw(SERVICE_EXCEPTION_FAULT, "text/xml"))
        .mount(&server)
        .await;

    let gateway = TxpGateway::builder("bad", "bad")
        .with_endpoint(server.uri())
        .build()
        .unwrap();
    let response = gateway
        .purchase(100, &credit_card(), &us_address())
        .await
        .unwrap();

    assert!(!response.success);
    assert_eq!(
        response.message,
        "Unhandled Error Code: (S:Server) Service Exception"
    );
}

#[tokio::test]
async fn test_unexpected_response_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_raw("Bad Gateway", "text/plain"))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let err = gateway
        .purchase(100, &credit_card(), &us_address())
        .await
        .unwrap_err();

    match err {
        TxpError::UnexpectedResponse { status, body } => {
            assert_eq!(status, 502);
            assert!(body.contains("Bad Gateway"));
        }
        other => panic!("expected UnexpectedResponse, got {:?}", other),
    }
}

#[tokio::test]
async fn test_transport_error() {
    let server = MockServer::start().await;
    let endpoint = server.uri();
    drop(server);

    let gateway = TxpGateway::builder("GATEWAY_ID", "REG_KEY")
        .with_endpoint(endpoint)
        .build()
        .unwrap();
    let err = gateway
        .purchase(100, &credit_card(), &us_address())
        .await
        .unwrap_err();

    assert!(matches!(err, TxpError::Http(_)));
}
