//! HTTP behaviour of the REST and streaming endpoints against a local mock
//! server.

use futures_util::StreamExt;
use oanda_rs::OandaClient;
use oanda_rs::error::OandaError;
use oanda_rs::types::enums::TransactionType;
use oanda_rs::types::pricing::{Price, PricingRequest, PricingStreamRequest};
use oanda_rs::types::transactions::{
    Transaction, TransactionIdRangeRequest, TransactionStreamRequest,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";
const ACCOUNT: &str = "101-001-1234567-001";

const PRICE_EUR: &str = r#"{"type":"PRICE","instrument":"EUR_USD","time":"2024-01-02T03:04:05.123456789Z","status":"tradeable","tradeable":true,"bids":[{"price":"1.10010","liquidity":10000000}],"asks":[{"price":"1.10025","liquidity":10000000}],"closeoutBid":"1.09995","closeoutAsk":"1.10040"}"#;
const PRICE_JPY: &str = r#"{"type":"PRICE","instrument":"USD_JPY","time":"2024-01-02T03:04:06.000000000Z","tradeable":true,"bids":[{"price":"141.250","liquidity":1000000}],"asks":[{"price":"141.262","liquidity":1000000}],"closeoutBid":"141.240","closeoutAsk":"141.272"}"#;
const PRICING_HEARTBEAT: &str = r#"{"type":"HEARTBEAT","time":"2024-01-02T03:04:07.000000000Z"}"#;

const ORDER_FILL: &str = r#"{"id":"6","accountID":"101-001-1234567-001","userID":1234567,"batchID":"5","requestID":"42","time":"2024-01-02T03:04:05.000000000Z","type":"ORDER_FILL","orderID":"5","instrument":"EUR_USD","units":"100","price":"1.10025","pl":"0.0000","financing":"0.0000","accountBalance":"100000.0000","reason":"MARKET_ORDER","tradeOpened":{"tradeID":"6","units":"100"}}"#;
const DAILY_FINANCING: &str = r#"{"id":"7","accountID":"101-001-1234567-001","userID":1234567,"batchID":"7","time":"2024-01-03T21:00:00.000000000Z","type":"DAILY_FINANCING","financing":"-0.0123","accountBalance":"99999.9877"}"#;
const TRANSACTION_HEARTBEAT: &str = r#"{"type":"HEARTBEAT","lastTransactionID":"6","time":"2024-01-02T03:04:10.000000000Z"}"#;

fn ndjson(lines: &[&str]) -> String {
    lines.iter().map(|l| format!("{l}\n")).collect()
}

fn client(server: &MockServer) -> OandaClient {
    OandaClient::with_base_urls(TOKEN, server.uri(), server.uri()).unwrap()
}

// ===================================================================
// Pricing stream
// ===================================================================

#[tokio::test]
async fn pricing_stream_delivers_prices_and_ends_disconnected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v3/accounts/{ACCOUNT}/pricing/stream")))
        .and(query_param("instruments", "EUR_USD,USD_JPY"))
        .and(query_param("snapshot", "true"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("accept-datetime-format", "RFC3339"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ndjson(&[
            PRICE_EUR,
            PRICING_HEARTBEAT,
            PRICE_JPY,
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut req = PricingStreamRequest::new(["EUR_USD", "USD_JPY"]);
    req.snapshot = Some(true);
    let mut feed = client(&server).stream_pricing(ACCOUNT, &req).await.unwrap();

    let prices: Vec<Price> = feed.by_ref().collect().await;
    let instruments: Vec<&str> = prices.iter().map(|p| p.instrument.as_str()).collect();
    assert_eq!(instruments, ["EUR_USD", "USD_JPY"]);
    assert_eq!(prices[0].best_bid().unwrap().price, "1.10010");
    assert_eq!(prices[1].best_ask().unwrap().price, "141.262");

    assert!(matches!(feed.err(), Some(oanda_rs::FeedError::Disconnected)));
}

#[tokio::test]
async fn pricing_stream_rejection_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v3/accounts/{ACCOUNT}/pricing/stream")))
        .respond_with(ResponseTemplate::new(400).set_body_string(
            r#"{"errorMessage":"Invalid value specified for 'instruments'","errorCode":"INVALID_INSTRUMENT"}"#,
        ))
        .mount(&server)
        .await;

    let err = client(&server)
        .stream_pricing(ACCOUNT, &PricingStreamRequest::new(["NOT_AN_INSTRUMENT"]))
        .await
        .unwrap_err();

    match err {
        OandaError::Api { status, body } => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(body.error_code.as_deref(), Some("INVALID_INSTRUMENT"));
            assert!(body.to_string().contains("Invalid value"));
        }
        other => panic!("expected OandaError::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_rejection_is_an_http_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = client(&server)
        .stream_pricing(ACCOUNT, &PricingStreamRequest::new(["EUR_USD"]))
        .await
        .unwrap_err();

    assert_eq!(err.status().map(|s| s.as_u16()), Some(502));
    assert!(matches!(err, OandaError::HttpStatus { ref body, .. } if body == "bad gateway"));
}

#[tokio::test]
async fn empty_instrument_list_is_rejected_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let empty: [&str; 0] = [];
    let err = client(&server)
        .stream_pricing(ACCOUNT, &PricingStreamRequest::new(empty))
        .await
        .unwrap_err();
    assert!(matches!(err, OandaError::InvalidArgument(_)));
}

#[tokio::test]
async fn malformed_base_url_is_rejected() {
    let err = OandaClient::with_base_urls(TOKEN, "not a url", "https://stream.example").unwrap_err();
    assert!(matches!(err, OandaError::Url(_)));
}

// ===================================================================
// Transaction stream
// ===================================================================

#[tokio::test]
async fn transaction_stream_skips_heartbeats() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v3/accounts/{ACCOUNT}/transactions/stream")))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ndjson(&[
            TRANSACTION_HEARTBEAT,
            ORDER_FILL,
            TRANSACTION_HEARTBEAT,
            DAILY_FINANCING,
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut feed = client(&server)
        .stream_transactions(ACCOUNT, &TransactionStreamRequest::default())
        .await
        .unwrap();

    let transactions: Vec<Transaction> = feed.by_ref().collect().await;
    assert_eq!(transactions.len(), 2);

    let fill = &transactions[0];
    assert_eq!(fill.kind, TransactionType::ORDER_FILL);
    assert_eq!(fill.order_id.as_deref(), Some("5"));
    assert_eq!(fill.extra["tradeOpened"]["tradeID"], "6");
    assert!(!fill.is_reject());

    assert_eq!(transactions[1].kind, TransactionType::DAILY_FINANCING);
    assert!(feed.err().is_some_and(|e| !e.is_decode()));
}

// ===================================================================
// REST
// ===================================================================

#[tokio::test]
async fn pricing_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v3/accounts/{ACCOUNT}/pricing")))
        .and(query_param("instruments", "EUR_USD"))
        .and(query_param("includeHomeConversions", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"{{"prices":[{PRICE_EUR}],"homeConversions":[{{"currency":"USD","accountGain":"1","accountLoss":"1","positionValue":"1"}}],"time":"2024-01-02T03:04:08.000000000Z"}}"#
        )))
        .expect(1)
        .mount(&server)
        .await;

    let req = PricingRequest {
        instruments: vec!["EUR_USD".into()],
        since: None,
        include_home_conversions: Some(true),
    };
    let resp = client(&server).get_pricing(ACCOUNT, &req).await.unwrap();

    assert_eq!(resp.prices.len(), 1);
    assert_eq!(resp.prices[0].instrument, "EUR_USD");
    assert_eq!(resp.home_conversions[0].currency, "USD");
}

#[tokio::test]
async fn transactions_by_id_range_with_type_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v3/accounts/{ACCOUNT}/transactions/idrange")))
        .and(query_param("from", "6"))
        .and(query_param("to", "7"))
        .and(query_param("type", "ORDER_FILL,DAILY_FINANCING"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"{{"transactions":[{ORDER_FILL},{DAILY_FINANCING}],"lastTransactionID":"7"}}"#
        )))
        .expect(1)
        .mount(&server)
        .await;

    let req = TransactionIdRangeRequest {
        from: 6,
        to: 7,
        types: vec![TransactionType::ORDER_FILL, TransactionType::DAILY_FINANCING],
    };
    let resp = client(&server)
        .get_transactions_id_range(ACCOUNT, &req)
        .await
        .unwrap();

    assert_eq!(resp.last_transaction_id, "7");
    let ids: Vec<&str> = resp.transactions.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["6", "7"]);
}

#[tokio::test]
async fn inverted_id_range_is_rejected() {
    let server = MockServer::start().await;
    let req = TransactionIdRangeRequest {
        from: 9,
        to: 3,
        types: Vec::new(),
    };
    let err = client(&server)
        .get_transactions_id_range(ACCOUNT, &req)
        .await
        .unwrap_err();
    assert!(matches!(err, OandaError::InvalidArgument(_)));
}

#[tokio::test]
async fn transactions_since_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v3/accounts/{ACCOUNT}/transactions/sinceid")))
        .and(query_param("id", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"{{"transactions":[{ORDER_FILL}],"lastTransactionID":"6"}}"#
        )))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client(&server)
        .get_transactions_since_id(ACCOUNT, "5")
        .await
        .unwrap();
    assert_eq!(resp.transactions.len(), 1);
    assert_eq!(resp.transactions[0].instrument.as_deref(), Some("EUR_USD"));
}

#[tokio::test]
async fn single_transaction_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v3/accounts/{ACCOUNT}/transactions/999")))
        .respond_with(ResponseTemplate::new(404).set_body_string(
            r#"{"errorMessage":"The transaction ID specified does not exist","lastTransactionID":"7"}"#,
        ))
        .mount(&server)
        .await;

    let err = client(&server)
        .get_transaction(ACCOUNT, "999")
        .await
        .unwrap_err();
    match err {
        OandaError::Api { status, body } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(body.last_transaction_id.as_deref(), Some("7"));
        }
        other => panic!("expected OandaError::Api, got {other:?}"),
    }
}
