//! TerminalBridge against a mocked bridge service.

use rust_decimal_macros::dec;
use scalper_broker::{BridgeConfig, TerminalBridge};
use scalper_core::error::{DataError, GatewayError};
use scalper_core::traits::{BarSeriesProvider, OrderGateway};
use scalper_core::types::{retcode, Side, Timeframe, TradeMode, TradeParams, TradeRequest};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn bridge(server: &MockServer) -> TerminalBridge {
    TerminalBridge::new(BridgeConfig::new(server.uri()).with_api_key("secret")).unwrap()
}

fn account_body() -> serde_json::Value {
    json!({
        "login": 5012345,
        "server": "Broker-Demo",
        "currency": "USD",
        "balance": "10000.00",
        "equity": "10012.50",
        "trade_allowed": true
    })
}

#[tokio::test]
async fn connect_sends_api_key_and_reads_account() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/account"))
        .and(header("X-API-Key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(account_body()))
        .expect(1)
        .mount(&server)
        .await;

    let account = bridge(&server).await.connect().await.unwrap();

    assert_eq!(account.login, 5012345);
    assert_eq!(account.balance, dec!(10000.00));
}

#[tokio::test]
async fn connect_failure_is_session_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/account"))
        .respond_with(ResponseTemplate::new(503).set_body_string("terminal not logged in"))
        .mount(&server)
        .await;

    let err = bridge(&server).await.connect().await.unwrap_err();
    assert!(matches!(err, GatewayError::Session(_)));
}

#[tokio::test]
async fn unknown_symbol_and_missing_tick_are_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/symbols/FOO"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/symbols/FOO/tick"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let bridge = bridge(&server).await;
    assert!(bridge.symbol_info("FOO").await.unwrap().is_none());
    assert!(bridge.latest_quote("FOO").await.unwrap().is_none());
}

#[tokio::test]
async fn symbol_info_and_tick() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/symbols/XAUUSD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "XAUUSD",
            "trade_mode": "full",
            "digits": 2,
            "point": "0.01",
            "volume_min": "0.01",
            "volume_max": "100",
            "volume_step": "0.01"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/symbols/XAUUSD/tick"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "time": 1705312800,
            "bid": "2030.10",
            "ask": "2030.35"
        })))
        .mount(&server)
        .await;

    let bridge = bridge(&server).await;
    let info = bridge.symbol_info("XAUUSD").await.unwrap().unwrap();
    assert_eq!(info.trade_mode, TradeMode::Full);
    assert_eq!(info.pip_size(), dec!(0.1));

    let quote = bridge.latest_quote("XAUUSD").await.unwrap().unwrap();
    assert_eq!(quote.ask, dec!(2030.35));
    assert_eq!(quote.timestamp, 1_705_312_800_000);
}

#[tokio::test]
async fn fetch_bars_queries_timeframe_and_count() {
    let server = MockServer::start().await;
    let rates: Vec<_> = (0..3)
        .map(|i| {
            json!({
                "time": 1705312800 + i * 60,
                "open": 2030.0 + i as f64,
                "high": 2031.0 + i as f64,
                "low": 2029.0 + i as f64,
                "close": 2030.5 + i as f64,
                "tick_volume": 100 + i,
                "spread": 20,
                "real_volume": 0
            })
        })
        .collect();
    Mock::given(method("GET"))
        .and(path("/v1/rates/XAUUSD"))
        .and(query_param("timeframe", "M1"))
        .and(query_param("count", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(rates)))
        .expect(1)
        .mount(&server)
        .await;

    let series = bridge(&server)
        .await
        .fetch_bars("XAUUSD", Timeframe::M1, 100)
        .await
        .unwrap();

    assert_eq!(series.len(), 3);
    assert_eq!(series.timeframe, Timeframe::M1);
    assert_eq!(series.last().unwrap().close, 2032.5);
    assert_eq!(series.get(0).unwrap().timestamp, 1_705_312_800_000);
}

#[tokio::test]
async fn fetch_bars_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/rates/FOO"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/rates/BAD"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let bridge = bridge(&server).await;
    assert!(matches!(
        bridge.fetch_bars("FOO", Timeframe::M1, 100).await,
        Err(DataError::SymbolNotFound(_))
    ));
    assert!(matches!(
        bridge.fetch_bars("BAD", Timeframe::M1, 100).await,
        Err(DataError::Parse(_))
    ));
}

#[tokio::test]
async fn submit_posts_request_and_reads_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .and(body_partial_json(json!({
            "action": "deal",
            "symbol": "XAUUSD",
            "side": "buy",
            "magic": 123456
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "retcode": 10009,
            "comment": "Request executed",
            "order": 77,
            "deal": 78,
            "price": "2030.35",
            "volume": "0.1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = TradeRequest::market(&TradeParams::default(), Side::Buy, dec!(2030.35));
    let result = bridge(&server).await.submit(&request).await.unwrap();

    assert!(result.is_done());
    assert_eq!(result.order, Some(77));
}

#[tokio::test]
async fn submit_rejection_is_ok_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "retcode": retcode::MARKET_CLOSED,
            "comment": "Market closed"
        })))
        .mount(&server)
        .await;

    let request = TradeRequest::market(&TradeParams::default(), Side::Sell, dec!(2030.10));
    let result = bridge(&server).await.submit(&request).await.unwrap();

    assert!(!result.is_done());
    assert_eq!(result.comment, "Market closed");
}
