//! HTTP bridge to the trading terminal.
//!
//! The bridge is a small service running next to the terminal that exposes
//! its session over REST:
//!
//! | call                         | terminal function          |
//! |------------------------------|----------------------------|
//! | `GET  /v1/account`           | account info               |
//! | `GET  /v1/symbols/{s}`       | symbol info (404 = unknown)|
//! | `GET  /v1/symbols/{s}/tick`  | latest tick (404 = none)   |
//! | `GET  /v1/rates/{s}`         | newest bars by count       |
//! | `POST /v1/orders`            | order send                 |

use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use rust_decimal::Decimal;
use scalper_core::error::{DataError, GatewayError};
use scalper_core::traits::{BarSeriesProvider, OrderGateway};
use scalper_core::types::{
    AccountInfo, Bar, BarSeries, Quote, SymbolInfo, Timeframe, TradeRequest, TradeResult,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

const API_KEY_HEADER: &str = "X-API-Key";

/// Bridge connection settings.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl BridgeConfig {
    /// Create config for a bridge at `base_url` with no API key.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read the API key from the environment variable `api_key_env`.
    ///
    /// An unset variable leaves the key empty; the bridge decides whether it
    /// needs one.
    pub fn from_env(base_url: impl Into<String>, api_key_env: &str, timeout: Duration) -> Self {
        let config = Self::new(base_url).with_timeout(timeout);
        match std::env::var(api_key_env) {
            Ok(key) if !key.is_empty() => config.with_api_key(key),
            _ => {
                warn!(var = api_key_env, "Bridge API key not set, connecting without one");
                config
            }
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Bar as the terminal reports it: unix seconds and tick volume.
#[derive(Debug, Deserialize)]
struct WireRate {
    time: i64,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    tick_volume: f64,
}

impl From<WireRate> for Bar {
    fn from(rate: WireRate) -> Self {
        Bar::new(
            rate.time * 1000,
            rate.open,
            rate.high,
            rate.low,
            rate.close,
            rate.tick_volume,
        )
    }
}

#[derive(Debug, Deserialize)]
struct WireTick {
    time: i64,
    #[serde(default)]
    time_msc: Option<i64>,
    bid: Decimal,
    ask: Decimal,
}

/// Terminal bridge client.
pub struct TerminalBridge {
    config: BridgeConfig,
    client: Client,
}

impl TerminalBridge {
    /// Create a new bridge client.
    pub fn new(config: BridgeConfig) -> Result<Self, GatewayError> {
        let mut headers = header::HeaderMap::new();
        if let Some(key) = &config.api_key {
            headers.insert(
                API_KEY_HEADER,
                header::HeaderValue::from_str(key)
                    .map_err(|e| GatewayError::Configuration(e.to_string()))?,
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Verify the terminal session.
    ///
    /// Any failure is reported as [`GatewayError::Session`]; without a session
    /// nothing else can work.
    pub async fn connect(&self) -> Result<AccountInfo, GatewayError> {
        let account = self.account_info().await.map_err(|e| match e {
            GatewayError::Session(msg) => GatewayError::Session(msg),
            other => GatewayError::Session(other.to_string()),
        })?;

        info!(
            login = account.login,
            server = %account.server,
            balance = %account.balance,
            "Connected to trading terminal"
        );
        if !account.trade_allowed {
            warn!(login = account.login, "Trading is not allowed on this account");
        }

        Ok(account)
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Response, GatewayError> {
        let url = self.config.url(path);
        debug!(%url, "GET");
        self.client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| GatewayError::Connection(e.to_string()))
    }

    /// GET a resource that may legitimately not exist.
    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, GatewayError> {
        let resp = self.get(path, &[]).await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(resp).await.map(Some)
    }

    async fn rates(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<Option<Vec<WireRate>>, GatewayError> {
        let query = [
            ("timeframe", timeframe.label().to_string()),
            ("count", count.to_string()),
        ];
        let resp = self.get(&format!("/v1/rates/{}", symbol), &query).await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(resp).await.map(Some)
    }
}

/// Check the status and decode a JSON body.
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, GatewayError> {
    let status = resp.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        let text = resp.text().await.unwrap_or_default();
        return Err(GatewayError::Session(format!("{}: {}", status, text)));
    }
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        return Err(GatewayError::Api(format!("{}: {}", status, text)));
    }

    resp.json()
        .await
        .map_err(|e| GatewayError::Serialization(e.to_string()))
}

#[async_trait]
impl OrderGateway for TerminalBridge {
    async fn account_info(&self) -> Result<AccountInfo, GatewayError> {
        let resp = self.get("/v1/account", &[]).await?;
        decode(resp).await
    }

    async fn symbol_info(&self, symbol: &str) -> Result<Option<SymbolInfo>, GatewayError> {
        self.get_optional(&format!("/v1/symbols/{}", symbol)).await
    }

    async fn latest_quote(&self, symbol: &str) -> Result<Option<Quote>, GatewayError> {
        let tick: Option<WireTick> = self
            .get_optional(&format!("/v1/symbols/{}/tick", symbol))
            .await?;

        Ok(tick.map(|t| Quote {
            symbol: symbol.to_string(),
            bid: t.bid,
            ask: t.ask,
            timestamp: t.time_msc.unwrap_or(t.time * 1000),
        }))
    }

    async fn submit(&self, request: &TradeRequest) -> Result<TradeResult, GatewayError> {
        let url = self.config.url("/v1/orders");
        debug!(%url, symbol = %request.symbol, side = %request.side, "POST order");

        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::Connection(e.to_string()))?;

        decode(resp).await
    }

    fn name(&self) -> &str {
        "terminal-bridge"
    }
}

#[async_trait]
impl BarSeriesProvider for TerminalBridge {
    async fn fetch_bars(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<BarSeries, DataError> {
        let rates = self
            .rates(symbol, timeframe, count)
            .await
            .map_err(|e| match e {
                GatewayError::Serialization(msg) => DataError::Parse(msg),
                other => DataError::Connection(other.to_string()),
            })?
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))?;

        let mut bars: Vec<Bar> = rates.into_iter().map(Bar::from).collect();
        bars.sort_by_key(|b| b.timestamp);

        Ok(BarSeries::from_bars(symbol, timeframe, bars).trailing(count))
    }

    fn name(&self) -> &str {
        "terminal-bridge"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let config = BridgeConfig::new("http://127.0.0.1:8080/");
        assert_eq!(config.url("/v1/account"), "http://127.0.0.1:8080/v1/account");
    }

    #[test]
    fn test_wire_rate_to_bar() {
        let rate: WireRate = serde_json::from_str(
            r#"{"time": 1705312800, "open": 1.0, "high": 2.0, "low": 0.5, "close": 1.5, "tick_volume": 42, "spread": 3}"#,
        )
        .unwrap();
        let bar = Bar::from(rate);

        assert_eq!(bar.timestamp, 1_705_312_800_000);
        assert_eq!(bar.volume, 42.0);
    }

    #[test]
    fn test_invalid_api_key_header() {
        let config = BridgeConfig::new("http://localhost").with_api_key("bad\nkey");
        assert!(matches!(
            TerminalBridge::new(config),
            Err(GatewayError::Configuration(_))
        ));
    }
}
