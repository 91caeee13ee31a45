//! Paper trading terminal for simulation.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use scalper_core::error::{DataError, GatewayError};
use scalper_core::traits::{OrderGateway, QuoteSource};
use scalper_core::types::{retcode, AccountInfo, Quote, SymbolInfo, TradeRequest, TradeResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Map-backed quote source.
#[derive(Debug, Default)]
pub struct StaticQuotes {
    quotes: Mutex<HashMap<String, Quote>>,
}

impl StaticQuotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bid/ask for a symbol, stamped with the current time.
    pub fn set(&self, symbol: &str, bid: Decimal, ask: Decimal) {
        let quote = Quote {
            symbol: symbol.to_string(),
            bid,
            ask,
            timestamp: Utc::now().timestamp_millis(),
        };
        lock(&self.quotes).insert(symbol.to_string(), quote);
    }

    pub fn with_quote(self, symbol: &str, bid: Decimal, ask: Decimal) -> Self {
        self.set(symbol, bid, ask);
        self
    }
}

#[async_trait]
impl QuoteSource for StaticQuotes {
    async fn latest_quote(&self, symbol: &str) -> Result<Option<Quote>, DataError> {
        Ok(lock(&self.quotes).get(symbol).cloned())
    }
}

/// In-memory terminal.
///
/// Knows a fixed set of symbols, prices from a [`QuoteSource`], records every
/// request it receives and fills it at the requested price unless configured
/// to reject.
pub struct PaperTerminal {
    account: AccountInfo,
    symbols: HashMap<String, SymbolInfo>,
    quotes: Arc<dyn QuoteSource>,
    reject_with: Option<u32>,
    submitted: Mutex<Vec<TradeRequest>>,
    next_ticket: AtomicU64,
}

impl PaperTerminal {
    /// Create a terminal with the given starting balance.
    pub fn new(balance: Decimal, quotes: Arc<dyn QuoteSource>) -> Self {
        Self {
            account: AccountInfo {
                login: 0,
                server: "paper".to_string(),
                currency: "USD".to_string(),
                balance,
                equity: balance,
                trade_allowed: true,
            },
            symbols: HashMap::new(),
            quotes,
            reject_with: None,
            submitted: Mutex::new(Vec::new()),
            next_ticket: AtomicU64::new(1),
        }
    }

    /// Register a tradable symbol.
    pub fn with_symbol(mut self, info: SymbolInfo) -> Self {
        self.symbols.insert(info.name.clone(), info);
        self
    }

    /// Answer every submission with `code` instead of filling it.
    pub fn rejecting(mut self, code: u32) -> Self {
        self.reject_with = Some(code);
        self
    }

    /// Requests received so far, oldest first.
    pub fn submitted(&self) -> Vec<TradeRequest> {
        lock(&self.submitted).clone()
    }
}

#[async_trait]
impl OrderGateway for PaperTerminal {
    async fn account_info(&self) -> Result<AccountInfo, GatewayError> {
        Ok(self.account.clone())
    }

    async fn symbol_info(&self, symbol: &str) -> Result<Option<SymbolInfo>, GatewayError> {
        Ok(self.symbols.get(symbol).cloned())
    }

    async fn latest_quote(&self, symbol: &str) -> Result<Option<Quote>, GatewayError> {
        self.quotes
            .latest_quote(symbol)
            .await
            .map_err(|e| GatewayError::Connection(e.to_string()))
    }

    async fn submit(&self, request: &TradeRequest) -> Result<TradeResult, GatewayError> {
        lock(&self.submitted).push(request.clone());

        if let Some(code) = self.reject_with {
            return Ok(TradeResult::rejected(code, retcode::describe(code)));
        }

        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        info!(
            ticket,
            symbol = %request.symbol,
            side = %request.side,
            volume = %request.volume,
            price = %request.price,
            "Paper fill"
        );

        Ok(TradeResult::done(request, ticket, ticket))
    }

    fn name(&self) -> &str {
        "paper"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use scalper_core::types::{Side, TradeMode, TradeParams};

    fn xauusd() -> SymbolInfo {
        SymbolInfo {
            name: "XAUUSD".to_string(),
            trade_mode: TradeMode::Full,
            digits: 2,
            point: dec!(0.01),
            volume_min: dec!(0.01),
            volume_max: dec!(100),
            volume_step: dec!(0.01),
        }
    }

    fn terminal() -> PaperTerminal {
        let quotes = StaticQuotes::new().with_quote("XAUUSD", dec!(2030.10), dec!(2030.30));
        PaperTerminal::new(dec!(10000), Arc::new(quotes)).with_symbol(xauusd())
    }

    #[tokio::test]
    async fn test_fills_at_request_price() {
        let terminal = terminal();
        let request = TradeRequest::market(&TradeParams::default(), Side::Buy, dec!(2030.30));

        let result = terminal.submit(&request).await.unwrap();

        assert!(result.is_done());
        assert_eq!(result.price, Some(dec!(2030.30)));
        assert_eq!(result.order, Some(1));
        assert_eq!(terminal.submitted(), vec![request]);
    }

    #[tokio::test]
    async fn test_forced_rejection() {
        let terminal = terminal().rejecting(retcode::NO_MONEY);
        let request = TradeRequest::market(&TradeParams::default(), Side::Sell, dec!(2030.10));

        let result = terminal.submit(&request).await.unwrap();

        assert!(!result.is_done());
        assert_eq!(result.retcode, retcode::NO_MONEY);
        assert_eq!(terminal.submitted().len(), 1);
    }

    #[tokio::test]
    async fn test_lookups() {
        let terminal = terminal();

        assert!(terminal.symbol_info("XAUUSD").await.unwrap().is_some());
        assert!(terminal.symbol_info("EURUSD").await.unwrap().is_none());
        assert_eq!(
            terminal.latest_quote("XAUUSD").await.unwrap().unwrap().ask,
            dec!(2030.30)
        );
        assert!(terminal.latest_quote("EURUSD").await.unwrap().is_none());
        assert_eq!(terminal.account_info().await.unwrap().balance, dec!(10000));
    }
}
