//! Order gateway trait definition.

use crate::error::GatewayError;
use crate::types::{AccountInfo, Quote, SymbolInfo, TradeRequest, TradeResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for the trading terminal that executes orders.
///
/// The gateway owns the broker session. The scalper asks it for the symbol
/// specification and the live quote before every submission.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Account the session is logged into.
    ///
    /// Failing here at startup means there is no usable session.
    async fn account_info(&self) -> Result<AccountInfo, GatewayError>;

    /// Symbol specification, `None` when the terminal does not know it.
    async fn symbol_info(&self, symbol: &str) -> Result<Option<SymbolInfo>, GatewayError>;

    /// Latest bid/ask, `None` when the terminal has no tick yet.
    async fn latest_quote(&self, symbol: &str) -> Result<Option<Quote>, GatewayError>;

    /// Send a trade request.
    ///
    /// A refusal by the terminal is an `Ok` result with a non-DONE retcode.
    async fn submit(&self, request: &TradeRequest) -> Result<TradeResult, GatewayError>;

    /// Get the gateway name.
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: OrderGateway + ?Sized> OrderGateway for Arc<T> {
    async fn account_info(&self) -> Result<AccountInfo, GatewayError> {
        (**self).account_info().await
    }

    async fn symbol_info(&self, symbol: &str) -> Result<Option<SymbolInfo>, GatewayError> {
        (**self).symbol_info(symbol).await
    }

    async fn latest_quote(&self, symbol: &str) -> Result<Option<Quote>, GatewayError> {
        (**self).latest_quote(symbol).await
    }

    async fn submit(&self, request: &TradeRequest) -> Result<TradeResult, GatewayError> {
        (**self).submit(request).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
