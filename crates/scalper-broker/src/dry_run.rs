//! Gateway wrapper that never sends orders.

use async_trait::async_trait;
use scalper_core::error::GatewayError;
use scalper_core::traits::OrderGateway;
use scalper_core::types::{AccountInfo, Quote, SymbolInfo, TradeRequest, TradeResult};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Forwards queries to the wrapped gateway and answers submissions with a
/// synthetic DONE result.
pub struct DryRunGateway<G> {
    inner: G,
    counter: AtomicU64,
}

impl<G: OrderGateway> DryRunGateway<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            counter: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Number of submissions swallowed so far.
    pub fn suppressed(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl<G: OrderGateway> OrderGateway for DryRunGateway<G> {
    async fn account_info(&self) -> Result<AccountInfo, GatewayError> {
        self.inner.account_info().await
    }

    async fn symbol_info(&self, symbol: &str) -> Result<Option<SymbolInfo>, GatewayError> {
        self.inner.symbol_info(symbol).await
    }

    async fn latest_quote(&self, symbol: &str) -> Result<Option<Quote>, GatewayError> {
        self.inner.latest_quote(symbol).await
    }

    async fn submit(&self, request: &TradeRequest) -> Result<TradeResult, GatewayError> {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        info!(
            gateway = self.inner.name(),
            symbol = %request.symbol,
            side = %request.side,
            volume = %request.volume,
            price = %request.price,
            "[DRY RUN] Order not sent"
        );
        Ok(TradeResult::done(request, 0, n))
    }

    fn name(&self) -> &str {
        "dry-run"
    }
}
