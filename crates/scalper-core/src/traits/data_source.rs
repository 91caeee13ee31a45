//! Market data collaborator traits.

use crate::error::DataError;
use crate::types::{BarSeries, Quote, Timeframe};
use async_trait::async_trait;
use std::sync::Arc;

/// Supplies the trailing window of bars for a symbol.
#[async_trait]
pub trait BarSeriesProvider: Send + Sync {
    /// Fetch the newest `count` bars, ordered from oldest to newest.
    ///
    /// An empty series means the data is temporarily unavailable; callers
    /// back off and retry rather than treating it as fatal. `Err` is
    /// reserved for transport or parse failures.
    async fn fetch_bars(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<BarSeries, DataError>;

    /// Get the provider name.
    fn name(&self) -> &str;
}

/// Trait for real-time quote sources.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Get the latest quote for a symbol, if one is available.
    async fn latest_quote(&self, symbol: &str) -> Result<Option<Quote>, DataError>;
}

#[async_trait]
impl<T: BarSeriesProvider + ?Sized> BarSeriesProvider for Arc<T> {
    async fn fetch_bars(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<BarSeries, DataError> {
        (**self).fetch_bars(symbol, timeframe, count).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
