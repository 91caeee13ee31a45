//! Core data types for the scalper.

mod market;
mod ohlcv;
mod order;
mod signal;
mod timeframe;

pub use market::{AccountInfo, Quote, SymbolInfo, TradeMode};
pub use ohlcv::{Bar, BarSeries};
pub use order::{
    retcode, FillPolicy, Side, TimeInForce, TradeAction, TradeParams, TradeRequest, TradeResult,
};
pub use signal::Signal;
pub use timeframe::Timeframe;
