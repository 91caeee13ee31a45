//! Live market and account metadata reported by the terminal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Side;

/// A real-time quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Symbol
    pub symbol: String,
    /// Best bid price
    pub bid: Decimal,
    /// Best ask price
    pub ask: Decimal,
    /// Timestamp (Unix milliseconds)
    pub timestamp: i64,
}

impl Quote {
    /// Price a market order on `side` executes against.
    pub fn price_for(&self, side: Side) -> Decimal {
        match side {
            Side::Buy => self.ask,
            Side::Sell => self.bid,
        }
    }

    /// Get the spread.
    pub fn spread(&self) -> Decimal {
        self.ask - self.bid
    }
}

/// Which new positions the broker accepts on a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TradeMode {
    Disabled,
    LongOnly,
    ShortOnly,
    CloseOnly,
    #[default]
    Full,
}

impl TradeMode {
    /// Whether a new position on `side` may be opened.
    pub fn allows(&self, side: Side) -> bool {
        match self {
            TradeMode::Full => true,
            TradeMode::LongOnly => side == Side::Buy,
            TradeMode::ShortOnly => side == Side::Sell,
            TradeMode::Disabled | TradeMode::CloseOnly => false,
        }
    }
}

/// Symbol specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolInfo {
    pub name: String,
    pub trade_mode: TradeMode,
    /// Number of decimal places in quotes
    pub digits: u32,
    /// Smallest price increment
    pub point: Decimal,
    pub volume_min: Decimal,
    pub volume_max: Decimal,
    pub volume_step: Decimal,
}

impl SymbolInfo {
    /// Pip size, taken as ten points.
    pub fn pip_size(&self) -> Decimal {
        self.point * Decimal::TEN
    }
}

/// Trading account the session is logged into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub login: u64,
    #[serde(default)]
    pub server: String,
    #[serde(default)]
    pub currency: String,
    pub balance: Decimal,
    pub equity: Decimal,
    #[serde(default = "default_trade_allowed")]
    pub trade_allowed: bool,
}

fn default_trade_allowed() -> bool {
    true
}
