//! Trade request and result types exchanged with the order gateway.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Get the opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Kind of trade operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    /// Immediate execution at market
    #[default]
    Deal,
}

/// Order lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeInForce {
    /// Good till cancelled
    #[default]
    #[serde(rename = "gtc")]
    GTC,
    /// Valid for the trading day only
    Day,
}

/// Volume fill policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FillPolicy {
    /// Fill or kill
    #[serde(rename = "fok")]
    FOK,
    /// Immediate or cancel
    #[default]
    #[serde(rename = "ioc")]
    IOC,
    /// Leave the unfilled remainder in the book
    Return,
}

/// Terminal return codes.
pub mod retcode {
    pub const REQUOTE: u32 = 10004;
    pub const REJECT: u32 = 10006;
    pub const PLACED: u32 = 10008;
    pub const DONE: u32 = 10009;
    pub const INVALID_VOLUME: u32 = 10014;
    pub const INVALID_PRICE: u32 = 10015;
    pub const INVALID_STOPS: u32 = 10016;
    pub const TRADE_DISABLED: u32 = 10017;
    pub const MARKET_CLOSED: u32 = 10018;
    pub const NO_MONEY: u32 = 10019;
    pub const PRICE_CHANGED: u32 = 10020;

    /// Short description of a return code, for logs.
    pub fn describe(code: u32) -> &'static str {
        match code {
            REQUOTE => "requote",
            REJECT => "request rejected",
            PLACED => "order placed",
            DONE => "request completed",
            INVALID_VOLUME => "invalid volume",
            INVALID_PRICE => "invalid price",
            INVALID_STOPS => "invalid stops",
            TRADE_DISABLED => "trade disabled",
            MARKET_CLOSED => "market closed",
            NO_MONEY => "not enough money",
            PRICE_CHANGED => "price changed",
            _ => "unknown retcode",
        }
    }
}

/// Fixed parameters applied to every order the scalper sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeParams {
    /// Symbol to trade
    pub symbol: String,
    /// Order size in lots
    pub volume: Decimal,
    /// Maximum accepted price deviation, in points
    pub deviation: u32,
    /// Expert identifier stamped on every order
    pub magic: u64,
    /// Order comment
    pub comment: String,
    pub time_in_force: TimeInForce,
    pub filling: FillPolicy,
    /// Stop-loss distance in pips
    pub stop_loss_pips: Decimal,
    /// Take-profit distance in pips
    pub take_profit_pips: Decimal,
    /// Attach stop-loss/take-profit levels to the request
    pub attach_protective_levels: bool,
}

impl Default for TradeParams {
    fn default() -> Self {
        Self {
            symbol: "XAUUSD".to_string(),
            volume: Decimal::new(1, 1),
            deviation: 10,
            magic: 123456,
            comment: "Bot Trading XAU/USD".to_string(),
            time_in_force: TimeInForce::GTC,
            filling: FillPolicy::IOC,
            stop_loss_pips: Decimal::from(10),
            take_profit_pips: Decimal::from(10),
            attach_protective_levels: false,
        }
    }
}

/// Market order request handed to the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRequest {
    pub action: TradeAction,
    pub symbol: String,
    pub side: Side,
    /// Size in lots
    pub volume: Decimal,
    /// Live ask for buys, live bid for sells
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<Decimal>,
    pub deviation: u32,
    pub magic: u64,
    pub comment: String,
    pub time_in_force: TimeInForce,
    pub filling: FillPolicy,
}

impl TradeRequest {
    /// Create a market deal from the fixed trade parameters.
    pub fn market(params: &TradeParams, side: Side, price: Decimal) -> Self {
        Self {
            action: TradeAction::Deal,
            symbol: params.symbol.clone(),
            side,
            volume: params.volume,
            price,
            stop_loss: None,
            take_profit: None,
            deviation: params.deviation,
            magic: params.magic,
            comment: params.comment.clone(),
            time_in_force: params.time_in_force,
            filling: params.filling,
        }
    }

    /// Set the stop-loss and take-profit levels.
    pub fn with_protective_levels(mut self, stop_loss: Decimal, take_profit: Decimal) -> Self {
        self.stop_loss = Some(stop_loss);
        self.take_profit = Some(take_profit);
        self
    }
}

/// Terminal answer to a trade request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeResult {
    pub retcode: u32,
    /// Terminal comment, the reason string on failure
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub order: Option<u64>,
    #[serde(default)]
    pub deal: Option<u64>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub volume: Option<Decimal>,
}

impl TradeResult {
    /// Successful execution of `request` with the given tickets.
    pub fn done(request: &TradeRequest, order: u64, deal: u64) -> Self {
        Self {
            retcode: retcode::DONE,
            comment: "Request executed".to_string(),
            order: Some(order),
            deal: Some(deal),
            price: Some(request.price),
            volume: Some(request.volume),
        }
    }

    /// Refusal with a terminal return code.
    pub fn rejected(code: u32, comment: impl Into<String>) -> Self {
        Self {
            retcode: code,
            comment: comment.into(),
            order: None,
            deal: None,
            price: None,
            volume: None,
        }
    }

    /// Whether the request was executed.
    pub fn is_done(&self) -> bool {
        self.retcode == retcode::DONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_market_request_from_params() {
        let params = TradeParams::default();
        let request = TradeRequest::market(&params, Side::Buy, dec!(2345.67));

        assert_eq!(request.symbol, "XAUUSD");
        assert_eq!(request.side, Side::Buy);
        assert_eq!(request.volume, dec!(0.1));
        assert_eq!(request.price, dec!(2345.67));
        assert_eq!(request.deviation, 10);
        assert_eq!(request.magic, 123456);
        assert_eq!(request.time_in_force, TimeInForce::GTC);
        assert_eq!(request.filling, FillPolicy::IOC);
        assert!(request.stop_loss.is_none());
        assert!(request.take_profit.is_none());
    }

    #[test]
    fn test_request_json_shape() {
        let request = TradeRequest::market(&TradeParams::default(), Side::Sell, dec!(2000.5));
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["action"], "deal");
        assert_eq!(json["side"], "sell");
        assert_eq!(json["time_in_force"], "gtc");
        assert_eq!(json["filling"], "ioc");
        assert!(json.get("stop_loss").is_none());

        let with_levels = request.with_protective_levels(dec!(2001.5), dec!(1999.5));
        let json = serde_json::to_value(&with_levels).unwrap();
        assert!(json.get("stop_loss").is_some());
    }

    #[test]
    fn test_result_status() {
        let request = TradeRequest::market(&TradeParams::default(), Side::Buy, dec!(1));
        assert!(TradeResult::done(&request, 1, 2).is_done());

        let rejected = TradeResult::rejected(retcode::NO_MONEY, "No money");
        assert!(!rejected.is_done());
        assert_eq!(retcode::describe(rejected.retcode), "not enough money");
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }
}
