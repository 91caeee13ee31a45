//! Order placement.

use rust_decimal::Decimal;
use scalper_core::error::GatewayError;
use scalper_core::traits::OrderGateway;
use scalper_core::types::{retcode, Side, SymbolInfo, TradeParams, TradeRequest, TradeResult};
use std::fmt;
use tracing::{info, warn};

/// Why an order was not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclineReason {
    /// The terminal does not know the symbol
    SymbolNotFound,
    /// The symbol's trade mode forbids opening this side
    TradingDisabled,
    /// No live bid/ask to price the order
    NoQuote,
}

impl fmt::Display for DeclineReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclineReason::SymbolNotFound => write!(f, "symbol not found"),
            DeclineReason::TradingDisabled => write!(f, "trading disabled for symbol"),
            DeclineReason::NoQuote => write!(f, "no live quote"),
        }
    }
}

/// Result of one placement attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderOutcome {
    Executed(TradeResult),
    Declined(DeclineReason),
    Rejected { retcode: u32, message: String },
}

/// Stop-loss and take-profit prices for a position opened at `price`.
///
/// Distances are in pips of ten points; results are rounded to the symbol's
/// quote digits.
pub fn protective_levels(
    info: &SymbolInfo,
    side: Side,
    price: Decimal,
    stop_loss_pips: Decimal,
    take_profit_pips: Decimal,
) -> (Decimal, Decimal) {
    let pip = info.pip_size();
    let sl_distance = stop_loss_pips * pip;
    let tp_distance = take_profit_pips * pip;

    let (stop_loss, take_profit) = match side {
        Side::Buy => (price - sl_distance, price + tp_distance),
        Side::Sell => (price + sl_distance, price - tp_distance),
    };

    (stop_loss.round_dp(info.digits), take_profit.round_dp(info.digits))
}

/// Turns a side into a market order on the configured symbol.
#[derive(Debug, Clone)]
pub struct OrderPlacer {
    params: TradeParams,
}

impl OrderPlacer {
    pub fn new(params: TradeParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &TradeParams {
        &self.params
    }

    /// Build the request for `side` at the live `price`.
    pub fn build_request(&self, info: &SymbolInfo, side: Side, price: Decimal) -> TradeRequest {
        let request = TradeRequest::market(&self.params, side, price);
        if !self.params.attach_protective_levels {
            return request;
        }

        let (stop_loss, take_profit) = protective_levels(
            info,
            side,
            price,
            self.params.stop_loss_pips,
            self.params.take_profit_pips,
        );
        request.with_protective_levels(stop_loss, take_profit)
    }

    /// Check the symbol, price the order from the live quote and submit it.
    ///
    /// Transport failures come back as `Err`; everything the terminal
    /// answers is an [`OrderOutcome`].
    pub async fn place<G>(&self, gateway: &G, side: Side) -> Result<OrderOutcome, GatewayError>
    where
        G: OrderGateway + ?Sized,
    {
        let symbol = self.params.symbol.as_str();

        let Some(info) = gateway.symbol_info(symbol).await? else {
            warn!(symbol, "Symbol not found");
            return Ok(OrderOutcome::Declined(DeclineReason::SymbolNotFound));
        };

        if !info.trade_mode.allows(side) {
            warn!(symbol, %side, mode = ?info.trade_mode, "Trading disabled for symbol");
            return Ok(OrderOutcome::Declined(DeclineReason::TradingDisabled));
        }

        let Some(quote) = gateway.latest_quote(symbol).await? else {
            warn!(symbol, "No quote available");
            return Ok(OrderOutcome::Declined(DeclineReason::NoQuote));
        };

        let price = quote.price_for(side);
        let request = self.build_request(&info, side, price);

        info!(
            symbol,
            %side,
            volume = %request.volume,
            %price,
            stop_loss = ?request.stop_loss,
            take_profit = ?request.take_profit,
            "Sending order"
        );

        let result = gateway.submit(&request).await?;
        if result.is_done() {
            info!(
                order = ?result.order,
                deal = ?result.deal,
                price = ?result.price,
                "Order executed"
            );
            Ok(OrderOutcome::Executed(result))
        } else {
            let message = if result.comment.is_empty() {
                retcode::describe(result.retcode).to_string()
            } else {
                result.comment
            };
            warn!(retcode = result.retcode, %message, "Order failed");
            Ok(OrderOutcome::Rejected {
                retcode: result.retcode,
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use scalper_broker::{PaperTerminal, StaticQuotes};
    use scalper_core::types::TradeMode;
    use std::sync::Arc;

    fn xauusd(trade_mode: TradeMode) -> SymbolInfo {
        SymbolInfo {
            name: "XAUUSD".to_string(),
            trade_mode,
            digits: 2,
            point: dec!(0.01),
            volume_min: dec!(0.01),
            volume_max: dec!(100),
            volume_step: dec!(0.01),
        }
    }

    fn terminal(trade_mode: TradeMode) -> PaperTerminal {
        let quotes = StaticQuotes::new().with_quote("XAUUSD", dec!(2030.10), dec!(2030.35));
        PaperTerminal::new(dec!(10000), Arc::new(quotes)).with_symbol(xauusd(trade_mode))
    }

    #[test]
    fn test_protective_levels() {
        let info = xauusd(TradeMode::Full);

        let (sl, tp) = protective_levels(&info, Side::Buy, dec!(2030.35), dec!(10), dec!(10));
        assert_eq!(sl, dec!(2029.35));
        assert_eq!(tp, dec!(2031.35));

        let (sl, tp) = protective_levels(&info, Side::Sell, dec!(2030.10), dec!(10), dec!(20));
        assert_eq!(sl, dec!(2031.10));
        assert_eq!(tp, dec!(2028.10));
    }

    #[test]
    fn test_levels_not_attached_by_default() {
        let placer = OrderPlacer::new(TradeParams::default());
        let request = placer.build_request(&xauusd(TradeMode::Full), Side::Buy, dec!(2030.35));

        assert_eq!(request.stop_loss, None);
        assert_eq!(request.take_profit, None);
        assert_eq!(request.volume, dec!(0.1));
        assert_eq!(request.deviation, 10);
        assert_eq!(request.magic, 123456);
    }

    #[test]
    fn test_levels_attached_on_request() {
        let placer = OrderPlacer::new(TradeParams {
            attach_protective_levels: true,
            ..Default::default()
        });
        let request = placer.build_request(&xauusd(TradeMode::Full), Side::Buy, dec!(2030.35));

        assert_eq!(request.stop_loss, Some(dec!(2029.35)));
        assert_eq!(request.take_profit, Some(dec!(2031.35)));
    }

    #[tokio::test]
    async fn test_buy_uses_ask_and_sell_uses_bid() {
        let placer = OrderPlacer::new(TradeParams::default());
        let terminal = terminal(TradeMode::Full);

        let buy = placer.place(&terminal, Side::Buy).await.unwrap();
        let sell = placer.place(&terminal, Side::Sell).await.unwrap();

        assert!(matches!(buy, OrderOutcome::Executed(_)));
        assert!(matches!(sell, OrderOutcome::Executed(_)));
        let sent = terminal.submitted();
        assert_eq!(sent[0].price, dec!(2030.35));
        assert_eq!(sent[1].price, dec!(2030.10));
    }

    #[tokio::test]
    async fn test_declines() {
        let placer = OrderPlacer::new(TradeParams::default());

        let disabled = terminal(TradeMode::Disabled);
        assert_eq!(
            placer.place(&disabled, Side::Buy).await.unwrap(),
            OrderOutcome::Declined(DeclineReason::TradingDisabled)
        );
        assert!(disabled.submitted().is_empty());

        let long_only = terminal(TradeMode::LongOnly);
        assert_eq!(
            placer.place(&long_only, Side::Sell).await.unwrap(),
            OrderOutcome::Declined(DeclineReason::TradingDisabled)
        );

        let unknown = PaperTerminal::new(dec!(10000), Arc::new(StaticQuotes::new()));
        assert_eq!(
            placer.place(&unknown, Side::Buy).await.unwrap(),
            OrderOutcome::Declined(DeclineReason::SymbolNotFound)
        );

        let no_quote = PaperTerminal::new(dec!(10000), Arc::new(StaticQuotes::new()))
            .with_symbol(xauusd(TradeMode::Full));
        assert_eq!(
            placer.place(&no_quote, Side::Buy).await.unwrap(),
            OrderOutcome::Declined(DeclineReason::NoQuote)
        );
    }

    #[tokio::test]
    async fn test_rejection_carries_comment() {
        let placer = OrderPlacer::new(TradeParams::default());
        let terminal = terminal(TradeMode::Full).rejecting(retcode::MARKET_CLOSED);

        let outcome = placer.place(&terminal, Side::Buy).await.unwrap();

        assert_eq!(
            outcome,
            OrderOutcome::Rejected {
                retcode: retcode::MARKET_CLOSED,
                message: retcode::describe(retcode::MARKET_CLOSED).to_string(),
            }
        );
    }
}
