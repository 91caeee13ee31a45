//! CLI command implementations.

pub mod check;
pub mod paper;
pub mod run;
pub mod validate;

use anyhow::Result;
use scalper_config::AppConfig;
use scalper_core::traits::{BarSeriesProvider, OrderGateway};
use scalper_engine::{OrderPlacer, Trader};
use scalper_indicators::IndicatorEngine;
use scalper_signals::SignalDetector;
use tracing::{info, warn};

/// Assemble a trader from the configuration.
fn build_trader<P, G>(config: &AppConfig, provider: P, gateway: G) -> Result<Trader<P, G>>
where
    P: BarSeriesProvider,
    G: OrderGateway,
{
    let engine = IndicatorEngine::new(config.indicators.clone())?;
    let detector = SignalDetector::new(config.signal)?;

    if config.trading.has_detached_levels() {
        warn!(
            stop_loss_pips = %config.trading.stop_loss_pips,
            take_profit_pips = %config.trading.take_profit_pips,
            "Stop-loss/take-profit distances are configured but not attached to orders \
             (set trading.attach_protective_levels = true to send them)"
        );
    }

    Ok(Trader::new(provider, gateway, OrderPlacer::new(config.trading.trade_params()))
        .with_engine(engine)
        .with_detector(detector)
        .with_timeframe(config.trading.timeframe)
        .with_settings(config.polling.poll_settings()))
}

/// Run the trader until Ctrl-C.
async fn drive<P, G>(trader: &Trader<P, G>) -> Result<()>
where
    P: BarSeriesProvider,
    G: OrderGateway,
{
    tokio::select! {
        _ = trader.run() => Ok(()),
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Shutdown requested, stopping");
            Ok(())
        }
    }
}
