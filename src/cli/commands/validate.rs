//! Validate configuration command.

use anyhow::Result;
use scalper_config::AppConfig;
use std::path::Path;

pub async fn run(config_path: &Path, config: &AppConfig) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    let trading = &config.trading;
    let polling = &config.polling;
    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Terminal bridge: {}", config.terminal.base_url);
    println!("Symbol: {} ({})", trading.symbol, trading.timeframe);
    println!("Lots: {}", trading.lots);
    println!(
        "RSI thresholds: buy < {}, sell > {}",
        config.signal.rsi_oversold, config.signal.rsi_overbought
    );
    println!(
        "Polling: {} bars every {}s (retry {}s)",
        polling.bar_count, polling.interval_secs, polling.retry_interval_secs
    );
    if trading.attach_protective_levels {
        println!(
            "Protective levels: SL {} pips, TP {} pips",
            trading.stop_loss_pips, trading.take_profit_pips
        );
    } else if trading.has_detached_levels() {
        println!(
            "Warning: SL {} / TP {} pips configured but not attached to orders",
            trading.stop_loss_pips, trading.take_profit_pips
        );
    }

    Ok(())
}
