//! Live trading command implementation.

use anyhow::{Context, Result};
use scalper_broker::{BridgeConfig, DryRunGateway, TerminalBridge};
use scalper_config::AppConfig;
use std::sync::Arc;
use tracing::info;

use super::{build_trader, drive};
use crate::cli::RunArgs;

pub async fn run(args: RunArgs, config: &AppConfig) -> Result<()> {
    config.validate()?;

    let terminal = &config.terminal;
    let bridge_config =
        BridgeConfig::from_env(&terminal.base_url, &terminal.api_key_env, terminal.timeout());
    let bridge = Arc::new(TerminalBridge::new(bridge_config)?);

    let account = bridge
        .connect()
        .await
        .with_context(|| format!("Failed to connect to trading terminal at {}", terminal.base_url))?;

    info!(
        login = account.login,
        balance = %account.balance,
        equity = %account.equity,
        currency = %account.currency,
        symbol = %config.trading.symbol,
        dry_run = args.dry_run,
        "Starting live trading"
    );

    if args.dry_run {
        let trader = build_trader(config, bridge.clone(), DryRunGateway::new(bridge))?;
        drive(&trader).await
    } else {
        let trader = build_trader(config, bridge.clone(), bridge)?;
        drive(&trader).await
    }
}
