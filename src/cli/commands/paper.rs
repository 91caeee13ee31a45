//! Paper trading command implementation.

use anyhow::{bail, Result};
use rust_decimal::Decimal;
use scalper_broker::PaperTerminal;
use scalper_config::AppConfig;
use scalper_core::types::{SymbolInfo, TradeMode};
use scalper_data::CsvBarSource;
use scalper_engine::CycleOutcome;
use std::sync::Arc;
use tracing::info;

use super::{build_trader, drive};
use crate::cli::PaperArgs;

pub async fn run(args: PaperArgs, config: &AppConfig) -> Result<()> {
    config.validate()?;

    if !args.data.exists() {
        bail!(
            "Data file '{}' does not exist. Provide a CSV bar file with --data",
            args.data.display()
        );
    }

    let paper = &config.paper;
    let source = Arc::new(
        CsvBarSource::new(&args.data)
            .with_spread(paper.spread)
            .with_digits(paper.digits),
    );

    let point = Decimal::new(1, paper.digits);
    let symbol = SymbolInfo {
        name: config.trading.symbol.clone(),
        trade_mode: TradeMode::Full,
        digits: paper.digits,
        point,
        volume_min: point,
        volume_max: Decimal::from(100),
        volume_step: point,
    };
    let terminal = Arc::new(PaperTerminal::new(paper.initial_balance, source.clone()).with_symbol(symbol));

    info!(
        data = %args.data.display(),
        symbol = %config.trading.symbol,
        balance = %paper.initial_balance,
        "Starting paper trading"
    );

    let trader = build_trader(config, source, terminal.clone())?;

    if args.once {
        let outcome = trader.run_cycle().await;
        print_outcome(&outcome);
    } else {
        drive(&trader).await?;
    }

    info!(orders = terminal.submitted().len(), "Paper session finished");
    Ok(())
}

fn print_outcome(outcome: &CycleOutcome) {
    match outcome {
        CycleOutcome::NoData => println!("No data"),
        CycleOutcome::NoSignal(decision) => println!(
            "No signal ({})",
            decision.reason.as_deref().unwrap_or("conditions not met")
        ),
        CycleOutcome::Executed { decision, result } => println!(
            "{} executed: order {:?} at {:?}",
            decision.signal, result.order, result.price
        ),
        CycleOutcome::Declined { decision, reason } => {
            println!("{} declined: {}", decision.signal, reason)
        }
        CycleOutcome::Rejected {
            decision,
            retcode,
            message,
        } => println!("{} rejected ({}): {}", decision.signal, retcode, message),
        CycleOutcome::Failed { error, .. } => println!("Cycle failed: {}", error),
    }
}
