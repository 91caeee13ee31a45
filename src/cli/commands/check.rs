//! Indicator and signal check on a bar file.

use anyhow::{bail, Result};
use scalper_config::AppConfig;
use scalper_core::traits::BarSeriesProvider;
use scalper_data::CsvBarSource;
use scalper_indicators::{IndicatorEngine, IndicatorRow};
use scalper_signals::SignalDetector;
use serde_json::json;

use crate::cli::{CheckArgs, OutputFormat};

pub async fn run(args: CheckArgs, config: &AppConfig) -> Result<()> {
    if !args.data.exists() {
        bail!("Data file '{}' does not exist", args.data.display());
    }

    let engine = IndicatorEngine::new(config.indicators.clone())?;
    let detector = SignalDetector::new(config.signal)?;

    let source = CsvBarSource::new(&args.data);
    let series = source
        .fetch_bars(&config.trading.symbol, config.trading.timeframe, config.polling.bar_count)
        .await?;

    let frame = engine.compute(&series);
    let decision = detector.evaluate(&frame);
    let rows = frame.tail(args.rows);

    match args.output {
        OutputFormat::Json => {
            let report = json!({
                "symbol": frame.symbol,
                "timeframe": frame.timeframe,
                "bars": frame.len(),
                "rows": rows,
                "decision": decision,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!(
                "{} {} ({} bars, warm-up {})",
                frame.symbol,
                frame.timeframe,
                frame.len(),
                engine.params().warmup()
            );
            println!();
            println!(
                "{:>20} {:>10} {:>7} {:>9} {:>9} {:>10} {:>10} {:>10}",
                "time", "close", "rsi", "macd", "signal", "bb_upper", "bb_middle", "bb_lower"
            );
            for row in rows {
                println!("{}", format_row(row));
            }
            println!();
            match &decision.reason {
                Some(reason) => println!("Signal: {} ({})", decision.signal, reason),
                None => println!("Signal: {}", decision.signal),
            }
        }
    }

    Ok(())
}

fn cell(value: Option<f64>, width: usize, precision: usize) -> String {
    match value {
        Some(v) => format!("{:>width$.precision$}", v, width = width, precision = precision),
        None => format!("{:>width$}", "-", width = width),
    }
}

fn format_row(row: &IndicatorRow) -> String {
    let time = chrono::DateTime::from_timestamp_millis(row.timestamp)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| row.timestamp.to_string());

    format!(
        "{:>20} {:>10.2} {} {} {} {} {} {}",
        time,
        row.close,
        cell(row.rsi, 7, 2),
        cell(row.macd, 9, 4),
        cell(row.macd_signal, 9, 4),
        cell(row.bb_upper, 10, 2),
        cell(row.bb_middle, 10, 2),
        cell(row.bb_lower, 10, 2),
    )
}
