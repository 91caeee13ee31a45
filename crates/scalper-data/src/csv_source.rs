//! CSV bar source.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use scalper_core::error::DataError;
use scalper_core::traits::{BarSeriesProvider, QuoteSource};
use scalper_core::types::{Bar, BarSeries, Quote, Timeframe};
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(
        alias = "Date",
        alias = "date",
        alias = "timestamp",
        alias = "Timestamp",
        alias = "time"
    )]
    date: String,
    #[serde(alias = "Time", default)]
    clock: Option<String>,
    #[serde(alias = "Open", alias = "open")]
    open: f64,
    #[serde(alias = "High", alias = "high")]
    high: f64,
    #[serde(alias = "Low", alias = "low")]
    low: f64,
    #[serde(alias = "Close", alias = "close")]
    close: f64,
    #[serde(
        alias = "Volume",
        alias = "volume",
        alias = "tick_volume",
        alias = "TickVolume",
        default
    )]
    volume: f64,
}

/// Bar and quote source reading a CSV file of bars.
///
/// The file is re-read on every fetch. Quotes are synthesized around the last
/// close with a fixed spread.
#[derive(Debug, Clone)]
pub struct CsvBarSource {
    path: PathBuf,
    spread: Decimal,
    digits: u32,
}

impl CsvBarSource {
    /// Create a source for `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            spread: Decimal::ZERO,
            digits: 2,
        }
    }

    /// Set the synthetic bid/ask spread.
    pub fn with_spread(mut self, spread: Decimal) -> Self {
        self.spread = spread;
        self
    }

    /// Set the number of decimals quoted prices are rounded to.
    pub fn with_digits(mut self, digits: u32) -> Self {
        self.digits = digits;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all bars from the file, sorted by time.
    pub async fn load_all(&self, symbol: &str, timeframe: Timeframe) -> Result<BarSeries, DataError> {
        let bars = self.read_bars().await?;
        Ok(BarSeries::from_bars(symbol, timeframe, bars))
    }

    async fn read_bars(&self) -> Result<Vec<Bar>, DataError> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Bar file not found");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(DataError::Connection(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        parse_bars(&content)
    }
}

fn parse_bars(content: &[u8]) -> Result<Vec<Bar>, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content);

    let mut bars = Vec::new();

    for result in reader.deserialize() {
        let record: CsvRecord = result.map_err(|e| DataError::Parse(e.to_string()))?;

        let timestamp = match &record.clock {
            Some(clock) if !clock.is_empty() => parse_timestamp(&format!("{} {}", record.date, clock))?,
            _ => parse_timestamp(&record.date)?,
        };

        bars.push(Bar::new(
            timestamp,
            record.open,
            record.high,
            record.low,
            record.close,
            record.volume,
        ));
    }

    // Sort by timestamp
    bars.sort_by_key(|b| b.timestamp);

    Ok(bars)
}

/// Parse various timestamp formats into Unix milliseconds.
fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y.%m.%d %H:%M:%S",
        "%Y.%m.%d %H:%M",
    ];
    let date_formats = ["%Y-%m-%d", "%Y.%m.%d", "%Y/%m/%d"];

    for format in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }
    for format in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            if let Some(dt) = d.and_hms_opt(0, 0, 0) {
                return Ok(dt.and_utc().timestamp_millis());
            }
        }
    }

    // Unix timestamp; assume milliseconds if > 10 digits
    if let Ok(ts) = date_str.parse::<i64>() {
        return Ok(if ts > 10_000_000_000 { ts } else { ts * 1000 });
    }

    Err(DataError::Parse(format!("Could not parse date: {}", date_str)))
}

#[async_trait]
impl BarSeriesProvider for CsvBarSource {
    async fn fetch_bars(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<BarSeries, DataError> {
        let series = self.load_all(symbol, timeframe).await?;
        trace!(total = series.len(), count, "Read bar file");
        Ok(series.trailing(count))
    }

    fn name(&self) -> &str {
        "csv"
    }
}

#[async_trait]
impl QuoteSource for CsvBarSource {
    async fn latest_quote(&self, symbol: &str) -> Result<Option<Quote>, DataError> {
        let bars = self.read_bars().await?;
        let Some(last) = bars.last() else {
            return Ok(None);
        };

        let close = Decimal::try_from(last.close)
            .map_err(|e| DataError::Parse(format!("close {}: {}", last.close, e)))?;
        let half = self.spread / Decimal::TWO;

        Ok(Some(Quote {
            symbol: symbol.to_string(),
            bid: (close - half).round_dp(self.digits),
            ask: (close + half).round_dp(self.digits),
            timestamp: last.timestamp,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp() {
        assert!(parse_timestamp("2024-01-15").is_ok());
        assert!(parse_timestamp("2024-01-15 10:30:00").is_ok());
        assert_eq!(
            parse_timestamp("2024.01.15 10:30").unwrap(),
            parse_timestamp("2024-01-15 10:30:00").unwrap()
        );
        assert_eq!(parse_timestamp("1705312800000").unwrap(), 1_705_312_800_000); // Unix ms
        assert_eq!(parse_timestamp("1705312800").unwrap(), 1_705_312_800_000); // Unix sec
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_parse_bars_sorted() {
        let csv = b"timestamp,open,high,low,close,tick_volume\n\
                    1705312860,2.0,2.5,1.5,2.2,7\n\
                    1705312800,1.0,1.5,0.5,1.2,5\n";
        let bars = parse_bars(csv).unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, 1.2);
        assert_eq!(bars[1].volume, 7.0);
    }

    #[test]
    fn test_parse_split_date_time() {
        let csv = b"Date,Time,Open,High,Low,Close,Volume\n\
                    2024.01.15,10:30,2030.1,2031.0,2029.5,2030.8,120\n";
        let bars = parse_bars(csv).unwrap();

        assert_eq!(bars[0].timestamp, parse_timestamp("2024-01-15 10:30:00").unwrap());
    }

    #[test]
    fn test_parse_bad_row() {
        let csv = b"timestamp,open,high,low,close\n1705312800,abc,1,1,1\n";
        assert!(matches!(parse_bars(csv), Err(DataError::Parse(_))));
    }
}
