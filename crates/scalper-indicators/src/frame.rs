//! Per-bar indicator frame.

use scalper_core::error::IndicatorError;
use scalper_core::traits::Indicator;
use scalper_core::{BarSeries, Timeframe};
use serde::{Deserialize, Serialize};

use crate::momentum::{Macd, Rsi};
use crate::volatility::BollingerBands;

/// Periods and multipliers for every indicator in the frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bb_period: usize,
    pub bb_std_dev: f64,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bb_period: 20,
            bb_std_dev: 2.0,
        }
    }
}

impl IndicatorParams {
    /// Validate the parameters.
    pub fn validate(&self) -> Result<(), IndicatorError> {
        if self.rsi_period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "rsi_period must be greater than 0".into(),
            ));
        }
        if self.macd_fast == 0 || self.macd_slow == 0 || self.macd_signal == 0 {
            return Err(IndicatorError::InvalidParameter(
                "MACD periods must be greater than 0".into(),
            ));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(IndicatorError::InvalidParameter(format!(
                "macd_fast ({}) must be less than macd_slow ({})",
                self.macd_fast, self.macd_slow
            )));
        }
        if self.bb_period < 2 {
            return Err(IndicatorError::InvalidParameter(
                "bb_period must be at least 2".into(),
            ));
        }
        if self.bb_std_dev <= 0.0 || !self.bb_std_dev.is_finite() {
            return Err(IndicatorError::InvalidParameter(
                "bb_std_dev must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Index of the first row where every field is defined.
    pub fn warmup(&self) -> usize {
        self.rsi_period
            .max(self.macd_slow + self.macd_signal - 2)
            .max(self.bb_period - 1)
    }
}

/// Indicator values for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorRow {
    /// Bar open time (Unix milliseconds)
    pub timestamp: i64,
    pub close: f64,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_hist: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_lower: Option<f64>,
}

impl IndicatorRow {
    /// Whether every indicator field is defined.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Names of the fields still inside their warm-up.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("rsi", self.rsi),
            ("macd", self.macd),
            ("macd_signal", self.macd_signal),
            ("macd_hist", self.macd_hist),
            ("bb_upper", self.bb_upper),
            ("bb_middle", self.bb_middle),
            ("bb_lower", self.bb_lower),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

/// One [`IndicatorRow`] per bar of the source series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorFrame {
    pub symbol: String,
    pub timeframe: Timeframe,
    rows: Vec<IndicatorRow>,
}

impl IndicatorFrame {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[IndicatorRow] {
        &self.rows
    }

    /// The newest row.
    pub fn last(&self) -> Option<&IndicatorRow> {
        self.rows.last()
    }

    pub fn get(&self, index: usize) -> Option<&IndicatorRow> {
        self.rows.get(index)
    }

    /// The newest `n` rows (or all of them when shorter).
    pub fn tail(&self, n: usize) -> &[IndicatorRow] {
        &self.rows[self.rows.len().saturating_sub(n)..]
    }
}

/// Computes an [`IndicatorFrame`] from a bar series.
///
/// Stateless: every call recomputes all indicators from the full series, so
/// the same input always yields the same frame.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    params: IndicatorParams,
    rsi: Rsi,
    macd: Macd,
    bollinger: BollingerBands,
}

impl IndicatorEngine {
    /// Create an engine, rejecting invalid parameters.
    pub fn new(params: IndicatorParams) -> Result<Self, IndicatorError> {
        params.validate()?;
        Ok(Self {
            rsi: Rsi::new(params.rsi_period),
            macd: Macd::with_periods(params.macd_fast, params.macd_slow, params.macd_signal),
            bollinger: BollingerBands::with_params(params.bb_period, params.bb_std_dev),
            params,
        })
    }

    pub fn params(&self) -> &IndicatorParams {
        &self.params
    }

    /// Compute the frame for `series`.
    pub fn compute(&self, series: &BarSeries) -> IndicatorFrame {
        let closes = series.closes();
        let rsi = self.rsi.calculate(&closes);
        let macd = self.macd.calculate(&closes);
        let bands = self.bollinger.calculate(&closes);

        let rows = series
            .iter()
            .enumerate()
            .map(|(i, bar)| IndicatorRow {
                timestamp: bar.timestamp,
                close: bar.close,
                rsi: rsi[i],
                macd: macd[i].map(|m| m.macd),
                macd_signal: macd[i].map(|m| m.signal),
                macd_hist: macd[i].map(|m| m.histogram),
                bb_upper: bands[i].map(|b| b.upper),
                bb_middle: bands[i].map(|b| b.middle),
                bb_lower: bands[i].map(|b| b.lower),
            })
            .collect();

        IndicatorFrame {
            symbol: series.symbol.clone(),
            timeframe: series.timeframe,
            rows,
        }
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        let params = IndicatorParams::default();
        Self {
            rsi: Rsi::new(params.rsi_period),
            macd: Macd::with_periods(params.macd_fast, params.macd_slow, params.macd_signal),
            bollinger: BollingerBands::with_params(params.bb_period, params.bb_std_dev),
            params,
        }
    }
}
