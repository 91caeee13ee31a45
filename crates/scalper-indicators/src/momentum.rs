//! Momentum indicators.

use crate::moving_average::ema_from;
use crate::EPSILON;
use scalper_core::traits::Indicator;
use serde::{Deserialize, Serialize};

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    fn value(avg_gain: f64, avg_loss: f64) -> f64 {
        let total = avg_gain + avg_loss;
        if total.abs() < EPSILON {
            0.0
        } else {
            100.0 * avg_gain / total
        }
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        let mut result = vec![None; data.len()];
        if data.len() <= self.period {
            return result;
        }

        let period_f64 = self.period as f64;

        // Seed averages over the first `period` changes
        let mut avg_gain = 0.0;
        let mut avg_loss = 0.0;
        for i in 1..=self.period {
            let change = data[i] - data[i - 1];
            if change > 0.0 {
                avg_gain += change;
            } else {
                avg_loss -= change;
            }
        }
        avg_gain /= period_f64;
        avg_loss /= period_f64;
        result[self.period] = Some(Self::value(avg_gain, avg_loss));

        // Wilder's smoothing: avg = (prev_avg * (period-1) + value) / period
        for i in (self.period + 1)..data.len() {
            let change = data[i] - data[i - 1];
            let (gain, loss) = if change > 0.0 {
                (change, 0.0)
            } else {
                (0.0, -change)
            };
            avg_gain = (avg_gain * (period_f64 - 1.0) + gain) / period_f64;
            avg_loss = (avg_loss * (period_f64 - 1.0) + loss) / period_f64;
            result[i] = Some(Self::value(avg_gain, avg_loss));
        }

        result
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// MACD (Moving Average Convergence Divergence) output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA)
    pub macd: f64,
    /// Signal line (EMA of MACD)
    pub signal: f64,
    /// Histogram (MACD - Signal)
    pub histogram: f64,
}

/// MACD indicator.
///
/// The slow EMA is seeded on the first `slow` closes; the fast EMA is seeded
/// on the `fast` closes ending at the same bar, so both lines start together.
/// The signal line is an EMA of the MACD line, and nothing is reported until
/// it is defined.
#[derive(Debug, Clone)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom periods.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast > 0 && slow > 0 && signal > 0);
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            fast_period: fast,
            slow_period: slow,
            signal_period: signal,
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for Macd {
    type Output = MacdOutput;

    fn calculate(&self, data: &[f64]) -> Vec<Option<MacdOutput>> {
        let mut result = vec![None; data.len()];
        if data.len() <= self.warmup() {
            return result;
        }

        let start = self.slow_period - 1;
        let slow_ema = ema_from(data, self.slow_period, start);
        let fast_ema = ema_from(data, self.fast_period, start);

        let macd_line: Vec<f64> = fast_ema
            .iter()
            .zip(slow_ema.iter())
            .map(|(f, s)| f - s)
            .collect();

        let signal_line = ema_from(&macd_line, self.signal_period, self.signal_period - 1);

        // Align: signal_line[j] belongs to macd_line[signal_period - 1 + j]
        let offset = self.signal_period - 1;
        for (j, &signal) in signal_line.iter().enumerate() {
            let macd = macd_line[offset + j];
            result[start + offset + j] = Some(MacdOutput {
                macd,
                signal,
                histogram: macd - signal,
            });
        }

        result
    }

    fn warmup(&self) -> usize {
        self.slow_period + self.signal_period - 2
    }

    fn name(&self) -> &str {
        "MACD"
    }
}
