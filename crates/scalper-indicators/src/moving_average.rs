//! Moving average indicators.

use scalper_core::traits::Indicator;

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Indicator for Sma {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        let mut result = vec![None; data.len()];
        if data.len() < self.period {
            return result;
        }

        let period_f64 = self.period as f64;

        // Initial sum
        let mut sum: f64 = data[..self.period].iter().sum();
        result[self.period - 1] = Some(sum / period_f64);

        // Sliding window
        for i in self.period..data.len() {
            sum = sum - data[i - self.period] + data[i];
            result[i] = Some(sum / period_f64);
        }

        result
    }

    fn warmup(&self) -> usize {
        self.period - 1
    }

    fn name(&self) -> &str {
        "SMA"
    }
}

/// Exponential Moving Average (EMA).
///
/// Gives more weight to recent prices using an exponential decay.
/// Seeded with the SMA of the first `period` values.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// Calculate with the seed window ending at `seed_end` instead of at
    /// `period - 1`.
    ///
    /// Rows before `seed_end` are `None`. MACD uses this to start its fast
    /// and slow averages on the same bar.
    pub fn calculate_seeded_at(&self, data: &[f64], seed_end: usize) -> Vec<Option<f64>> {
        let mut result = vec![None; data.len()];
        for (i, value) in ema_from(data, self.period, seed_end).into_iter().enumerate() {
            result[seed_end + i] = Some(value);
        }
        result
    }
}

impl Indicator for Ema {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        self.calculate_seeded_at(data, self.period - 1)
    }

    fn warmup(&self) -> usize {
        self.period - 1
    }

    fn name(&self) -> &str {
        "EMA"
    }
}

/// EMA values for indices `seed_end..data.len()`.
///
/// The first value is the SMA of the `period` values ending at `seed_end`.
/// Empty when the seed window does not fit.
pub(crate) fn ema_from(data: &[f64], period: usize, seed_end: usize) -> Vec<f64> {
    if seed_end + 1 < period || data.len() <= seed_end {
        return vec![];
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let one_minus_mult = 1.0 - multiplier;
    let mut result = Vec::with_capacity(data.len() - seed_end);

    let seed_start = seed_end + 1 - period;
    let mut ema: f64 = data[seed_start..=seed_end].iter().sum::<f64>() / period as f64;
    result.push(ema);

    for &price in &data[seed_end + 1..] {
        ema = price * multiplier + ema * one_minus_mult;
        result.push(ema);
    }

    result
}
