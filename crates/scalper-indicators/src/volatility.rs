//! Volatility indicators.

use crate::EPSILON;
use scalper_core::traits::Indicator;
use serde::{Deserialize, Serialize};

/// Population standard deviation over a window, with the mean.
fn window_stats(window: &[f64]) -> (f64, f64) {
    let period_f64 = window.len() as f64;
    let mean: f64 = window.iter().sum::<f64>() / period_f64;
    let variance: f64 = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / period_f64;
    let std_dev = if variance < EPSILON { 0.0 } else { variance.sqrt() };
    (mean, std_dev)
}

/// Standard Deviation (population).
#[derive(Debug, Clone)]
pub struct StdDev {
    period: usize,
}

impl StdDev {
    /// Create a new standard deviation indicator.
    pub fn new(period: usize) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        Self { period }
    }
}

impl Indicator for StdDev {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<Option<f64>> {
        let mut result = vec![None; data.len()];
        for (i, window) in data.windows(self.period).enumerate() {
            result[self.period - 1 + i] = Some(window_stats(window).1);
        }
        result
    }

    fn warmup(&self) -> usize {
        self.period - 1
    }

    fn name(&self) -> &str {
        "StdDev"
    }
}

/// Bollinger Bands output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerOutput {
    /// Upper band
    pub upper: f64,
    /// Middle band (SMA)
    pub middle: f64,
    /// Lower band
    pub lower: f64,
}

impl BollingerOutput {
    /// Price at or above the upper band.
    pub fn touches_upper(&self, price: f64) -> bool {
        price >= self.upper
    }

    /// Price at or below the lower band.
    pub fn touches_lower(&self, price: f64) -> bool {
        price <= self.lower
    }

    /// Distance between the outer bands.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Bollinger Bands.
///
/// Consists of a middle band (SMA) with upper and lower bands
/// at a specified number of standard deviations. A window with no
/// measurable variance collapses all three bands onto the mean.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl BollingerBands {
    /// Create new Bollinger Bands with default parameters (20, 2.0).
    pub fn new() -> Self {
        Self::with_params(20, 2.0)
    }

    /// Create Bollinger Bands with custom parameters.
    pub fn with_params(period: usize, std_dev_multiplier: f64) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        assert!(
            std_dev_multiplier > 0.0,
            "Std dev multiplier must be positive"
        );
        Self {
            period,
            std_dev_multiplier,
        }
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for BollingerBands {
    type Output = BollingerOutput;

    fn calculate(&self, data: &[f64]) -> Vec<Option<BollingerOutput>> {
        let mut result = vec![None; data.len()];

        for (i, window) in data.windows(self.period).enumerate() {
            let (mean, std_dev) = window_stats(window);
            result[self.period - 1 + i] = Some(BollingerOutput {
                upper: mean + self.std_dev_multiplier * std_dev,
                middle: mean,
                lower: mean - self.std_dev_multiplier * std_dev,
            });
        }

        result
    }

    fn warmup(&self) -> usize {
        self.period - 1
    }

    fn name(&self) -> &str {
        "Bollinger Bands"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_dev() {
        let sd = StdDev::new(4);
        let result = sd.calculate(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);

        assert!(result[..3].iter().all(Option::is_none));
        // mean 3.5, squared deviations 2.25 + 0.25 * 3 = 3.0, / 4
        assert!((result[3].unwrap() - 0.75_f64.sqrt()).abs() < 1e-12);
        // 5, 5, 7, 9: mean 6.5, deviations 2.25 + 2.25 + 0.25 + 6.25 = 11
        assert!((result[7].unwrap() - (11.0_f64 / 4.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_bollinger_bands() {
        let bb = BollingerBands::new();
        let data: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0)
            .collect();

        let result = bb.calculate(&data);
        assert_eq!(result.len(), 30);
        assert!(result[..19].iter().all(Option::is_none));

        for output in result[19..].iter() {
            let output = output.unwrap();
            assert!(output.upper > output.middle);
            assert!(output.middle > output.lower);
            assert!((output.upper - output.middle - (output.middle - output.lower)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_bollinger_flat_window_collapses() {
        let bb = BollingerBands::with_params(5, 2.0);
        let result = bb.calculate(&[10.0; 8]);

        let output = result[7].unwrap();
        assert_eq!(output.upper, 10.0);
        assert_eq!(output.lower, 10.0);
        assert!(output.touches_lower(10.0));
        assert!(output.touches_upper(10.0));
        assert_eq!(output.width(), 0.0);
    }

    #[test]
    fn test_bollinger_too_short() {
        let bb = BollingerBands::with_params(5, 2.0);
        assert!(bb.calculate(&[1.0, 2.0, 3.0, 4.0]).iter().all(Option::is_none));
        assert!(bb.calculate(&[]).is_empty());
    }
}
