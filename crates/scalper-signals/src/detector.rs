//! Threshold detector over RSI, MACD and Bollinger Bands.

use scalper_core::error::SignalError;
use scalper_core::Signal;
use scalper_indicators::{IndicatorFrame, IndicatorRow};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// RSI thresholds for the mean-reversion entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalThresholds {
    /// Buy requires RSI strictly below this
    pub rsi_oversold: f64,
    /// Sell requires RSI strictly above this
    pub rsi_overbought: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            rsi_oversold: 40.0,
            rsi_overbought: 70.0,
        }
    }
}

impl SignalThresholds {
    /// Validate the thresholds.
    pub fn validate(&self) -> Result<(), SignalError> {
        if !(0.0..=100.0).contains(&self.rsi_oversold) || !(0.0..=100.0).contains(&self.rsi_overbought) {
            return Err(SignalError::InvalidThresholds(format!(
                "RSI thresholds must lie in [0, 100], got {} and {}",
                self.rsi_oversold, self.rsi_overbought
            )));
        }
        if self.rsi_oversold >= self.rsi_overbought {
            return Err(SignalError::InvalidThresholds(format!(
                "rsi_oversold ({}) must be below rsi_overbought ({})",
                self.rsi_oversold, self.rsi_overbought
            )));
        }
        Ok(())
    }
}

/// Outcome of evaluating a frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub signal: Signal,
    /// Why the signal is None, when it is
    pub reason: Option<String>,
    /// The row the decision was taken on
    pub row: Option<IndicatorRow>,
}

impl Decision {
    fn none(reason: impl Into<String>, row: Option<IndicatorRow>) -> Self {
        Self {
            signal: Signal::None,
            reason: Some(reason.into()),
            row,
        }
    }
}

/// Classifies indicator rows.
#[derive(Debug, Clone, Default)]
pub struct SignalDetector {
    thresholds: SignalThresholds,
}

impl SignalDetector {
    /// Create a detector, rejecting invalid thresholds.
    pub fn new(thresholds: SignalThresholds) -> Result<Self, SignalError> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &SignalThresholds {
        &self.thresholds
    }

    /// Classify one row. Undefined fields yield [`Signal::None`].
    pub fn detect(&self, row: &IndicatorRow) -> Signal {
        let (Some(rsi), Some(macd), Some(macd_signal), Some(upper), Some(lower)) =
            (row.rsi, row.macd, row.macd_signal, row.bb_upper, row.bb_lower)
        else {
            return Signal::None;
        };

        if rsi < self.thresholds.rsi_oversold && macd > macd_signal && row.close <= lower {
            Signal::Buy
        } else if rsi > self.thresholds.rsi_overbought && macd < macd_signal && row.close >= upper {
            Signal::Sell
        } else {
            Signal::None
        }
    }

    /// Classify the newest row of `frame`; older rows are ignored.
    pub fn evaluate(&self, frame: &IndicatorFrame) -> Decision {
        let Some(row) = frame.last() else {
            return Decision::none("no bars", None);
        };

        let missing = row.missing_fields();
        if !missing.is_empty() {
            debug!(rows = frame.len(), ?missing, "Newest row still in warm-up");
            return Decision::none(format!("undefined: {}", missing.join(", ")), Some(*row));
        }

        match self.detect(row) {
            Signal::None => Decision::none("conditions not met", Some(*row)),
            signal => Decision {
                signal,
                reason: None,
                row: Some(*row),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scalper_core::{Bar, BarSeries, Timeframe};
    use scalper_indicators::IndicatorEngine;

    fn row(rsi: f64, macd: f64, macd_signal: f64, close: f64) -> IndicatorRow {
        IndicatorRow {
            timestamp: 0,
            close,
            rsi: Some(rsi),
            macd: Some(macd),
            macd_signal: Some(macd_signal),
            macd_hist: Some(macd - macd_signal),
            bb_upper: Some(2010.0),
            bb_middle: Some(2000.0),
            bb_lower: Some(1990.0),
        }
    }

    #[test]
    fn test_buy_at_lower_band() {
        let detector = SignalDetector::default();
        assert_eq!(detector.detect(&row(35.0, 1.0, 0.5, 1990.0)), Signal::Buy);
        assert_eq!(detector.detect(&row(35.0, 1.0, 0.5, 1985.0)), Signal::Buy);
        assert_eq!(detector.detect(&row(35.0, 1.0, 0.5, 1990.01)), Signal::None);
    }

    #[test]
    fn test_sell_at_upper_band() {
        let detector = SignalDetector::default();
        assert_eq!(detector.detect(&row(75.0, -1.0, -0.5, 2010.0)), Signal::Sell);
        assert_eq!(detector.detect(&row(75.0, -1.0, -0.5, 2009.99)), Signal::None);
    }

    #[test]
    fn test_strict_operators() {
        let detector = SignalDetector::default();
        // RSI exactly on the threshold
        assert_eq!(detector.detect(&row(40.0, 1.0, 0.5, 1990.0)), Signal::None);
        assert_eq!(detector.detect(&row(70.0, -1.0, -0.5, 2010.0)), Signal::None);
        // MACD equal to its signal line
        assert_eq!(detector.detect(&row(35.0, 0.5, 0.5, 1990.0)), Signal::None);
        assert_eq!(detector.detect(&row(75.0, 0.5, 0.5, 2010.0)), Signal::None);
    }

    #[test]
    fn test_neutral_rsi() {
        let detector = SignalDetector::default();
        assert_eq!(detector.detect(&row(50.0, 1.0, 0.5, 1990.0)), Signal::None);
        assert_eq!(detector.detect(&row(50.0, -1.0, -0.5, 2010.0)), Signal::None);
    }

    #[test]
    fn test_undefined_fields() {
        let detector = SignalDetector::default();
        let mut incomplete = row(35.0, 1.0, 0.5, 1990.0);
        incomplete.macd_signal = None;
        assert_eq!(detector.detect(&incomplete), Signal::None);

        let frame = IndicatorEngine::default().compute(&BarSeries::from_bars(
            "XAUUSD",
            Timeframe::M1,
            (0..20).map(|i| Bar::new(i * 60_000, 1.0, 1.0, 1.0, 1.0, 1.0)).collect(),
        ));
        let decision = detector.evaluate(&frame);
        assert_eq!(decision.signal, Signal::None);
        assert!(decision.reason.unwrap().contains("macd_signal"));
        assert!(decision.row.is_some());
    }

    #[test]
    fn test_empty_frame() {
        let detector = SignalDetector::default();
        let frame = IndicatorEngine::default().compute(&BarSeries::new("XAUUSD", Timeframe::M1));
        let decision = detector.evaluate(&frame);

        assert_eq!(decision.signal, Signal::None);
        assert_eq!(decision.reason.as_deref(), Some("no bars"));
        assert!(decision.row.is_none());
    }

    #[test]
    fn test_invalid_thresholds() {
        let inverted = SignalThresholds {
            rsi_oversold: 70.0,
            rsi_overbought: 40.0,
        };
        assert!(SignalDetector::new(inverted).is_err());

        let out_of_range = SignalThresholds {
            rsi_oversold: -1.0,
            rsi_overbought: 70.0,
        };
        assert!(out_of_range.validate().is_err());
        assert!(SignalThresholds::default().validate().is_ok());
    }

    #[test]
    fn test_decision_serializes() {
        let decision = SignalDetector::default().evaluate(&IndicatorEngine::default().compute(
            &BarSeries::new("XAUUSD", Timeframe::M1),
        ));
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["signal"], "none");
    }
}
