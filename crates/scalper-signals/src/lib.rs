//! Signal detection for the scalper.
//!
//! A [`SignalDetector`] reads the newest [`IndicatorRow`](scalper_indicators::IndicatorRow)
//! of a frame and classifies it as Buy, Sell or None. It is a pure function of
//! its input and keeps no state between cycles.

pub mod detector;

pub use detector::{Decision, SignalDetector, SignalThresholds};
