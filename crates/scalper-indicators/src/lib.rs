//! Technical indicators for the scalper.
//!
//! This crate provides the indicators the signal detector reads:
//! - Moving averages (SMA, EMA)
//! - Momentum indicators (RSI, MACD)
//! - Volatility indicators (Standard Deviation, Bollinger Bands)
//!
//! Every indicator returns output aligned with its input, `None` during
//! warm-up. Smoothing follows the TA-Lib conventions: EMA seeded with the
//! SMA of its first window, Wilder smoothing for RSI, population standard
//! deviation for the bands. [`IndicatorEngine`] combines them into an
//! [`IndicatorFrame`], one row per bar.

pub mod frame;
pub mod momentum;
pub mod moving_average;
pub mod volatility;

pub use frame::{IndicatorEngine, IndicatorFrame, IndicatorParams, IndicatorRow};
pub use momentum::{Macd, MacdOutput, Rsi};
pub use moving_average::{Ema, Sma};
pub use volatility::{BollingerBands, BollingerOutput, StdDev};

/// Values closer to zero than this are treated as zero.
pub(crate) const EPSILON: f64 = 1e-8;
