//! Trading signal produced by the detector.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Side;

/// Market classification for the newest bar.
///
/// Ephemeral: derived each cycle and consumed immediately by order placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Buy,
    Sell,
    #[default]
    None,
}

impl Signal {
    /// Order side for an actionable signal.
    pub fn side(&self) -> Option<Side> {
        match self {
            Signal::Buy => Some(Side::Buy),
            Signal::Sell => Some(Side::Sell),
            Signal::None => None,
        }
    }

    /// Whether the signal should lead to an order.
    pub fn is_actionable(&self) -> bool {
        !matches!(self, Signal::None)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
            Signal::None => write!(f, "NONE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_side() {
        assert_eq!(Signal::Buy.side(), Some(Side::Buy));
        assert_eq!(Signal::Sell.side(), Some(Side::Sell));
        assert_eq!(Signal::None.side(), None);
        assert!(!Signal::default().is_actionable());
    }
}
