//! Polling trader.

use scalper_core::error::{DataError, ScalperError};
use scalper_core::traits::{BarSeriesProvider, OrderGateway};
use scalper_core::types::{Timeframe, TradeResult};
use scalper_indicators::IndicatorEngine;
use scalper_signals::{Decision, SignalDetector};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::orders::{DeclineReason, OrderOutcome, OrderPlacer};

/// Bar window size and loop cadence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSettings {
    /// Bars fetched per cycle
    pub bar_count: usize,
    /// Pause after every cycle that reached the market data
    pub interval: Duration,
    /// Pause after a cycle that found no bars or could not fetch them
    pub retry_interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            bar_count: 100,
            interval: Duration::from_secs(60),
            retry_interval: Duration::from_secs(5),
        }
    }
}

/// What one cycle did.
#[derive(Debug)]
pub enum CycleOutcome {
    /// The provider had no bars
    NoData,
    NoSignal(Decision),
    Executed {
        decision: Decision,
        result: TradeResult,
    },
    Declined {
        decision: Decision,
        reason: DeclineReason,
    },
    Rejected {
        decision: Decision,
        retcode: u32,
        message: String,
    },
    /// A collaborator failed; `decision` is set when the failure came after
    /// detection
    Failed {
        decision: Option<Decision>,
        error: ScalperError,
    },
}

impl CycleOutcome {
    /// Pause before the next cycle.
    pub fn next_delay(&self, settings: &PollSettings) -> Duration {
        match self {
            CycleOutcome::NoData | CycleOutcome::Failed { decision: None, .. } => {
                settings.retry_interval
            }
            _ => settings.interval,
        }
    }

    /// The decision taken this cycle, if the cycle got that far.
    pub fn decision(&self) -> Option<&Decision> {
        match self {
            CycleOutcome::NoData => None,
            CycleOutcome::NoSignal(decision)
            | CycleOutcome::Executed { decision, .. }
            | CycleOutcome::Declined { decision, .. }
            | CycleOutcome::Rejected { decision, .. } => Some(decision),
            CycleOutcome::Failed { decision, .. } => decision.as_ref(),
        }
    }
}

/// Single-symbol polling trader.
///
/// Each cycle fetches the trailing bar window, recomputes every indicator
/// from scratch, classifies the newest row and sends at most one order.
/// Nothing carries over between cycles.
pub struct Trader<P, G> {
    provider: P,
    gateway: G,
    placer: OrderPlacer,
    engine: IndicatorEngine,
    detector: SignalDetector,
    timeframe: Timeframe,
    settings: PollSettings,
}

impl<P, G> Trader<P, G>
where
    P: BarSeriesProvider,
    G: OrderGateway,
{
    /// Create a trader with default indicators, thresholds and cadence.
    pub fn new(provider: P, gateway: G, placer: OrderPlacer) -> Self {
        Self {
            provider,
            gateway,
            placer,
            engine: IndicatorEngine::default(),
            detector: SignalDetector::default(),
            timeframe: Timeframe::M1,
            settings: PollSettings::default(),
        }
    }

    pub fn with_engine(mut self, engine: IndicatorEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_detector(mut self, detector: SignalDetector) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_timeframe(mut self, timeframe: Timeframe) -> Self {
        self.timeframe = timeframe;
        self
    }

    pub fn with_settings(mut self, settings: PollSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &PollSettings {
        &self.settings
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn symbol(&self) -> &str {
        &self.placer.params().symbol
    }

    /// Run one fetch, compute, detect, place cycle.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let symbol = self.symbol();

        let series = match self
            .provider
            .fetch_bars(symbol, self.timeframe, self.settings.bar_count)
            .await
        {
            Ok(series) => series,
            Err(DataError::NoDataAvailable) => return CycleOutcome::NoData,
            Err(e) => {
                return CycleOutcome::Failed {
                    decision: None,
                    error: e.into(),
                }
            }
        };

        if series.is_empty() {
            return CycleOutcome::NoData;
        }

        debug!(
            bars = series.len(),
            head = ?series.iter().take(5).collect::<Vec<_>>(),
            "Fetched bars"
        );

        let frame = self.engine.compute(&series);
        let decision = self.detector.evaluate(&frame);

        let Some(side) = decision.signal.side() else {
            return CycleOutcome::NoSignal(decision);
        };

        info!(signal = %decision.signal, row = ?decision.row, "Signal detected");

        match self.placer.place(&self.gateway, side).await {
            Ok(OrderOutcome::Executed(result)) => CycleOutcome::Executed { decision, result },
            Ok(OrderOutcome::Declined(reason)) => CycleOutcome::Declined { decision, reason },
            Ok(OrderOutcome::Rejected { retcode, message }) => CycleOutcome::Rejected {
                decision,
                retcode,
                message,
            },
            Err(e) => CycleOutcome::Failed {
                decision: Some(decision),
                error: e.into(),
            },
        }
    }

    /// Poll forever.
    pub async fn run(&self) {
        info!(
            symbol = self.symbol(),
            timeframe = %self.timeframe,
            bar_count = self.settings.bar_count,
            interval_secs = self.settings.interval.as_secs(),
            gateway = self.gateway.name(),
            provider = self.provider.name(),
            "Trader started"
        );

        loop {
            let outcome = self.run_cycle().await;
            let delay = outcome.next_delay(&self.settings);
            log_outcome(&outcome, delay);
            tokio::time::sleep(delay).await;
        }
    }
}

fn log_outcome(outcome: &CycleOutcome, delay: Duration) {
    let wait_secs = delay.as_secs();
    match outcome {
        CycleOutcome::NoData => {
            warn!(wait_secs, "No data received, retrying");
        }
        CycleOutcome::NoSignal(decision) => {
            info!(
                reason = decision.reason.as_deref().unwrap_or_default(),
                wait_secs,
                "No trading signal, waiting"
            );
        }
        CycleOutcome::Executed { decision, result } => {
            info!(signal = %decision.signal, order = ?result.order, wait_secs, "Cycle complete");
        }
        CycleOutcome::Declined { decision, reason } => {
            warn!(signal = %decision.signal, %reason, wait_secs, "Order declined");
        }
        CycleOutcome::Rejected {
            decision,
            retcode,
            message,
        } => {
            warn!(signal = %decision.signal, retcode, %message, wait_secs, "Order rejected");
        }
        CycleOutcome::Failed { error, .. } => {
            error!(%error, wait_secs, "Cycle failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scalper_core::types::Signal;

    #[test]
    fn test_next_delay() {
        let settings = PollSettings::default();

        assert_eq!(CycleOutcome::NoData.next_delay(&settings), Duration::from_secs(5));

        let failed = CycleOutcome::Failed {
            decision: None,
            error: DataError::Connection("refused".into()).into(),
        };
        assert_eq!(failed.next_delay(&settings), Duration::from_secs(5));

        let missing_symbol = CycleOutcome::Failed {
            decision: None,
            error: DataError::SymbolNotFound("XAUUSD".into()).into(),
        };
        assert_eq!(missing_symbol.next_delay(&settings), Duration::from_secs(5));

        let no_signal = CycleOutcome::NoSignal(Decision {
            signal: Signal::None,
            reason: Some("no bars".into()),
            row: None,
        });
        assert_eq!(no_signal.next_delay(&settings), Duration::from_secs(60));
        assert!(no_signal.decision().is_some());
        assert!(failed.decision().is_none());

        let order_failed = CycleOutcome::Failed {
            decision: Some(Decision {
                signal: Signal::Buy,
                reason: None,
                row: None,
            }),
            error: DataError::Connection("reset".into()).into(),
        };
        assert_eq!(order_failed.next_delay(&settings), Duration::from_secs(60));
    }
}
