//! Trading loop for the scalper.
//!
//! [`Trader`] runs one fetch, compute, detect, place cycle per poll interval.
//! [`OrderPlacer`] owns the checks that come before an order reaches the
//! terminal.

pub mod orders;
pub mod trader;

pub use orders::{protective_levels, DeclineReason, OrderOutcome, OrderPlacer};
pub use trader::{CycleOutcome, PollSettings, Trader};
