//! Trading terminal gateways.
//!
//! - [`TerminalBridge`]: HTTP client for a bridge process that exposes the
//!   trading terminal's account, symbol, tick, rates and order calls.
//! - [`PaperTerminal`]: in-memory terminal that fills every order at its
//!   requested price.
//! - [`DryRunGateway`]: wraps another gateway and logs orders instead of
//!   sending them.

mod bridge;
mod dry_run;
mod paper;

pub use bridge::{BridgeConfig, TerminalBridge};
pub use dry_run::DryRunGateway;
pub use paper::{PaperTerminal, StaticQuotes};
