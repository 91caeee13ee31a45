//! Collaborator and indicator traits.

mod data_source;
mod gateway;
mod indicator;

pub use data_source::{BarSeriesProvider, QuoteSource};
pub use gateway::OrderGateway;
pub use indicator::Indicator;
