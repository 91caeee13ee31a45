//! Core types and traits for the scalper.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, BarSeries, Quote)
//! - Trade request and result types handed to the order gateway
//! - The Buy/Sell/None signal
//! - Collaborator traits for the bar feed and the order gateway

pub mod error;
pub mod traits;
pub mod types;

pub use error::{ScalperError, ScalperResult};
pub use traits::*;
pub use types::*;
