//! Error types for the scalper.

use thiserror::Error;

/// Top-level scalper error.
#[derive(Error, Debug)]
pub enum ScalperError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Signal error: {0}")]
    Signal(#[from] SignalError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Order gateway and terminal session errors.
///
/// These describe transport or session trouble. A trade the terminal answered
/// with a non-success retcode is not an error; it comes back as a
/// [`crate::types::TradeResult`].
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Session unavailable: {0}")]
    Session(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Bar feed errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("No data available for the requested range")]
    NoDataAvailable,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Indicator parameter errors.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Signal detector configuration errors.
#[derive(Error, Debug)]
pub enum SignalError {
    #[error("Invalid thresholds: {0}")]
    InvalidThresholds(String),
}

/// Result type alias for scalper operations.
pub type ScalperResult<T> = Result<T, ScalperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let err: ScalperError = DataError::NoDataAvailable.into();
        assert!(matches!(err, ScalperError::Data(DataError::NoDataAvailable)));

        let err: ScalperError = GatewayError::Session("terminal offline".into()).into();
        assert_eq!(
            err.to_string(),
            "Gateway error: Session unavailable: terminal offline"
        );
    }
}
