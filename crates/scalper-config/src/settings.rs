//! Configuration structures.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use scalper_core::error::ScalperError;
use scalper_core::types::{FillPolicy, TimeInForce, Timeframe, TradeParams};
use scalper_engine::PollSettings;
use scalper_indicators::IndicatorParams;
use scalper_signals::SignalThresholds;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub terminal: TerminalSettings,
    #[serde(default)]
    pub trading: TradingSettings,
    #[serde(default)]
    pub indicators: IndicatorParams,
    #[serde(default)]
    pub signal: SignalThresholds,
    #[serde(default)]
    pub polling: PollingSettings,
    #[serde(default)]
    pub paper: PaperSettings,
}

impl AppConfig {
    /// Check every section, reporting the first problem found.
    pub fn validate(&self) -> Result<(), ScalperError> {
        self.indicators.validate()?;
        self.signal.validate()?;
        self.trading.validate()?;
        self.polling.validate()?;

        if self.paper.spread < Decimal::ZERO {
            return Err(ScalperError::Validation("paper.spread must not be negative".into()));
        }
        if self.paper.digits > 10 {
            return Err(ScalperError::Validation("paper.digits must be at most 10".into()));
        }
        if self.terminal.base_url.trim().is_empty() {
            return Err(ScalperError::Config("terminal.base_url is empty".into()));
        }
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, ScalperError> {
        toml::to_string_pretty(self).map_err(|e| ScalperError::Config(e.to_string()))
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "scalper".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    /// Directory-qualified file name for a daily rolling log
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Terminal bridge connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalSettings {
    pub base_url: String,
    /// Name of the environment variable holding the bridge API key
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8228".to_string(),
            api_key_env: "SCALPER_BRIDGE_API_KEY".to_string(),
            timeout_secs: 10,
        }
    }
}

impl TerminalSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// What and how much to trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TradingSettings {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub lots: Decimal,
    pub deviation: u32,
    pub magic: u64,
    pub comment: String,
    pub stop_loss_pips: Decimal,
    pub take_profit_pips: Decimal,
    pub attach_protective_levels: bool,
}

impl Default for TradingSettings {
    fn default() -> Self {
        Self {
            symbol: "XAUUSD".to_string(),
            timeframe: Timeframe::M1,
            lots: dec!(0.1),
            deviation: 10,
            magic: 123456,
            comment: "Bot Trading XAU/USD".to_string(),
            stop_loss_pips: dec!(10),
            take_profit_pips: dec!(10),
            attach_protective_levels: false,
        }
    }
}

impl TradingSettings {
    pub fn validate(&self) -> Result<(), ScalperError> {
        if self.symbol.trim().is_empty() {
            return Err(ScalperError::Validation("trading.symbol is empty".into()));
        }
        if self.lots <= Decimal::ZERO {
            return Err(ScalperError::Validation(format!(
                "trading.lots must be positive, got {}",
                self.lots
            )));
        }
        if self.stop_loss_pips < Decimal::ZERO || self.take_profit_pips < Decimal::ZERO {
            return Err(ScalperError::Validation(
                "stop-loss and take-profit distances must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Whether SL/TP distances are set but will not be sent.
    pub fn has_detached_levels(&self) -> bool {
        !self.attach_protective_levels
            && (self.stop_loss_pips > Decimal::ZERO || self.take_profit_pips > Decimal::ZERO)
    }

    /// Order parameters for the placer.
    pub fn trade_params(&self) -> TradeParams {
        TradeParams {
            symbol: self.symbol.clone(),
            volume: self.lots,
            deviation: self.deviation,
            magic: self.magic,
            comment: self.comment.clone(),
            time_in_force: TimeInForce::GTC,
            filling: FillPolicy::IOC,
            stop_loss_pips: self.stop_loss_pips,
            take_profit_pips: self.take_profit_pips,
            attach_protective_levels: self.attach_protective_levels,
        }
    }
}

/// Loop cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingSettings {
    pub bar_count: usize,
    pub interval_secs: u64,
    pub retry_interval_secs: u64,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            bar_count: 100,
            interval_secs: 60,
            retry_interval_secs: 5,
        }
    }
}

impl PollingSettings {
    pub fn validate(&self) -> Result<(), ScalperError> {
        if self.bar_count == 0 {
            return Err(ScalperError::Validation("polling.bar_count must be positive".into()));
        }
        if self.interval_secs == 0 || self.retry_interval_secs == 0 {
            return Err(ScalperError::Validation(
                "polling intervals must be at least one second".into(),
            ));
        }
        Ok(())
    }

    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            bar_count: self.bar_count,
            interval: Duration::from_secs(self.interval_secs),
            retry_interval: Duration::from_secs(self.retry_interval_secs),
        }
    }
}

/// Paper terminal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaperSettings {
    /// Synthetic bid/ask spread around the last close
    pub spread: Decimal,
    pub initial_balance: Decimal,
    /// Quote decimals of the simulated symbol
    pub digits: u32,
}

impl Default for PaperSettings {
    fn default() -> Self {
        Self {
            spread: dec!(0.2),
            initial_balance: dec!(10000),
            digits: 2,
        }
    }
}
