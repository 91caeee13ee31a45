//! Configuration management.

mod settings;

pub use settings::{
    AppConfig, AppSettings, LoggingConfig, PaperSettings, PollingSettings, TerminalSettings,
    TradingSettings,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Prefix of environment overrides, e.g. `SCALPER__TRADING__LOTS=0.2`.
pub const ENV_PREFIX: &str = "SCALPER";

/// Load configuration from file and environment.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_file_and_env() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[trading]
symbol = "XAUUSD"
lots = 0.2

[polling]
bar_count = 150
"#
        )
        .unwrap();

        std::env::set_var("SCALPER__POLLING__INTERVAL_SECS", "30");
        let config = load_config(file.path()).unwrap();
        std::env::remove_var("SCALPER__POLLING__INTERVAL_SECS");

        assert_eq!(config.trading.lots, rust_decimal_macros::dec!(0.2));
        assert_eq!(config.polling.bar_count, 150);
        assert_eq!(config.polling.interval_secs, 30);
        assert_eq!(config.polling.retry_interval_secs, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file() {
        assert!(load_config(Path::new("/nonexistent/scalper.toml")).is_err());
    }
}
