//! Logging setup.

use scalper_core::error::ScalperError;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Console output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ScalperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(ScalperError::Config(format!("unknown log format: {}", other))),
        }
    }
}

/// Split a log path into the directory and file-name prefix of a rolling
/// appender.
fn rolling_parts(path: &Path) -> Result<(PathBuf, PathBuf), ScalperError> {
    let name = path
        .file_name()
        .ok_or_else(|| ScalperError::Config(format!("log file has no name: {}", path.display())))?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((dir, PathBuf::from(name)))
}

/// Setup logging with the given level.
///
/// `RUST_LOG` takes precedence over `level`. With `file` set, records are
/// also written as JSON to a daily rolling file; keep the returned guard
/// alive until exit so buffered lines are flushed.
pub fn setup_logging(
    level: &str,
    format: LogFormat,
    file: Option<&Path>,
) -> Result<Option<WorkerGuard>, ScalperError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console = match format {
        LogFormat::Json => fmt::layer().json().boxed(),
        LogFormat::Pretty => fmt::layer().pretty().boxed(),
    };

    let (file_layer, guard) = match file {
        Some(path) => {
            let (dir, name) = rolling_parts(path)?;
            let appender = tracing_appender::rolling::daily(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| ScalperError::Internal(format!("logging already initialised: {}", e)))?;

    Ok(guard)
}
