//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scalper")]
#[command(author, version, about = "RSI/MACD/Bollinger scalping client for a trading terminal")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", env = "SCALPER_CONFIG")]
    pub config: PathBuf,

    /// Log level (overrides the config file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Trade live through the terminal bridge
    Run(RunArgs),
    /// Trade a CSV bar file against an in-memory terminal
    Paper(PaperArgs),
    /// Compute indicators and the signal for a CSV bar file
    Check(CheckArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Enable dry run (no real orders)
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(clap::Args)]
pub struct PaperArgs {
    /// Bar file (CSV), re-read every cycle
    #[arg(short, long)]
    pub data: PathBuf,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,
}

#[derive(clap::Args)]
pub struct CheckArgs {
    /// Bar file (CSV)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Number of trailing rows to print
    #[arg(long, default_value = "5")]
    pub rows: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
