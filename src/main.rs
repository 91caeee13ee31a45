//! Scalper CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use scalper_config::load_config;
use scalper_monitor::{setup_logging, LogFormat};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            if matches!(cli.command, Commands::ValidateConfig) {
                println!("Configuration error: {}", e);
            }
            return Err(e)
                .with_context(|| format!("Failed to load configuration from {:?}", cli.config));
        }
    };

    // Setup logging
    let log_level = cli
        .log_level
        .map(|level| level.as_str().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        config.logging.format.parse()?
    };
    let _guard = setup_logging(&log_level, format, config.logging.file.as_deref().map(Path::new))?;

    // Execute command
    match cli.command {
        Commands::Run(args) => cli::commands::run::run(args, &config).await,
        Commands::Paper(args) => cli::commands::paper::run(args, &config).await,
        Commands::Check(args) => cli::commands::check::run(args, &config).await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config, &config).await,
    }
}
