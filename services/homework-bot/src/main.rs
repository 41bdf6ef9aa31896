//! Homework bot CLI
//!
//! Command-line entry point for the homework review status relay.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use homework_bot::logging::init_logging;
use homework_bot::{load_config, Config, HomeworkBotBuilder, Secrets};
use tracing::Level;

#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(about = "Relays homework review status changes to Telegram")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log directory (overrides config file)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    // A missing .env is normal in production, where the variables are set directly.
    dotenvy::dotenv().ok();

    let mut config = if let Some(config_path) = &args.config {
        load_config(config_path)?
    } else {
        Config::default()
    };

    if let Some(log_dir) = args.log_dir {
        config.logging.directory = log_dir;
    }

    let _log_guard = init_logging(&config.logging, args.log_level)?;

    tracing::debug!(
        "Parsed command line arguments: config={:?}, log_level={:?}",
        args.config,
        args.log_level
    );

    let secrets = match Secrets::from_env() {
        Ok(secrets) => secrets,
        Err(e) => {
            tracing::error!("CRITICAL: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    tracing::info!("Starting homework bot");
    tracing::debug!(
        "Endpoint: {}, retry period: {}s, chat: {}",
        config.api.endpoint,
        config.polling.retry_period_seconds,
        secrets.telegram_chat_id
    );

    HomeworkBotBuilder::new(config, secrets)
        .build()?
        .start()
        .await?;

    Ok(ExitCode::SUCCESS)
}
