use anyhow::Result;
use clap::Parser;
use crabtrader::{cli, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first to check for debug flag
    let cli_args = cli::Cli::parse();

    let config = cli::load_config(cli_args.config.as_deref())?;

    let mut log_config = logging::LogConfig::new()
        .with_debug_mode(cli_args.debug)
        .with_level(config.logging.level.clone());
    if let Some(dir) = &config.logging.dir {
        log_config = log_config.with_log_dir(dir.clone());
    }
    let log_dir = log_config.log_dir.clone();

    let _guard = logging::init_logging(log_config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    // Clean up old log files (keep last 7 days)
    if cli_args.debug
        && let Ok(removed) = logging::cleanup_old_logs(&log_dir, 7)
        && removed > 0
    {
        tracing::info!("Cleaned up {} old log file(s)", removed);
    }

    cli::run(cli_args, config).await
}
