//! CLI Module
//!
//! Command-line interface for CrabTrader using Clap v4.

mod commands;
mod ui;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;

pub use commands::load_draft;

/// CrabTrader - build and launch trading agents from the terminal
#[derive(Parser, Debug)]
#[command(name = "crabtrader")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (written to ~/.crabtrader/logs/)
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive agent wizard (default)
    Wizard {
        /// Start from a saved draft (TOML or JSON)
        #[arg(long)]
        draft: Option<PathBuf>,
    },

    /// Show how a personality description is split into character fields
    Parse {
        /// Personality text (reads --file when omitted)
        text: Option<String>,

        /// Read the personality text from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },

    /// Validate a draft and print the request that would be sent
    Preview {
        /// Draft file (TOML or JSON)
        #[arg(long)]
        draft: PathBuf,
    },

    /// Validate a draft and create the agent without the wizard
    Create {
        /// Draft file (TOML or JSON)
        #[arg(long)]
        draft: PathBuf,
    },

    /// Write a starter config to ~/.crabtrader/config.toml
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

/// Load configuration from `--config` or the default locations, then validate
pub fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    config.validate()?;
    Ok(config)
}

/// Main CLI entry point
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    if cli.debug {
        tracing::info!("Debug mode enabled");
    }

    match cli.command {
        None => ui::cmd_wizard(&config, None).await,
        Some(Commands::Wizard { draft }) => ui::cmd_wizard(&config, draft.as_deref()).await,
        Some(Commands::Parse { text, file }) => commands::cmd_parse(text, file.as_deref()),
        Some(Commands::Preview { draft }) => commands::cmd_preview(&config, &draft),
        Some(Commands::Create { draft }) => commands::cmd_create(&config, &draft).await,
        Some(Commands::Init { force }) => commands::cmd_init(force),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_wizard() {
        let cli = Cli::try_parse_from(["crabtrader", "--debug"]).expect("parse");
        assert!(cli.debug);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_text_and_file_conflict() {
        let result = Cli::try_parse_from(["crabtrader", "parse", "Bold.", "--file", "p.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_create_requires_draft() {
        assert!(Cli::try_parse_from(["crabtrader", "create"]).is_err());
        let cli = Cli::try_parse_from(["crabtrader", "create", "--draft", "agent.toml"])
            .expect("parse");
        assert!(matches!(
            cli.command,
            Some(Commands::Create { ref draft }) if draft == &PathBuf::from("agent.toml")
        ));
    }

    #[test]
    fn test_init_force_flag() {
        let cli = Cli::try_parse_from(["crabtrader", "init", "--force"]).expect("parse");
        assert!(matches!(cli.command, Some(Commands::Init { force: true })));
    }

    #[test]
    fn test_load_config_missing_path() {
        let err = load_config(Some(std::path::Path::new("/nonexistent/crabtrader.toml")))
            .expect_err("missing file");
        assert!(err.to_string().contains("Config file not found"));
    }
}
