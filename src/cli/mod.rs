//! `btdash` command-line interface.
//!
//! # Commands
//!
//! - `hotkeys` - List every hotkey found under the wallet root
//! - `keypair` - Load a key file and show its address
//! - `select` - Pick the hotkeys the dashboard tracks

use crate::config::DashboardConfig;
use crate::logging::{init_logging, LogFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;
pub mod utils;

/// Bittensor dashboard wallet tools
#[derive(Parser)]
#[command(name = "btdash")]
#[command(author = "Cortex Foundation")]
#[command(version = "0.1.0")]
#[command(about = "Bittensor dashboard wallet tools", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Wallet root directory (overrides the config file)
    #[arg(long, global = true)]
    pub wallet_path: Option<String>,

    /// Config file (default: ~/.bittensor/dashboard.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Log format (text, json, compact)
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// List hotkeys found under the wallet root
    #[command(alias = "h")]
    Hotkeys(commands::hotkeys::HotkeysCommand),

    /// Load a key file and print its address
    #[command(alias = "k")]
    Keypair(commands::keypair::KeypairCommand),

    /// Choose which hotkeys to track
    #[command(alias = "s")]
    Select(commands::select::SelectCommand),
}

impl Cli {
    /// Config file location: `--config` or the default.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(DashboardConfig::default_path)
    }

    /// Load the config and layer command-line overrides on top.
    pub fn load_config(&self) -> anyhow::Result<DashboardConfig> {
        let mut config = DashboardConfig::load_from(self.config_path())?;

        if let Some(path) = &self.wallet_path {
            config.wallet_path = Some(path.clone());
        }
        if self.debug {
            config.logging.debug = true;
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
        Ok(config)
    }
}

/// Run the CLI application
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    let mut logging = config.logging.clone();
    if matches!(cli.command, Commands::Select(_)) {
        // The dialog owns the terminal
        logging = logging.with_console(false).with_file_logging(true);
    }
    init_logging(&logging);

    match &cli.command {
        Commands::Hotkeys(cmd) => commands::hotkeys::execute(cmd, &config)?,
        Commands::Keypair(cmd) => commands::keypair::execute(cmd)?,
        Commands::Select(cmd) => commands::select::execute(cmd, config, &cli.config_path())?,
    }
    Ok(())
}
