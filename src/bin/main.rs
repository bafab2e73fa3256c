//! BankHub - Terminal User Interface
//!
//! Entry point: loads configuration, starts file logging and runs the TUI
//! against the account REST API.

use anyhow::Context;
use bankhub::{config::AppConfig, logging::init_logging, run_tui, BankClient};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bankhub")]
#[command(about = "BankHub - gestion des comptes bancaires dans le terminal")]
#[command(version)]
struct Args {
    /// Base URL of the accounts API (overrides the config file)
    #[arg(long, env = "BANKHUB_API_URL")]
    api_url: Option<String>,

    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level or filter directive (e.g. debug, bankhub=trace)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    save_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref()).context("loading configuration")?;
    if let Some(url) = args.api_url {
        config = config.with_api_base_url(url);
    }
    if let Some(level) = args.log_level {
        config = config.with_log_level(level);
    }
    config.validate().context("invalid configuration")?;

    if args.save_config {
        let path = args.config.unwrap_or_else(AppConfig::default_path);
        config
            .save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Configuration written to {}", path.display());
        return Ok(());
    }

    let log_path = init_logging(&config).context("initializing logging")?;
    tracing::info!(log = %log_path.display(), api = %config.api_base_url, "starting bankhub");

    let client = BankClient::from_config(&config).context("creating API client")?;
    run_tui(client, config).await.context("running TUI")?;

    Ok(())
}
