/*
[INPUT]:  CLI arguments, layered configuration, platform schema overrides
[OUTPUT]: Terminal dashboard or one-shot CLI commands against the backend
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, subcommands, or startup flow
*/

mod cli;
mod tui;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use reelbrand_dashboard::DashboardConfig;

use crate::tui::{LOG_BUFFER_CAPACITY, LogBuffer, LogWriterFactory};

#[derive(Parser, Debug)]
#[command(name = "reelbrand-dashboard", version, about = "ReelBrand account dashboard")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "api-url", value_name = "URL", global = true)]
    api_url: Option<String>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info", global = true)]
    log_level: String,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the terminal dashboard (default)
    Tui,
    /// Print platform field schemas and setup guides
    Platforms {
        #[arg(long)]
        platform: Option<String>,
    },
    /// Connect a new account through interactive prompts
    Connect {
        #[arg(long)]
        platform: Option<String>,
    },
    /// Inspect connected accounts
    Accounts {
        #[command(subcommand)]
        action: AccountsCommand,
    },
    /// Load and validate configuration and schemas, then exit
    CheckConfig,
}

#[derive(Subcommand, Debug)]
enum AccountsCommand {
    List,
    Show { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let command = args.command.unwrap_or(Command::Tui);

    let config = DashboardConfig::load(args.config_path.as_deref())
        .context("load config")?
        .with_api_url(args.api_url);
    config.validate().context("validate config")?;

    if matches!(command, Command::Tui) {
        let log_buffer = Arc::new(Mutex::new(LogBuffer::new(LOG_BUFFER_CAPACITY)));
        init_tui_tracing(&args.log_level, log_buffer.clone())?;
        info!(api_url = %config.api_url, "starting reelbrand dashboard");
        let platforms = config.load_platforms()?;
        return tui::run_tui(config, platforms, log_buffer).await;
    }

    init_tracing(&args.log_level)?;
    let platforms = config.load_platforms()?;

    match command {
        Command::Tui => Ok(()),
        Command::Platforms { platform } => cli::platforms::print_platforms(&platforms, platform.as_deref()),
        Command::Connect { platform } => {
            cli::connect::run_connect(&config, platforms, platform.as_deref()).await
        }
        Command::Accounts { action } => {
            let client = config.build_client()?;
            match action {
                AccountsCommand::List => cli::accounts::list_accounts(&client).await,
                AccountsCommand::Show { id } => cli::accounts::show_account(&client, &id).await,
            }
        }
        Command::CheckConfig => {
            platforms.validate().context("validate platform schemas")?;
            cli::platforms::print_config_summary(&config, &platforms);
            Ok(())
        }
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

fn init_tui_tracing(log_level: &str, log_buffer: tui::LogBufferHandle) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(LogWriterFactory::new(log_buffer))
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}
