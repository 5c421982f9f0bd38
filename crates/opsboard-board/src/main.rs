/*
[INPUT]:  CLI arguments, YAML configuration, environment overrides, OS shutdown signals
[OUTPUT]: Kanban board TUI, interactive config init, or config check
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

mod cli;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use opsboard_adapter::{Credentials, OpsboardClient, TaskGateway};
use opsboard_board::config::{BoardConfig, LoggingConfig};
use opsboard_board::logging::{LOG_BUFFER_CAPACITY, LogBuffer, LogSink, init_tracing};
use opsboard_board::tui::run_tui;

#[derive(Parser, Debug)]
#[command(name = "opsboard", version, about = "Terminal kanban board for operations tasks")]
struct Cli {
    /// Configuration file (defaults to <config_dir>/opsboard/config.yaml)
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    /// Overrides logging.level from the configuration
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    log_level: Option<String>,
    /// Validate configuration and exit
    #[arg(long = "dry-run", global = true)]
    dry_run: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the board (default)
    Run,
    /// Create a configuration file interactively
    Init {
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Load and validate configuration, then print a summary
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Command::Init { output }) = &args.command {
        let output = match output.clone().or_else(|| args.config_path.clone()) {
            Some(path) => path,
            None => opsboard_board::config::default_config_path()
                .context("no config directory available; pass --output")?,
        };
        return cli::init::run_init(output);
    }

    let config = BoardConfig::load(args.config_path.as_deref()).context("load config")?;
    let log_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());

    let run_board = matches!(args.command, None | Some(Command::Run)) && !args.dry_run;
    if !run_board {
        // CLI output goes to stderr; the file sink is only for the board.
        init_tracing(&log_level, &LoggingConfig::default(), LogSink::Stderr)?;
        info!(
            base_url = %config.api.base_url,
            dry_run = args.dry_run,
            "configuration loaded"
        );
        if matches!(args.command, Some(Command::Check)) {
            cli::check::run_check(&config);
        } else {
            info!("dry-run requested; configuration validated");
        }
        return Ok(());
    }

    let log_buffer = LogBuffer::handle(LOG_BUFFER_CAPACITY);
    let _file_guard = init_tracing(
        &log_level,
        &config.logging,
        LogSink::Buffer(log_buffer.clone()),
    )?;
    info!(
        base_url = %config.api.base_url,
        project_id = ?config.board.project_id,
        "starting opsboard"
    );

    let gateway = build_gateway(&config)?;
    let shutdown = CancellationToken::new();
    setup_signal_handlers(shutdown.clone());

    run_tui(gateway, &config, log_buffer, shutdown.clone())
        .await
        .context("run board")?;
    shutdown.cancel();
    info!("opsboard exited");
    Ok(())
}

fn build_gateway(config: &BoardConfig) -> Result<Arc<dyn TaskGateway>> {
    let mut client = OpsboardClient::with_config(config.client_config(), &config.api.base_url)
        .context("create task service client")?;
    if let Some(token) = config.api.token.clone() {
        client.set_credentials(Credentials { api_token: token });
    }
    Ok(Arc::new(client))
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
