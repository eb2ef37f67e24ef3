mod cli;
mod config;
mod error;
mod models;
mod process;
mod update;

use clap::Parser;
use cli::{App, Cli, DialoguerPrompter};
use colored::*;
use config::Config;
use error::{AppError, Result};
use process::{Interrupts, ProcessRunner};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let _cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            println!("{} {}", "Error: invalid configuration:".red(), e);
            return Err(e);
        },
    };

    // Keep the guard alive so buffered file logs are flushed on exit.
    let _log_guard = init_logging(&config);

    info!("Starting media downloader session...");

    let interrupts = Interrupts::new();
    if let Err(e) = interrupts.install() {
        error!("{}", e);
    }

    if let Err(e) = config.ensure_download_dir() {
        error!("Failed to prepare download directory: {:?}", e);
        println!("{} {}", "Error:".red(), e);
        return Err(e);
    }

    let app = App::new(
        &config,
        DialoguerPrompter::new(),
        ProcessRunner::new(interrupts.clone()),
    );

    app.startup_updates().await;
    cli::show_header();

    match app.run().await {
        Ok(()) => Ok(()),
        Err(AppError::Prompt(e)) => {
            // Ctrl-C inside a prompt or a closed terminal ends the session.
            info!("Prompt ended the session: {}", e);
            process::print_exit_message();
            Ok(())
        },
        Err(e) => {
            error!("Session failed: {:?}", e);
            println!("{} {}", "Error:".red(), e);
            Err(e)
        },
    }
}

/// Logs to a daily file under `log_dir` when configured, otherwise to stderr.
///
/// The default level is `warn` so log lines do not interleave with the menu;
/// `RUST_LOG` overrides it.
fn init_logging(config: &Config) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "pockerdnl.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        },
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            None
        },
    }
}
