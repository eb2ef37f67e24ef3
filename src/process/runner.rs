//! Runs assembled commands as child processes.
//!
//! The child inherits the terminal, so the downloader's progress output is
//! streamed straight to the user. Only the exit status comes back.

use crate::error::{AppError, Result};
use crate::models::CommandLine;
use crate::process::Interrupts;
use async_trait::async_trait;
use colored::*;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::{error, info, warn};

/// Status reported when a run is aborted with Ctrl-C or the child died from a signal.
pub const INTERRUPTED_STATUS: i32 = 1;

/// Status reported when the executable could not be started at all.
pub const SPAWN_FAILED_STATUS: i32 = 127;

/// SIGINT, delivered to the whole foreground group when Ctrl-C races the handler.
#[cfg(unix)]
const SIGINT: i32 = 2;

/// Whether the child itself died from the terminal's Ctrl-C.
#[cfg(unix)]
fn killed_by_interrupt(status: &ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;
    status.signal() == Some(SIGINT)
}

#[cfg(not(unix))]
fn killed_by_interrupt(_status: &ExitStatus) -> bool {
    false
}

/// Executes a command line and reports its exit status.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `cmd`, optionally echoing it first, and returns the exit status.
    ///
    /// Child failures and interruptions are statuses, not errors.
    async fn run(&self, cmd: &CommandLine, show_cmd: bool) -> Result<i32>;
}

/// Runs commands with `tokio::process`, honouring Ctrl-C per child.
pub struct ProcessRunner {
    interrupts: Interrupts,
}

impl ProcessRunner {
    pub fn new(interrupts: Interrupts) -> Self {
        Self { interrupts }
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, cmd: &CommandLine, show_cmd: bool) -> Result<i32> {
        let program = cmd
            .program()
            .ok_or_else(|| AppError::Cli("cannot run an empty command".to_string()))?;

        if show_cmd {
            println!("{}", format!("$ {}", cmd).dimmed());
        }
        info!("Running: {}", cmd);

        let guard = self.interrupts.child_guard();

        let mut child = match Command::new(program)
            .args(cmd.args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                error!("Failed to start {}: {}", program, e);
                println!("{} {}: {}", "Failed to start".red(), program, e);
                return Ok(SPAWN_FAILED_STATUS);
            },
        };

        tokio::select! {
            status = child.wait() => {
                let status = status?;
                if killed_by_interrupt(&status) {
                    warn!("{} stopped by Ctrl-C", program);
                    println!("{}", "Interrupted".red());
                    return Ok(INTERRUPTED_STATUS);
                }
                let code = status.code().unwrap_or(INTERRUPTED_STATUS);
                info!("{} exited with {}", program, code);
                Ok(code)
            },
            _ = guard.interrupted() => {
                warn!("Interrupted while running {}", program);
                if let Err(e) = child.kill().await {
                    warn!("Failed to kill {}: {}", program, e);
                }
                println!("{}", "Interrupted".red());
                Ok(INTERRUPTED_STATUS)
            },
        }
    }
}
