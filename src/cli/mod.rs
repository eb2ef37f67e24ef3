//! Handles Command Line Interface (CLI) related functionalities.
//!
//! Includes the main menu loop, the download flow, the option builders,
//! and the static screens. All terminal input goes through `Prompter`
//! and all child processes through `CommandRunner`.

mod flow;
mod options;
mod prompt;
mod screens;

pub use prompt::*;
pub use screens::*;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{CommandLine, MenuAction, DEFAULT_MENU_KEY, PLATFORMS};
use crate::process::{self, CommandRunner};
use crate::update::{self, SelfUpdater, UpdateOutcome};
use clap::Parser;
use colored::*;
use tracing::{error, info, warn};

/// Interactive all-in-one media downloader built on yt-dlp.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {}

/// CLI application
pub struct App<'a, P, R> {
    config: &'a Config,
    prompter: P,
    runner: R,
    tool_lookup: fn(&str) -> bool,
}

impl<'a, P: Prompter, R: CommandRunner> App<'a, P, R> {
    /// Create a new CLI application
    pub fn new(config: &'a Config, prompter: P, runner: R) -> Self {
        Self {
            config,
            prompter,
            runner,
            tool_lookup: process::is_available,
        }
    }

    /// Replaces the executable lookup used before audio downloads.
    #[cfg(test)]
    pub fn with_tool_lookup(mut self, lookup: fn(&str) -> bool) -> Self {
        self.tool_lookup = lookup;
        self
    }

    /// Runs the downloader upgrade and the self-update check, in that order.
    ///
    /// Both are advisory: failures are printed and logged, never returned.
    pub async fn startup_updates(&self) {
        println!("{}", format!("Checking for {} updates...", self.config.downloader).yellow());
        let spinner = screens::spinner(&format!("Upgrading {}", self.config.downloader))
            .map_err(|e| warn!("Spinner unavailable: {}", e))
            .ok();
        let outcome = update::upgrade_downloader(&self.config.python, &self.config.downloader).await;
        if let Some(bar) = spinner {
            bar.finish_and_clear();
        }
        match outcome {
            UpdateOutcome::Failed(reason) => {
                warn!("Downloader upgrade failed: {}", reason);
                println!(
                    "{}",
                    format!("{} update failed: {}", self.config.downloader, reason).red()
                );
            },
            _ => println!("{}", format!("{} updated", self.config.downloader).green()),
        }

        if self.config.update_url.trim().is_empty() {
            return;
        }
        println!("{}", "Checking for script updates...".yellow());
        let outcome = match SelfUpdater::for_current_exe(&self.config.update_url) {
            Ok(updater) => updater.check().await,
            Err(e) => UpdateOutcome::Failed(e.to_string()),
        };
        info!("Self-update: {}", outcome);
        match outcome {
            UpdateOutcome::Updated => {
                println!("{}", "Updated! Restart it to apply changes.".green())
            },
            UpdateOutcome::Failed(_) => println!("{}", "Failed to auto-update.".red()),
            UpdateOutcome::UpToDate | UpdateOutcome::Skipped => {},
        }
    }

    /// Main menu loop. Returns when the user quits.
    ///
    /// Prompt failures (closed terminal, Ctrl-C inside a prompt) are returned
    /// so the caller can end the session; anything else is reported and the
    /// menu comes back.
    pub async fn run(&self) -> Result<()> {
        let keys: Vec<&str> = PLATFORMS.iter().map(|p| p.key).collect();

        loop {
            screens::show_menu(self.config);
            let key = self.prompter.choose("Select", &keys, DEFAULT_MENU_KEY)?;
            let action = MenuAction::from_key(&key)
                .ok_or_else(|| AppError::Cli(format!("Unknown menu key: {}", key)))?;
            info!("Menu selection: {:?}", action);

            let result = match action {
                MenuAction::Quit => break,
                MenuAction::Install => self.install_prerequisites().await,
                MenuAction::Support => self.support(),
                MenuAction::Search => self.download_flow("Search", true).await.map(|_| ()),
                MenuAction::AutoDetect => {
                    self.download_flow("Any supported", false).await.map(|_| ())
                },
                MenuAction::Platform(label) => self.download_flow(label, false).await.map(|_| ()),
            };

            match result {
                Ok(()) => {},
                Err(e @ AppError::Prompt(_)) => return Err(e),
                Err(e) => {
                    error!("Command execution failed: {:?}", e);
                    println!("{} {}", "Error executing command:".red(), e.to_string().red());
                },
            }
        }

        info!("Session finished");
        Ok(())
    }

    /// Shows the setup steps and optionally installs the downloader package.
    async fn install_prerequisites(&self) -> Result<()> {
        screens::show_install_steps();
        let question = format!("Run pip install {} now?", self.config.downloader);
        if self.prompter.confirm(&question, false)? {
            let cmd = CommandLine::from_args([
                self.config.python.as_str(),
                "-m",
                "pip",
                "install",
                self.config.downloader.as_str(),
            ]);
            let status = self.runner.run(&cmd, true).await?;
            if status != 0 {
                warn!("Package install exited with {}", status);
            }
        }
        self.prompter.pause("Press Enter...")
    }

    fn support(&self) -> Result<()> {
        screens::show_support(self.config);
        self.prompter.pause("Enter...")
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{RecordingRunner, ScriptedPrompter};
    use super::*;
    use std::path::PathBuf;

    fn test_config() -> Config {
        Config {
            download_dir: PathBuf::from("/data/media"),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_quit_ends_session() {
        let config = test_config();
        let app = App::new(&config, ScriptedPrompter::new(["q"]), RecordingRunner::new(0));
        assert!(app.run().await.is_ok());
        assert!(app.runner.commands().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_key_reprompts() {
        let config = test_config();
        let app = App::new(
            &config,
            ScriptedPrompter::new(["z", "0", "Q"]),
            RecordingRunner::new(0),
        );
        assert!(app.run().await.is_ok());
        assert_eq!(app.prompter.asked().len(), 3);
    }

    #[tokio::test]
    async fn test_platform_download_then_quit() {
        let config = test_config();
        let prompter = ScriptedPrompter::new([
            "2",
            "https://www.tiktok.com/@u/video/1",
            "",
            "1",
            "",
            "",
            "Q",
        ]);
        let app = App::new(&config, prompter, RecordingRunner::new(0)).with_tool_lookup(|_| true);

        assert!(app.run().await.is_ok());
        assert!(app.prompter.asked().contains(&"Paste TikTok URL".to_string()));
        let commands = app.runner.commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].as_slice()[2], "/data/media/%(uploader)s - %(title)s.%(ext)s");
    }

    #[tokio::test]
    async fn test_default_selection_is_auto_detect() {
        let config = test_config();
        // Enter at the menu, then an empty URL aborts the flow.
        let prompter = ScriptedPrompter::new(["", "", "q"]);
        let app = App::new(&config, prompter, RecordingRunner::new(0));

        assert!(app.run().await.is_ok());
        assert_eq!(app.prompter.asked()[1], "Paste Any supported URL");
    }

    #[tokio::test]
    async fn test_failed_download_returns_to_menu() {
        let config = test_config();
        let prompter = ScriptedPrompter::new(["a", "https://example.com/v", "", "1", "", "", "q"]);
        let app = App::new(&config, prompter, RecordingRunner::new(1)).with_tool_lookup(|_| true);

        assert!(app.run().await.is_ok());
        assert_eq!(app.runner.commands().len(), 1);
        assert_eq!(app.prompter.remaining(), 0);
    }

    #[tokio::test]
    async fn test_closed_terminal_is_a_prompt_error() {
        let config = test_config();
        let app = App::new(&config, ScriptedPrompter::new(["d", ""]), RecordingRunner::new(0));
        assert!(matches!(app.run().await, Err(AppError::Prompt(_))));
    }

    #[tokio::test]
    async fn test_install_runs_pip_when_confirmed() {
        let config = test_config();
        let prompter = ScriptedPrompter::new(["I", "y", "", "Q"]);
        let app = App::new(&config, prompter, RecordingRunner::new(0));

        assert!(app.run().await.is_ok());
        let commands = app.runner.commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(
            commands[0].as_slice(),
            &["python3", "-m", "pip", "install", "yt-dlp"]
        );
    }

    #[tokio::test]
    async fn test_install_declined_runs_nothing() {
        let config = test_config();
        let prompter = ScriptedPrompter::new(["i", "", "", "q"]);
        let app = App::new(&config, prompter, RecordingRunner::new(0));

        assert!(app.run().await.is_ok());
        assert!(app.runner.commands().is_empty());
    }

    #[tokio::test]
    async fn test_startup_updates_never_fail() {
        let config = Config {
            python: "pockerdnl-no-such-python-3f9a".to_string(),
            ..test_config()
        };
        let app = App::new(&config, ScriptedPrompter::default(), RecordingRunner::new(0));
        // No update URL: only the (failing) upgrade runs, and nothing is raised.
        app.startup_updates().await;
    }
}
