//! The download flow: target, confirmation, format, then run and report.

use crate::cli::{options, screens, App, Prompter};
use crate::error::Result;
use crate::models::{CommandLine, DownloadRequest, FormatChoice, Target};
use crate::process::CommandRunner;
use colored::*;
use tracing::{info, warn};

/// Where a download flow stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Blank target or declined confirmation.
    Aborted,
    /// Listing-only run with the downloader's status.
    Listed(i32),
    /// Download run with the downloader's status.
    Completed(i32),
}

/// Warning to show before an audio extraction when the transcoder is absent.
///
/// `is_installed` is only consulted for audio formats.
pub fn missing_transcoder_warning(
    format: &FormatChoice,
    transcoder: &str,
    is_installed: impl FnOnce(&str) -> bool,
) -> Option<String> {
    if format.extracts_audio() && !is_installed(transcoder) {
        Some(format!("{} missing, audio may fail.", transcoder))
    } else {
        None
    }
}

impl<P: Prompter, R: CommandRunner> App<'_, P, R> {
    /// Runs one download for `label`; in search mode the target is a query.
    pub async fn download_flow(&self, label: &str, search_mode: bool) -> Result<FlowOutcome> {
        screens::show_flow_rule(label);

        let raw = if search_mode {
            self.prompter.input("Search keywords", None)?
        } else {
            self.prompter.input(&format!("Paste {} URL", label), None)?
        };
        let Some(target) = Target::from_input(&raw, search_mode) else {
            info!("Empty target, leaving {} flow", label);
            return Ok(FlowOutcome::Aborted);
        };

        if !self.prompter.confirm("Proceed?", true)? {
            info!("Download of {} declined", target);
            return Ok(FlowOutcome::Aborted);
        }

        let format = options::choose_format(&self.prompter)?;

        if format.is_list_only() {
            let cmd = CommandLine::list_formats(self.config, &target);
            let status = self.runner.run(&cmd, true).await?;
            self.prompter.pause("Press Enter...")?;
            return Ok(FlowOutcome::Listed(status));
        }

        let template = options::choose_filename_template(&self.prompter)?;

        if let Some(warning) =
            missing_transcoder_warning(&format, &self.config.transcoder, self.tool_lookup)
        {
            warn!("{} not found on PATH, audio extraction may fail", self.config.transcoder);
            println!("{}", warning.red());
        }

        let request = DownloadRequest {
            target,
            format,
            template,
        };
        let cmd = CommandLine::assemble(self.config, &request);
        let status = self.runner.run(&cmd, true).await?;

        if status == 0 {
            info!("Download finished: {}", request.target);
            println!("{}", "✔ Done".green());
        } else {
            warn!("Download of {} failed with status {}", request.target, status);
            println!("{}", "✘ Failed".red());
        }
        self.prompter.pause("Press Enter...")?;

        Ok(FlowOutcome::Completed(status))
    }
}
