//! Upgrades the downloader package with the platform's package installer.

use crate::update::UpdateOutcome;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{info, warn};

/// Runs `<python> -m pip install -U <package>` with output captured.
pub async fn upgrade_downloader(python: &str, package: &str) -> UpdateOutcome {
    info!("Upgrading {} via {} -m pip", package, python);

    let output = Command::new(python)
        .args(["-m", "pip", "install", "-U", package])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await;

    match output {
        Ok(output) if output.status.success() => {
            info!("{} upgrade finished", package);
            UpdateOutcome::Updated
        },
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = stderr
                .lines()
                .rev()
                .find(|l| !l.trim().is_empty())
                .map(|l| l.trim().to_string())
                .unwrap_or_else(|| format!("pip exited with {}", output.status));
            warn!("{} upgrade failed: {}", package, reason);
            UpdateOutcome::Failed(reason)
        },
        Err(e) => {
            warn!("Could not run {}: {}", python, e);
            UpdateOutcome::Failed(e.to_string())
        },
    }
}
