//! Replaces the installed program with the build served at a configured URL.

use crate::error::{AppError, Result};
use crate::update::UpdateOutcome;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info, warn};

/// Upper bound on the whole update fetch.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Fetches the published build and swaps it in when it differs.
pub struct SelfUpdater {
    client: Client,
    url: String,
    install_path: PathBuf,
}

impl SelfUpdater {
    /// Creates an updater that overwrites `install_path` with the body at `url`.
    pub fn new(url: &str, install_path: PathBuf) -> Result<Self> {
        let client = Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self {
            client,
            url: url.trim().to_string(),
            install_path,
        })
    }

    /// Targets the currently running executable.
    pub fn for_current_exe(url: &str) -> Result<Self> {
        let exe = std::env::current_exe()?;
        Self::new(url, exe)
    }

    /// Runs the check. Never fails; an empty URL is a no-op.
    pub async fn check(&self) -> UpdateOutcome {
        if self.url.is_empty() {
            debug!("No update URL configured, skipping self-update");
            return UpdateOutcome::Skipped;
        }
        match self.try_update().await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Self-update from {} failed: {}", self.url, e);
                UpdateOutcome::Failed(e.to_string())
            },
        }
    }

    async fn try_update(&self) -> Result<UpdateOutcome> {
        info!("Checking {} for a newer build", self.url);

        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        let latest = response.bytes().await?;
        let current = fs::read(&self.install_path).await?;

        if trim_whitespace(&latest) == trim_whitespace(&current) {
            info!("Installed build is up to date");
            return Ok(UpdateOutcome::UpToDate);
        }
        if trim_whitespace(&latest).is_empty() {
            return Err(AppError::Cli("update URL returned an empty body".to_string()));
        }

        self.replace(&latest).await?;
        info!("Replaced {}", self.install_path.display());
        Ok(UpdateOutcome::Updated)
    }

    /// Writes a sibling temp file then renames it over the install path.
    ///
    /// A running executable cannot be written in place on every platform, but
    /// it can be replaced by rename.
    async fn replace(&self, contents: &[u8]) -> Result<()> {
        let file_name = self
            .install_path
            .file_name()
            .ok_or_else(|| AppError::Cli("install path has no file name".to_string()))?;
        let mut staged_name = file_name.to_os_string();
        staged_name.push(".update");
        let staged = self.install_path.with_file_name(staged_name);

        fs::write(&staged, contents).await?;
        let permissions = fs::metadata(&self.install_path).await?.permissions();
        fs::set_permissions(&staged, permissions).await?;

        if let Err(e) = fs::rename(&staged, &self.install_path).await {
            let _ = fs::remove_file(&staged).await;
            return Err(e.into());
        }
        Ok(())
    }
}

fn trim_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

#[cfg(test)]
mod tests {
    use super::trim_whitespace;

    #[test]
    fn test_trim_whitespace() {
        assert_eq!(trim_whitespace(b"  abc \n"), b"abc");
        assert_eq!(trim_whitespace(b"\n\t "), b"");
        assert_eq!(trim_whitespace(b""), b"");
        assert_eq!(trim_whitespace(b"a b"), b"a b");
    }
}
