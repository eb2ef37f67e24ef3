//! Best-effort startup updates.
//!
//! Includes:
//! - `pip`: upgrades the downloader package through `python -m pip`.
//! - `self_update`: replaces the installed binary from a configured URL.
//!
//! Neither operation returns an error; failures become `UpdateOutcome::Failed`
//! so the caller can log them and carry on.

mod pip;
mod self_update;

pub use pip::*;
pub use self_update::*;

use std::fmt;

/// Result of one advisory update step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Something was installed; a restart may be needed.
    Updated,
    UpToDate,
    /// Nothing to do (e.g. no update URL configured).
    Skipped,
    Failed(String),
}

impl UpdateOutcome {
    #[cfg(test)]
    pub fn is_failure(&self) -> bool {
        matches!(self, UpdateOutcome::Failed(_))
    }
}

impl fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateOutcome::Updated => f.write_str("updated"),
            UpdateOutcome::UpToDate => f.write_str("up to date"),
            UpdateOutcome::Skipped => f.write_str("skipped"),
            UpdateOutcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}
