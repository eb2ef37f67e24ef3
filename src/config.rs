//! Session configuration.
//!
//! Built once at startup from defaults, an optional `.env` file and
//! `POCKERDNL_*` environment variables, then passed by reference to every
//! component that needs it. Nothing mutates it afterwards.

use crate::error::{AppError, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_DOWNLOAD_DIR: &str = "/sdcard/Download";
pub const DEFAULT_DOWNLOADER: &str = "yt-dlp";
pub const DEFAULT_TRANSCODER: &str = "ffmpeg";
pub const DEFAULT_PYTHON: &str = "python3";

pub const SAWERIA_URL: &str = "https://saweria.co/akbaraaja";
pub const TRAKTEER_URL: &str = "https://trakteer.id/akbaraaja";

const ENV_DOWNLOAD_DIR: &str = "POCKERDNL_DOWNLOAD_DIR";
const ENV_DOWNLOADER: &str = "POCKERDNL_DOWNLOADER";
const ENV_TRANSCODER: &str = "POCKERDNL_TRANSCODER";
const ENV_PYTHON: &str = "POCKERDNL_PYTHON";
const ENV_UPDATE_URL: &str = "POCKERDNL_UPDATE_URL";
const ENV_LOG_DIR: &str = "POCKERDNL_LOG_DIR";

/// Read-only settings shared by the whole session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory the downloader writes every artifact into.
    pub download_dir: PathBuf,
    /// Media downloader executable.
    pub downloader: String,
    /// Transcoder executable; only probed, never run directly.
    pub transcoder: String,
    /// Interpreter used for `-m pip` upgrades of the downloader.
    pub python: String,
    /// Raw URL serving the latest build. Empty disables self-update.
    pub update_url: String,
    /// Donation link shown on the support screen.
    pub saweria_url: String,
    /// Second donation link shown on the support screen.
    pub trakteer_url: String,
    /// When set, tracing output goes to a rolling file here instead of stderr.
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
            downloader: DEFAULT_DOWNLOADER.to_string(),
            transcoder: DEFAULT_TRANSCODER.to_string(),
            python: DEFAULT_PYTHON.to_string(),
            update_url: String::new(),
            saweria_url: SAWERIA_URL.to_string(),
            trakteer_url: TRAKTEER_URL.to_string(),
            log_dir: None,
        }
    }
}

impl Config {
    /// Loads `.env` (if any) and overlays `POCKERDNL_*` variables on the defaults.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_env()
    }

    /// Overlays `POCKERDNL_*` variables on the defaults without touching `.env`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(dir) = read_var(ENV_DOWNLOAD_DIR)? {
            config.download_dir = PathBuf::from(dir);
        }
        if let Some(cmd) = read_var(ENV_DOWNLOADER)? {
            config.downloader = cmd;
        }
        if let Some(cmd) = read_var(ENV_TRANSCODER)? {
            config.transcoder = cmd;
        }
        if let Some(cmd) = read_var(ENV_PYTHON)? {
            config.python = cmd;
        }
        if let Some(url) = read_var(ENV_UPDATE_URL)? {
            config.update_url = url;
        }
        config.log_dir = read_var(ENV_LOG_DIR)?.map(PathBuf::from);

        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Creates the download directory (and parents) if it does not exist yet.
    pub fn ensure_download_dir(&self) -> Result<&Path> {
        fs::create_dir_all(&self.download_dir).map_err(|e| {
            AppError::Config(format!(
                "cannot create download directory {}: {}",
                self.download_dir.display(),
                e
            ))
        })?;
        info!("Download directory ready: {}", self.download_dir.display());
        Ok(&self.download_dir)
    }
}

/// Returns `None` for unset or blank variables; non-unicode values are errors.
fn read_var(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_vars() {
        for key in [
            ENV_DOWNLOAD_DIR,
            ENV_DOWNLOADER,
            ENV_TRANSCODER,
            ENV_PYTHON,
            ENV_UPDATE_URL,
            ENV_LOG_DIR,
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        clear_vars();
        let config = Config::from_env().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.download_dir, PathBuf::from("/sdcard/Download"));
        assert_eq!(config.downloader, "yt-dlp");
        assert_eq!(config.transcoder, "ffmpeg");
        assert!(config.update_url.is_empty());
        assert!(config.log_dir.is_none());
        assert_eq!(config.saweria_url, SAWERIA_URL);
        assert_eq!(config.trakteer_url, TRAKTEER_URL);
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_vars();
        env::set_var(ENV_DOWNLOAD_DIR, "/tmp/media");
        env::set_var(ENV_DOWNLOADER, "youtube-dl");
        env::set_var(ENV_UPDATE_URL, " https://example.com/pockerdnl ");
        env::set_var(ENV_LOG_DIR, "/tmp/logs");

        let config = Config::from_env().unwrap();
        clear_vars();

        assert_eq!(config.download_dir, PathBuf::from("/tmp/media"));
        assert_eq!(config.downloader, "youtube-dl");
        assert_eq!(config.transcoder, "ffmpeg");
        assert_eq!(config.update_url, "https://example.com/pockerdnl");
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/logs")));
    }

    #[test]
    #[serial]
    fn test_blank_values_fall_back_to_defaults() {
        clear_vars();
        env::set_var(ENV_DOWNLOADER, "   ");
        let config = Config::from_env().unwrap();
        clear_vars();
        assert_eq!(config.downloader, "yt-dlp");
    }

    #[test]
    fn test_ensure_download_dir_creates_parents() {
        let root = env::temp_dir().join(format!("pockerdnl-cfg-{}", std::process::id()));
        let config = Config {
            download_dir: root.join("nested").join("Download"),
            ..Config::default()
        };
        let dir = config.ensure_download_dir().unwrap();
        assert!(dir.is_dir());
        fs::remove_dir_all(&root).unwrap();
    }
}
