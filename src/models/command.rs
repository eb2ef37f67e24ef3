//! Assembles the downloader's command line from already-gathered choices.
//!
//! `CommandLine` is built once per request and never mutated afterwards;
//! it is handed to the runner and then dropped.

use crate::config::Config;
use crate::models::{DownloadRequest, Target, LIST_FORMATS_FLAG};
use std::fmt;

/// Metadata flags passed on every download.
pub const METADATA_FLAGS: [&str; 7] = [
    "--no-mtime",
    "--newline",
    "--write-info-json",
    "--write-thumbnail",
    "--embed-subs",
    "--embed-thumbnail",
    "--add-metadata",
];

/// An ordered argument vector: executable first, then its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine(Vec<String>);

impl CommandLine {
    /// Full download command for a request.
    ///
    /// Layout: downloader, `-o <dir>/<template>`, the metadata flags, the
    /// format fragment, then the target as the last argument.
    pub fn assemble(config: &Config, request: &DownloadRequest) -> Self {
        let output = config.download_dir.join(request.template.as_str());

        let mut args = Vec::with_capacity(METADATA_FLAGS.len() + 6);
        args.push(config.downloader.clone());
        args.push("-o".to_string());
        args.push(output.to_string_lossy().into_owned());
        args.extend(METADATA_FLAGS.iter().map(|f| f.to_string()));
        args.extend(request.format.fragment());
        args.push(request.target.as_arg());

        Self(args)
    }

    /// Dry-run command that only lists the formats available for a target.
    pub fn list_formats(config: &Config, target: &Target) -> Self {
        Self(vec![
            config.downloader.clone(),
            LIST_FORMATS_FLAG.to_string(),
            target.as_arg(),
        ])
    }

    /// Wraps an arbitrary argument vector (helper installs, tests).
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(args.into_iter().map(Into::into).collect())
    }

    pub fn program(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn args(&self) -> &[String] {
        self.0.get(1..).unwrap_or(&[])
    }

    #[cfg(test)]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Renders the command as it would be typed into a POSIX shell.
impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quoted: Vec<String> = self.0.iter().map(|a| shell_quote(a)).collect();
        f.write_str(&quoted.join(" "))
    }
}

/// Single-quotes an argument unless it only contains shell-safe characters.
fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./-_".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r#"'"'"'"#))
    }
}
