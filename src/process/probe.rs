//! Executable lookup on the process search path.

#[cfg(test)]
use std::ffi::OsStr;
#[cfg(test)]
use std::path::Path;
use tracing::debug;

/// Returns whether `name` resolves to an executable on `PATH`.
pub fn is_available(name: &str) -> bool {
    let found = which::which(name);
    debug!("Probe for {}: {:?}", name, found);
    found.is_ok()
}

/// Same as [`is_available`] but searches `search_path` instead of `PATH`.
#[cfg(test)]
pub fn is_available_in<P: AsRef<OsStr>>(name: &str, search_path: P) -> bool {
    which::which_in(name, Some(search_path), Path::new(".")).is_ok()
}
