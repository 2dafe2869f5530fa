//! First-run configuration bootstrap

use std::{fs, path::Path};

use tracing::{debug, info};

use crate::error::Result;

/// Bundled default configuration document
pub const DEFAULT_CONFIG: &str = include_str!("../assets/noportal.conf");

/// Write the bundled default configuration to `path` if nothing is there yet
///
/// Parent directories are created as needed. An existing file is never
/// touched, whatever its contents.
///
/// # Returns
/// `true` if the default was written, `false` if a file already existed
pub fn ensure_config(path: &Path) -> Result<bool> {
    if path.exists() {
        debug!(path = %path.display(), "Using existing configuration");
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, DEFAULT_CONFIG)?;

    info!(path = %path.display(), "Wrote default configuration");
    Ok(true)
}
