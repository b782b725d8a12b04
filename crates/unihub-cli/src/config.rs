//! Configuration and path resolution for the CLI.
//!
//! The manifest is found in this order:
//! 1. `--manifest` flag
//! 2. `$UNIHUB_MANIFEST` environment variable
//! 3. `resources.json` in the platform data directory

use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Manifest file name inside the data directory
pub const MANIFEST_FILENAME: &str = "resources.json";

/// Environment variable overriding the manifest location
pub const MANIFEST_ENV: &str = "UNIHUB_MANIFEST";

/// Returns the platform data directory.
///
/// - macOS: `~/Library/Application Support/dev.unihub.UniHub/`
/// - Linux: `~/.local/share/unihub/`
/// - Windows: `%APPDATA%\unihub\UniHub\data\`
pub fn get_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("dev", "unihub", "UniHub")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| anyhow!("Could not determine data directory"))
}

/// Resolves the manifest path from the flag, then the environment, then the
/// data directory.
pub fn manifest_path(flag: Option<&Path>) -> Result<PathBuf> {
    resolve_manifest_path(flag, std::env::var_os(MANIFEST_ENV).map(PathBuf::from))
}

fn resolve_manifest_path(flag: Option<&Path>, env: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = env.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(path);
    }
    Ok(get_data_dir()?.join(MANIFEST_FILENAME))
}
