//! Utility functions shared across the CLI

use anyhow::{anyhow, Context, Result};
use camino::Utf8PathBuf;

/// Current working directory as a UTF-8 path
pub fn current_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().context("Could not determine the current directory")?;
    Utf8PathBuf::from_path_buf(cwd)
        .map_err(|p| anyhow!("Current directory is not valid UTF-8: {}", p.display()))
}
