//! Git configuration management

use crate::error::{Error, Result};
use camino::Utf8Path;
use tokio::process::Command;
use tracing::{debug, info};

/// Configure the commit author in the repository config
///
/// Does nothing when neither name nor email is given.
pub async fn configure_user(path: &Utf8Path, name: Option<&str>, email: Option<&str>) -> Result<()> {
    if name.is_none() && email.is_none() {
        debug!("No git author overrides to apply");
        return Ok(());
    }

    if let Some(name) = name {
        set_local_value(path, "user.name", name).await?;
        info!("Git user name set to: {}", name);
    }

    if let Some(email) = email {
        set_local_value(path, "user.email", email).await?;
        info!("Git user email set to: {}", email);
    }

    Ok(())
}

/// Set a value in the repository's `.git/config`
async fn set_local_value(path: &Utf8Path, key: &str, value: &str) -> Result<()> {
    debug!("Setting git config: {} = {}", key, value);

    let output = Command::new("git")
        .current_dir(path)
        .args(["config", "--local", key, value])
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::git_operation(format!(
            "Failed to set {}: {}",
            key,
            stderr.trim()
        )));
    }

    Ok(())
}
