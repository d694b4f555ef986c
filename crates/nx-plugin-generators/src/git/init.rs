//! Repository initialization for a freshly generated workspace

use super::config::configure_user;
use crate::error::{Error, Result};
use camino::Utf8Path;
use nx_plugin_core::types::{CommitOptions, GitWorkflowConfig};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Options for initializing a git repository
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Branch created by `git init`
    pub branch: String,
    /// Author and message of the initial commit
    pub commit: CommitOptions,
}

impl InitOptions {
    /// Effective initial commit message, falling back to the git workflow config
    pub fn effective_commit_message(&self, git_config: &GitWorkflowConfig) -> String {
        self.commit
            .message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| git_config.initial_commit_message.clone())
    }
}

/// What [`init_repository`] ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// New repository created
    Initialized,
    /// Directory already belongs to a work tree; nothing was done
    AlreadyInRepository,
}

/// Initialize a git repository for a new workspace
///
/// Skipped when `path` is already inside a work tree. Otherwise runs
/// `git init` on the requested branch, applies commit author overrides to
/// the repository config, stages everything and creates the initial commit.
pub async fn init_repository(
    path: &Utf8Path,
    options: &InitOptions,
    git_config: &GitWorkflowConfig,
) -> Result<InitOutcome> {
    info!("Initializing git repository at: {}", path);

    check_git_available().await?;

    if !path.is_dir() {
        return Err(Error::file_not_found(path.as_str()));
    }

    if is_inside_work_tree(path).await? {
        warn!("{} is already inside a git repository, skipping git init", path);
        return Ok(InitOutcome::AlreadyInRepository);
    }

    debug!("Running: git init --initial-branch {}", options.branch);
    run_git(path, &["init", "--initial-branch", &options.branch], "git init").await?;

    configure_user(
        path,
        options.commit.name.as_deref(),
        options.commit.email.as_deref(),
    )
    .await?;

    let message = options.effective_commit_message(git_config);
    create_initial_commit(path, &message).await?;

    Ok(InitOutcome::Initialized)
}

/// Whether `path` is inside an existing git work tree
pub async fn is_inside_work_tree(path: &Utf8Path) -> Result<bool> {
    let output = Command::new("git")
        .current_dir(path)
        .args(["rev-parse", "--is-inside-work-tree"])
        .output()
        .await?;

    Ok(output.status.success() && String::from_utf8_lossy(&output.stdout).trim() == "true")
}

async fn create_initial_commit(path: &Utf8Path, message: &str) -> Result<()> {
    debug!("Creating initial commit");
    run_git(path, &["add", "-A"], "git add").await?;
    run_git(path, &["commit", "--no-verify", "-m", message], "git commit").await?;
    info!("Initial commit created");
    Ok(())
}

async fn run_git(path: &Utf8Path, args: &[&str], what: &str) -> Result<()> {
    let output = Command::new("git")
        .current_dir(path)
        .args(args)
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::git_operation(format!(
            "{} failed: {}",
            what,
            stderr.trim()
        )));
    }

    Ok(())
}

/// Check if git is available in PATH
async fn check_git_available() -> Result<()> {
    let output = Command::new("git")
        .arg("--version")
        .output()
        .await
        .map_err(|_| Error::GitNotFound)?;

    if !output.status.success() {
        return Err(Error::GitNotFound);
    }

    Ok(())
}
