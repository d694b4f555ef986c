//! Package installation as a deferred task

use crate::error::{Error, Result};
use crate::manifest::PACKAGE_JSON;
use crate::tasks::DeferredTask;
use camino::{Utf8Path, Utf8PathBuf};
use nx_plugin_core::types::PackageManager;
use std::collections::HashMap;
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use tokio::process::Command;
use tracing::{debug, info};

/// Remembers the manifest each workspace was last installed with
///
/// Several generators in one run each hand back an install task. Only the
/// first one that sees a changed `package.json` actually runs the package
/// manager; the rest find the manifest already installed and return early.
#[derive(Debug, Clone, Default)]
pub struct InstallTracker {
    installed: Arc<Mutex<HashMap<Utf8PathBuf, String>>>,
}

impl InstallTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `manifest` differs from what was last installed in `root`
    pub fn needs_install(&self, root: &Utf8Path, manifest: &str) -> bool {
        self.installed
            .lock()
            .map(|installed| installed.get(root).map(String::as_str) != Some(manifest))
            .unwrap_or(true)
    }

    /// Record a successful install
    pub fn record(&self, root: &Utf8Path, manifest: String) {
        if let Ok(mut installed) = self.installed.lock() {
            installed.insert(root.to_owned(), manifest);
        }
    }
}

/// Build a task that installs the workspace's packages
///
/// The manifest is read when the task runs, so it sees the committed tree.
pub fn install_packages_task(
    name: impl Into<String>,
    root: Utf8PathBuf,
    package_manager: PackageManager,
    tracker: InstallTracker,
) -> DeferredTask {
    let name = name.into();
    let task_name = name.clone();
    DeferredTask::new(task_name, move || async move {
        install_packages(&name, &root, package_manager, &tracker).await
    })
}

async fn install_packages(
    task: &str,
    root: &Utf8Path,
    package_manager: PackageManager,
    tracker: &InstallTracker,
) -> Result<()> {
    let manifest_path = root.join(PACKAGE_JSON);
    let manifest = tokio::fs::read_to_string(&manifest_path)
        .await
        .map_err(|_| Error::file_not_found(manifest_path.as_str()))?;

    if !tracker.needs_install(root, &manifest) {
        debug!("{} unchanged since last install, skipping", manifest_path);
        return Ok(());
    }

    let program = which::which(package_manager.as_str())
        .map_err(|_| Error::command_not_found(package_manager.as_str()))?;

    let args = package_manager.install_args();
    info!("Installing packages with {} {}", package_manager, args.join(" "));

    let output = Command::new(program)
        .args(args)
        .current_dir(root)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::task_failed(
            task,
            format!(
                "{} install exited with {}: {}",
                package_manager,
                output.status,
                stderr.trim()
            ),
        ));
    }

    tracker.record(root, manifest);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn temp_root() -> (Utf8PathBuf, TempDir) {
        let temp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
        (root, temp)
    }

    #[test]
    fn test_tracker_detects_changes() {
        let tracker = InstallTracker::new();
        let root = Utf8Path::new("/ws");

        assert!(tracker.needs_install(root, "{}"));
        tracker.record(root, "{}".to_string());
        assert!(!tracker.needs_install(root, "{}"));
        assert!(tracker.needs_install(root, "{\"name\":\"x\"}"));
        assert!(tracker.needs_install(Utf8Path::new("/other"), "{}"));
    }

    #[tokio::test]
    async fn test_unchanged_manifest_skips_install() {
        let (root, _temp) = temp_root();
        std::fs::write(root.join(PACKAGE_JSON), "{}").unwrap();

        let tracker = InstallTracker::new();
        tracker.record(&root, "{}".to_string());

        let task = install_packages_task("install", root, PackageManager::Npm, tracker);
        task.run().await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_manifest_fails() {
        let (root, _temp) = temp_root();
        let task = install_packages_task("install", root, PackageManager::Npm, InstallTracker::new());

        let err = task.run().await.unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[tokio::test]
    #[serial]
    async fn test_missing_package_manager_fails() {
        let (root, _temp) = temp_root();
        std::fs::write(root.join(PACKAGE_JSON), "{}").unwrap();

        let original = std::env::var_os("PATH");
        std::env::set_var("PATH", root.as_str());

        let task = install_packages_task("install", root.clone(), PackageManager::Pnpm, InstallTracker::new());
        let result = task.run().await;

        match original {
            Some(path) => std::env::set_var("PATH", path),
            None => std::env::remove_var("PATH"),
        }

        assert!(matches!(result, Err(Error::CommandNotFound { .. })));
    }
}
