//! Staged file tree
//!
//! Generators never touch the filesystem directly. They read through and
//! write into a [`Tree`], which keeps pending writes and deletes in memory
//! until [`Tree::commit`] applies them. Reads see staged content first and
//! fall back to the files already on disk under the tree's root.

use crate::error::{Error, Result};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;
use tracing::debug;
use walkdir::WalkDir;

/// Directories never scanned when listing files
const IGNORED_DIRS: &[&str] = &["node_modules", ".git", "dist", "tmp"];

#[derive(Debug, Clone)]
enum Staged {
    Write(Vec<u8>),
    Delete,
}

/// Kind of change a staged path represents relative to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileChangeKind {
    Create,
    Update,
    Delete,
}

/// A pending (or committed) change to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: Utf8PathBuf,
    pub kind: FileChangeKind,
}

/// In-memory staging area for one workspace
#[derive(Debug)]
pub struct Tree {
    root: Utf8PathBuf,
    staged: BTreeMap<Utf8PathBuf, Staged>,
    /// First-touch order of staged paths
    order: Vec<Utf8PathBuf>,
}

impl Tree {
    /// Create an empty staging tree over `root`
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root: root.into(),
            staged: BTreeMap::new(),
            order: Vec::new(),
        }
    }

    /// Directory the tree is rooted at
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Normalize a workspace-relative path
    ///
    /// Strips `.` components and rejects absolute paths, `..` and empty paths.
    pub fn normalize(path: impl AsRef<Utf8Path>) -> Result<Utf8PathBuf> {
        let path = path.as_ref();
        let mut normalized = Utf8PathBuf::new();

        for component in path.components() {
            match component {
                Utf8Component::Normal(part) => normalized.push(part),
                Utf8Component::CurDir => {}
                _ => return Err(Error::invalid_path(path.as_str())),
            }
        }

        if normalized.as_str().is_empty() {
            return Err(Error::invalid_path(path.as_str()));
        }

        Ok(normalized)
    }

    /// Read a file's bytes, staged content first
    pub fn read(&self, path: impl AsRef<Utf8Path>) -> Result<Option<Vec<u8>>> {
        let path = Self::normalize(path)?;

        match self.staged.get(&path) {
            Some(Staged::Write(content)) => Ok(Some(content.clone())),
            Some(Staged::Delete) => Ok(None),
            None => {
                let disk_path = self.root.join(&path);
                if disk_path.is_file() {
                    Ok(Some(std::fs::read(&disk_path)?))
                } else {
                    Ok(None)
                }
            }
        }
    }

    /// Read a file as UTF-8
    pub fn read_to_string(&self, path: impl AsRef<Utf8Path>) -> Result<Option<String>> {
        let path = path.as_ref();
        match self.read(path)? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| Error::invalid_path(format!("{} (not valid UTF-8)", path))),
            None => Ok(None),
        }
    }

    /// Whether a file is visible in the tree
    pub fn exists(&self, path: impl AsRef<Utf8Path>) -> bool {
        let Ok(path) = Self::normalize(path) else {
            return false;
        };

        match self.staged.get(&path) {
            Some(Staged::Write(_)) => true,
            Some(Staged::Delete) => false,
            None => self.root.join(&path).is_file(),
        }
    }

    /// Stage a write
    pub fn write(&mut self, path: impl AsRef<Utf8Path>, content: impl Into<Vec<u8>>) -> Result<()> {
        let path = Self::normalize(path)?;
        debug!("Staging write: {}", path);
        self.stage(path, Staged::Write(content.into()));
        Ok(())
    }

    /// Stage a delete
    pub fn delete(&mut self, path: impl AsRef<Utf8Path>) -> Result<()> {
        let path = Self::normalize(path)?;
        debug!("Staging delete: {}", path);
        self.stage(path, Staged::Delete);
        Ok(())
    }

    fn stage(&mut self, path: Utf8PathBuf, change: Staged) {
        if !self.staged.contains_key(&path) {
            self.order.push(path.clone());
        }
        self.staged.insert(path, change);
    }

    /// Paths with staged writes, in first-touch order
    pub fn staged_writes(&self) -> Vec<Utf8PathBuf> {
        self.order
            .iter()
            .filter(|p| matches!(self.staged.get(*p), Some(Staged::Write(_))))
            .cloned()
            .collect()
    }

    /// All files visible in the tree under `dir`, sorted
    pub fn files_under(&self, dir: impl AsRef<Utf8Path>) -> Result<Vec<Utf8PathBuf>> {
        let dir = dir.as_ref();
        let prefix = if dir.as_str().is_empty() || dir == "." {
            Utf8PathBuf::new()
        } else {
            Self::normalize(dir)?
        };

        let mut files = std::collections::BTreeSet::new();

        let disk_dir = self.root.join(&prefix);
        if disk_dir.is_dir() {
            let walker = WalkDir::new(&disk_dir).into_iter().filter_entry(|entry| {
                entry.depth() == 0
                    || !IGNORED_DIRS.contains(&entry.file_name().to_string_lossy().as_ref())
            });

            for entry in walker {
                let entry = entry.map_err(|e| Error::Io(e.into()))?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let Some(relative) = entry
                    .path()
                    .strip_prefix(self.root.as_std_path())
                    .ok()
                    .and_then(|p| Utf8Path::from_path(p))
                else {
                    continue;
                };
                files.insert(relative.to_owned());
            }
        }

        for (path, change) in &self.staged {
            if !path.starts_with(&prefix) {
                continue;
            }
            match change {
                Staged::Write(_) => {
                    files.insert(path.clone());
                }
                Staged::Delete => {
                    files.remove(path);
                }
            }
        }

        Ok(files.into_iter().collect())
    }

    /// Describe pending changes relative to disk, in first-touch order
    pub fn list_changes(&self) -> Vec<FileChange> {
        self.order
            .iter()
            .filter_map(|path| {
                let on_disk = self.root.join(path).is_file();
                let kind = match self.staged.get(path)? {
                    Staged::Write(_) if on_disk => FileChangeKind::Update,
                    Staged::Write(_) => FileChangeKind::Create,
                    Staged::Delete if on_disk => FileChangeKind::Delete,
                    Staged::Delete => return None,
                };
                Some(FileChange {
                    path: path.clone(),
                    kind,
                })
            })
            .collect()
    }

    /// Apply all staged changes to disk and clear the staging area
    pub fn commit(&mut self) -> Result<Vec<FileChange>> {
        let changes = self.list_changes();

        for change in &changes {
            let full_path = self.root.join(&change.path);
            match (change.kind, self.staged.get(&change.path)) {
                (FileChangeKind::Delete, _) => {
                    std::fs::remove_file(&full_path)?;
                }
                (_, Some(Staged::Write(content))) => {
                    if let Some(parent) = full_path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&full_path, content)?;
                }
                _ => {}
            }
            debug!("Committed {:?}: {}", change.kind, change.path);
        }

        self.staged.clear();
        self.order.clear();
        Ok(changes)
    }
}
