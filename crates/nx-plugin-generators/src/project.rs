//! Project discovery and registration
//!
//! A project is any directory holding a `project.json`. Its name comes from
//! that file; its package name, when it has one, from the `package.json`
//! next to it.

use crate::error::{Error, Result};
use crate::json::{read_json, write_json};
use crate::manifest::PACKAGE_JSON;
use crate::tree::Tree;
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use tracing::debug;

/// File that marks a project root
pub const PROJECT_JSON: &str = "project.json";

/// A project found in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub name: String,
    /// Workspace-relative root, `.` for the root project
    pub root: String,
    pub package_name: Option<String>,
}

impl ProjectInfo {
    /// Name the project is published under, falling back to its project name
    pub fn import_name(&self) -> &str {
        self.package_name.as_deref().unwrap_or(&self.name)
    }
}

/// All projects visible in the tree
pub fn projects(tree: &Tree) -> Result<Vec<ProjectInfo>> {
    let mut found = Vec::new();

    for path in tree.files_under("")? {
        if path.file_name() != Some(PROJECT_JSON) {
            continue;
        }

        let config: Value = read_json(tree, &path)?;
        let root = root_of(&path);

        let Some(name) = config.get("name").and_then(Value::as_str) else {
            debug!("Skipping unnamed project at {}", root);
            continue;
        };

        let package_name = package_name_at(tree, &root)?;
        found.push(ProjectInfo {
            name: name.to_string(),
            root,
            package_name,
        });
    }

    Ok(found)
}

/// Find a project by project name or by package name
pub fn find_project(tree: &Tree, name: &str) -> Result<Option<ProjectInfo>> {
    let projects = projects(tree)?;

    let by_name = projects.iter().find(|p| p.name == name);
    let found = by_name.or_else(|| {
        projects
            .iter()
            .find(|p| p.package_name.as_deref() == Some(name))
    });

    Ok(found.cloned())
}

/// Stage a new project's configuration
///
/// Fails if any project with the same name already exists.
pub fn add_project_configuration(tree: &mut Tree, root: &str, config: &Value) -> Result<()> {
    let name = config
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::unexpected_json(PROJECT_JSON, "project configuration has no name"))?;

    if let Some(existing) = projects(tree)?.into_iter().find(|p| p.name == name) {
        return Err(Error::project_exists(name, existing.root));
    }

    write_json(tree, join_root(root, PROJECT_JSON), config)
}

/// Join a path onto a project root, treating `.` as the workspace root
pub fn join_root(root: &str, path: &str) -> String {
    if root == "." || root.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", root.trim_end_matches('/'), path)
    }
}

/// Relative path from a project root back to the workspace root
///
/// Always ends with `/`: `.` gives `./`, `packages/tools` gives `../../`.
pub fn offset_from_root(root: &str) -> String {
    let depth = Utf8Path::new(root)
        .components()
        .filter(|c| matches!(c, camino::Utf8Component::Normal(_)))
        .count();

    if depth == 0 {
        "./".to_string()
    } else {
        "../".repeat(depth)
    }
}

fn root_of(project_json: &Utf8Path) -> String {
    match project_json.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent.to_string(),
        _ => ".".to_string(),
    }
}

fn package_name_at(tree: &Tree, root: &str) -> Result<Option<String>> {
    let manifest = Utf8PathBuf::from(join_root(root, PACKAGE_JSON));
    if !tree.exists(&manifest) {
        return Ok(None);
    }

    let json: Value = read_json(tree, &manifest)?;
    Ok(json.get("name").and_then(Value::as_str).map(str::to_string))
}
