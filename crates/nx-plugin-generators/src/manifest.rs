//! Root package.json manipulation

use crate::error::{Error, Result};
use crate::json::{object_entry, root_object, update_json};
use crate::tree::Tree;
use serde_json::{Map, Value};
use tracing::debug;

/// Path of the workspace manifest
pub const PACKAGE_JSON: &str = "package.json";

/// Outcome of moving a dependency between dependency maps
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyMove {
    /// Entry moved from `dependencies` to `devDependencies`
    Moved { version: String },
    /// Entry was already only in `devDependencies`
    AlreadyDev,
}

/// Add entries to `dependencies` and `devDependencies`
///
/// Existing entries are left alone. Returns whether anything was added, which
/// callers use to decide whether an install is needed.
pub fn add_dependencies(
    tree: &mut Tree,
    dependencies: &[(&str, &str)],
    dev_dependencies: &[(&str, &str)],
) -> Result<bool> {
    let mut changed = false;

    update_json(tree, PACKAGE_JSON, |mut json| {
        let root = root_object(&mut json, PACKAGE_JSON)?;

        let deps = object_entry(root, "dependencies", PACKAGE_JSON)?;
        changed |= insert_missing(deps, dependencies);

        let dev_deps = object_entry(root, "devDependencies", PACKAGE_JSON)?;
        changed |= insert_missing(dev_deps, dev_dependencies);

        Ok(json)
    })?;

    Ok(changed)
}

fn insert_missing(map: &mut Map<String, Value>, entries: &[(&str, &str)]) -> bool {
    let mut changed = false;
    for (name, version) in entries {
        if !map.contains_key(*name) {
            map.insert(name.to_string(), Value::String(version.to_string()));
            changed = true;
        }
    }
    changed
}

/// Move `package` from `dependencies` to `devDependencies`
///
/// A package already present only in `devDependencies` is left as is. A
/// package present in neither map is an error.
pub fn move_to_dev_dependencies(tree: &mut Tree, package: &str) -> Result<DependencyMove> {
    let mut outcome = DependencyMove::AlreadyDev;

    update_json(tree, PACKAGE_JSON, |mut json| {
        let root = root_object(&mut json, PACKAGE_JSON)?;

        let removed = object_entry(root, "dependencies", PACKAGE_JSON)?.remove(package);
        let dev_deps = object_entry(root, "devDependencies", PACKAGE_JSON)?;

        match removed {
            Some(version) => {
                let version = version
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| version.to_string());
                dev_deps.insert(package.to_string(), Value::String(version.clone()));
                outcome = DependencyMove::Moved { version };
            }
            None if dev_deps.contains_key(package) => {
                debug!("{} already in devDependencies", package);
            }
            None => return Err(Error::missing_dependency(package, PACKAGE_JSON)),
        }

        Ok(json)
    })?;

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{read_json, write_json};
    use serde_json::json;
    use tempfile::TempDir;

    fn tree_with(manifest: Value) -> (Tree, TempDir) {
        let temp = TempDir::new().unwrap();
        let mut tree = Tree::new(camino::Utf8PathBuf::from_path_buf(temp.path().into()).unwrap());
        write_json(&mut tree, PACKAGE_JSON, &manifest).unwrap();
        (tree, temp)
    }

    #[test]
    fn test_move_from_dependencies() {
        let (mut tree, _temp) = tree_with(json!({
            "dependencies": {"@nrwl/nx-plugin": "15.8.0", "tslib": "^2.3.0"},
            "devDependencies": {"nx": "15.8.0"}
        }));

        let outcome = move_to_dev_dependencies(&mut tree, "@nrwl/nx-plugin").unwrap();
        assert_eq!(
            outcome,
            DependencyMove::Moved {
                version: "15.8.0".to_string()
            }
        );

        let json: Value = read_json(&tree, PACKAGE_JSON).unwrap();
        assert!(json["dependencies"].get("@nrwl/nx-plugin").is_none());
        assert_eq!(json["dependencies"]["tslib"], "^2.3.0");
        assert_eq!(json["devDependencies"]["@nrwl/nx-plugin"], "15.8.0");
    }

    #[test]
    fn test_move_creates_dev_dependencies_map() {
        let (mut tree, _temp) = tree_with(json!({
            "dependencies": {"@nrwl/nx-plugin": "15.8.0"}
        }));

        move_to_dev_dependencies(&mut tree, "@nrwl/nx-plugin").unwrap();
        let json: Value = read_json(&tree, PACKAGE_JSON).unwrap();
        assert_eq!(json["devDependencies"]["@nrwl/nx-plugin"], "15.8.0");
    }

    #[test]
    fn test_move_is_noop_when_already_dev() {
        let (mut tree, _temp) = tree_with(json!({
            "dependencies": {},
            "devDependencies": {"@nrwl/nx-plugin": "15.8.0"}
        }));

        let outcome = move_to_dev_dependencies(&mut tree, "@nrwl/nx-plugin").unwrap();
        assert_eq!(outcome, DependencyMove::AlreadyDev);
    }

    #[test]
    fn test_move_missing_everywhere_is_error() {
        let (mut tree, _temp) = tree_with(json!({"dependencies": {}}));

        let err = move_to_dev_dependencies(&mut tree, "@nrwl/nx-plugin").unwrap_err();
        assert!(matches!(err, Error::MissingDependency { .. }));
    }

    #[test]
    fn test_add_dependencies_reports_changes() {
        let (mut tree, _temp) = tree_with(json!({"dependencies": {"tslib": "^2.3.0"}}));

        assert!(add_dependencies(&mut tree, &[("@nrwl/devkit", "15.8.0")], &[]).unwrap());
        assert!(!add_dependencies(&mut tree, &[("tslib", "^2.5.0")], &[]).unwrap());
        let json: Value = read_json(&tree, PACKAGE_JSON).unwrap();
        assert_eq!(json["dependencies"]["tslib"], "^2.3.0");
    }
}
