//! Workspace configuration (nx.json) manipulation

use crate::error::Result;
use crate::json::{root_object, update_json};
use crate::tree::Tree;

/// Path of the workspace configuration
pub const NX_JSON: &str = "nx.json";

/// Remove the workspace-wide npm scope
///
/// Returns the removed value, if there was one.
pub fn remove_npm_scope(tree: &mut Tree) -> Result<Option<String>> {
    let mut removed = None;

    update_json(tree, NX_JSON, |mut json| {
        removed = root_object(&mut json, NX_JSON)?
            .remove("npmScope")
            .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()));
        Ok(json)
    })?;

    if let Some(scope) = &removed {
        tracing::debug!("Removed npmScope '{}' from {}", scope, NX_JSON);
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::{read_json, write_json};
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn tree_with(nx_json: Value) -> (Tree, TempDir) {
        let temp = TempDir::new().unwrap();
        let mut tree = Tree::new(camino::Utf8PathBuf::from_path_buf(temp.path().into()).unwrap());
        write_json(&mut tree, NX_JSON, &nx_json).unwrap();
        (tree, temp)
    }

    #[test]
    fn test_remove_existing_scope() {
        let (mut tree, _temp) = tree_with(json!({"npmScope": "acme", "affected": {"defaultBase": "main"}}));

        assert_eq!(remove_npm_scope(&mut tree).unwrap().as_deref(), Some("acme"));

        let json: Value = read_json(&tree, NX_JSON).unwrap();
        assert!(json.get("npmScope").is_none());
        assert_eq!(json["affected"]["defaultBase"], "main");
    }

    #[test]
    fn test_remove_absent_scope() {
        let (mut tree, _temp) = tree_with(json!({"affected": {"defaultBase": "main"}}));

        assert_eq!(remove_npm_scope(&mut tree).unwrap(), None);
        let json: Value = read_json(&tree, NX_JSON).unwrap();
        assert!(json.get("npmScope").is_none());
    }
}
