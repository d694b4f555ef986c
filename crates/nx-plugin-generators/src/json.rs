//! JSON helpers over the staged tree

use crate::error::{Error, Result};
use crate::tree::Tree;
use camino::Utf8Path;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Read and deserialize a JSON file from the tree
pub fn read_json<T: DeserializeOwned>(tree: &Tree, path: impl AsRef<Utf8Path>) -> Result<T> {
    let path = path.as_ref();
    let content = tree
        .read_to_string(path)?
        .ok_or_else(|| Error::file_not_found(path.as_str()))?;

    serde_json::from_str(&content).map_err(|source| Error::InvalidJson {
        path: path.to_string(),
        source,
    })
}

/// Serialize a value and stage it as a pretty-printed JSON file
pub fn write_json<T: Serialize>(tree: &mut Tree, path: impl AsRef<Utf8Path>, value: &T) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    tree.write(path, content)
}

/// Read a JSON file, transform it and stage the result
pub fn update_json<F>(tree: &mut Tree, path: impl AsRef<Utf8Path>, updater: F) -> Result<()>
where
    F: FnOnce(Value) -> Result<Value>,
{
    let path = path.as_ref();
    let value: Value = read_json(tree, path)?;
    let updated = updater(value)?;
    write_json(tree, path, &updated)
}

/// Borrow the object at `key`, creating an empty one when missing
pub fn object_entry<'a>(
    object: &'a mut Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a mut Map<String, Value>> {
    let entry = object
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));

    entry
        .as_object_mut()
        .ok_or_else(|| Error::unexpected_json(path, format!("'{}' is not an object", key)))
}

/// Borrow a JSON document's root object
pub fn root_object<'a>(value: &'a mut Value, path: &str) -> Result<&'a mut Map<String, Value>> {
    value
        .as_object_mut()
        .ok_or_else(|| Error::unexpected_json(path, "root is not an object"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_update_json_roundtrip() {
        let temp = TempDir::new().unwrap();
        let mut tree = Tree::new(camino::Utf8PathBuf::from_path_buf(temp.path().into()).unwrap());
        write_json(&mut tree, "nx.json", &json!({"npmScope": "acme"})).unwrap();

        update_json(&mut tree, "nx.json", |mut value| {
            root_object(&mut value, "nx.json")?.insert("extends".into(), json!("nx/presets/npm.json"));
            Ok(value)
        })
        .unwrap();

        let value: Value = read_json(&tree, "nx.json").unwrap();
        assert_eq!(value["npmScope"], "acme");
        assert_eq!(value["extends"], "nx/presets/npm.json");

        let raw = tree.read_to_string("nx.json").unwrap().unwrap();
        assert!(raw.ends_with("}\n"));
    }

    #[test]
    fn test_read_missing_file() {
        let temp = TempDir::new().unwrap();
        let tree = Tree::new(camino::Utf8PathBuf::from_path_buf(temp.path().into()).unwrap());
        let err = read_json::<Value>(&tree, "package.json").unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_read_invalid_json_names_file() {
        let temp = TempDir::new().unwrap();
        let mut tree = Tree::new(camino::Utf8PathBuf::from_path_buf(temp.path().into()).unwrap());
        tree.write("package.json", "{ not json").unwrap();

        let err = read_json::<Value>(&tree, "package.json").unwrap_err();
        assert!(err.to_string().contains("package.json"));
    }

    #[test]
    fn test_object_entry_rejects_non_object() {
        let mut value = json!({"dependencies": []});
        let root = root_object(&mut value, "package.json").unwrap();
        assert!(object_entry(root, "dependencies", "package.json").is_err());
        assert!(object_entry(root, "devDependencies", "package.json").is_ok());
    }
}
