//! Integration tests for the preset generator pipeline
//!
//! Each test stages a minimal workspace on disk, runs the preset against it
//! and inspects the staged (or committed) result.

use camino::Utf8PathBuf;
use nx_plugin_core::types::{CreatorConfig, PackageManager, PresetSchema};
use nx_plugin_generators::generators::{preset_generator, GeneratorContext};
use nx_plugin_generators::json::read_json;
use nx_plugin_generators::{Error, Tree};
use serde_json::{json, Value};
use tempfile::TempDir;

fn workspace(nx_json: Value) -> (Tree, TempDir) {
    let temp = TempDir::new().unwrap();
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();

    let manifest = json!({
        "name": "tools",
        "version": "0.0.0",
        "private": true,
        "dependencies": {"@nrwl/nx-plugin": "15.8.0"},
        "devDependencies": {"nx": "15.8.0"}
    });
    std::fs::write(root.join("package.json"), manifest.to_string()).unwrap();
    std::fs::write(root.join("nx.json"), nx_json.to_string()).unwrap();

    (Tree::new(root), temp)
}

fn context() -> GeneratorContext {
    GeneratorContext::new(PackageManager::Npm, &CreatorConfig::default()).unwrap()
}

#[test]
fn test_scoped_plugin_default_cli_name() {
    let (mut tree, _temp) = workspace(json!({"npmScope": "acme"}));
    let ctx = context();

    let tasks = preset_generator(&mut tree, &PresetSchema::new("@acme/tools", None), &ctx).unwrap();

    assert_eq!(
        tasks.names(),
        vec![
            "install packages for tools",
            "install packages for create-acme-tools-package"
        ]
    );

    let project: Value = read_json(&tree, "project.json").unwrap();
    assert_eq!(project["name"], "tools");
    assert_eq!(project["targets"]["build"]["executor"], "@nrwl/js:tsc");

    let manifest: Value = read_json(&tree, "package.json").unwrap();
    assert_eq!(manifest["name"], "@acme/tools");
    assert_eq!(manifest["generators"], "./generators.json");

    let cli: Value = read_json(&tree, "packages/create-acme-tools-package/package.json").unwrap();
    assert_eq!(cli["name"], "create-acme-tools-package");
    assert_eq!(cli["bin"]["create-acme-tools-package"], "./bin/index.js");

    let cli_project: Value =
        read_json(&tree, "packages/create-acme-tools-package/project.json").unwrap();
    assert_eq!(cli_project["implicitDependencies"], json!(["tools"]));

    let bin = tree
        .read_to_string("packages/create-acme-tools-package/bin/index.ts")
        .unwrap()
        .unwrap();
    assert!(bin.contains("createWorkspace(`@acme/tools@${presetVersion}`"));
}

#[test]
fn test_unscoped_plugin_default_cli_name() {
    let (mut tree, _temp) = workspace(json!({}));
    let ctx = context();

    preset_generator(&mut tree, &PresetSchema::new("tools", None), &ctx).unwrap();

    let cli: Value = read_json(&tree, "packages/create-tools-package/package.json").unwrap();
    assert_eq!(cli["name"], "create-tools-package");
}

#[test]
fn test_explicit_cli_name_used_verbatim() {
    let (mut tree, _temp) = workspace(json!({"npmScope": "tools"}));
    let ctx = context();

    let schema = PresetSchema::new("@acme/tools", Some("@acme/create-tools".to_string()));
    let tasks = preset_generator(&mut tree, &schema, &ctx).unwrap();

    let cli: Value = read_json(&tree, "packages/acme-create-tools/package.json").unwrap();
    assert_eq!(cli["name"], "@acme/create-tools");
    assert_eq!(cli["bin"]["create-tools"], "./bin/index.js");
    assert_eq!(tasks.names()[1], "install packages for acme-create-tools");

    let base: Value = read_json(&tree, "tsconfig.base.json").unwrap();
    assert_eq!(
        base["compilerOptions"]["paths"]["@acme/create-tools"],
        json!(["packages/acme-create-tools/bin/index.ts"])
    );
}

#[test]
fn test_devkit_moved_to_dev_dependencies() {
    let (mut tree, _temp) = workspace(json!({}));
    let ctx = context();

    preset_generator(&mut tree, &PresetSchema::new("tools", None), &ctx).unwrap();

    let manifest: Value = read_json(&tree, "package.json").unwrap();
    assert!(manifest["dependencies"].get("@nrwl/nx-plugin").is_none());
    assert_eq!(manifest["devDependencies"]["@nrwl/nx-plugin"], "15.8.0");
    assert_eq!(manifest["dependencies"]["@nrwl/devkit"], "15.8.0");
    assert_eq!(manifest["dependencies"]["create-nx-workspace"], "15.8.0");
    assert_eq!(manifest["devDependencies"]["@nrwl/jest"], "15.8.0");
}

#[test]
fn test_npm_scope_removed_when_present() {
    let (mut tree, _temp) = workspace(json!({"npmScope": "acme", "affected": {"defaultBase": "main"}}));
    let ctx = context();

    preset_generator(&mut tree, &PresetSchema::new("tools", None), &ctx).unwrap();

    let nx_json: Value = read_json(&tree, "nx.json").unwrap();
    assert!(nx_json.get("npmScope").is_none());
    assert_eq!(nx_json["affected"]["defaultBase"], "main");
}

#[test]
fn test_npm_scope_absent_is_fine() {
    let (mut tree, _temp) = workspace(json!({}));
    let ctx = context();

    preset_generator(&mut tree, &PresetSchema::new("tools", None), &ctx).unwrap();

    let nx_json: Value = read_json(&tree, "nx.json").unwrap();
    assert!(nx_json.get("npmScope").is_none());
}

#[test]
fn test_staged_files_are_formatted() {
    let (mut tree, _temp) = workspace(json!({}));
    let ctx = context();

    preset_generator(&mut tree, &PresetSchema::new("tools", None), &ctx).unwrap();

    let raw = tree.read_to_string("package.json").unwrap().unwrap();
    assert!(raw.starts_with("{\n  \"name\""));
    assert!(raw.ends_with("}\n"));

    let readme = tree.read_to_string("README.md").unwrap().unwrap();
    assert!(readme.ends_with('\n') && !readme.ends_with("\n\n"));
}

#[test]
fn test_missing_devkit_aborts_without_touching_disk() {
    let (mut tree, _temp) = workspace(json!({"npmScope": "acme"}));
    let manifest_path = tree.root().join("package.json");
    std::fs::write(&manifest_path, json!({"name": "tools"}).to_string()).unwrap();
    let before = std::fs::read_to_string(&manifest_path).unwrap();
    let ctx = context();

    let err = preset_generator(&mut tree, &PresetSchema::new("tools", None), &ctx).unwrap_err();
    assert!(matches!(err, Error::MissingDependency { .. }));

    // Step 4 never ran and nothing was committed
    assert!(!tree.exists("packages/create-tools-package/package.json"));
    assert_eq!(std::fs::read_to_string(&manifest_path).unwrap(), before);
    assert!(!tree.root().join("project.json").exists());
}

#[test]
fn test_empty_plugin_name_rejected() {
    let (mut tree, _temp) = workspace(json!({}));
    let ctx = context();

    let err = preset_generator(&mut tree, &PresetSchema::new("", None), &ctx).unwrap_err();
    assert!(matches!(err, Error::Core(_)));
    assert!(tree.list_changes().is_empty());
}

#[test]
fn test_second_run_reports_existing_project() {
    let (mut tree, _temp) = workspace(json!({}));
    let ctx = context();

    preset_generator(&mut tree, &PresetSchema::new("tools", None), &ctx).unwrap();
    let err = preset_generator(&mut tree, &PresetSchema::new("tools", None), &ctx).unwrap_err();
    assert!(matches!(err, Error::ProjectExists { .. }));
}

#[tokio::test]
async fn test_tasks_run_after_commit() {
    let (mut tree, _temp) = workspace(json!({}));
    let ctx = context();

    let tasks = preset_generator(&mut tree, &PresetSchema::new("tools", None), &ctx).unwrap();
    tree.commit().unwrap();

    // Pretend the committed manifest is already installed so neither task
    // needs a package manager on PATH.
    let manifest = std::fs::read_to_string(tree.root().join("package.json")).unwrap();
    ctx.install_tracker.record(tree.root(), manifest);

    assert_eq!(tasks.len(), 2);
    tasks.run_serial().await.unwrap();
}
