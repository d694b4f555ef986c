//! Plugin project generator

use super::files::{
    add_tooling_dependencies, lint_target, register_ts_path, test_target, write_eslintrc,
    write_jest_config, write_tsconfigs, ProjectLayout,
};
use super::GeneratorContext;
use crate::error::{Error, Result};
use crate::format::format_files;
use crate::install::install_packages_task;
use crate::json::{root_object, update_json, write_json};
use crate::manifest::{add_dependencies, PACKAGE_JSON};
use crate::names::file_name;
use crate::project::{add_project_configuration, offset_from_root};
use crate::tasks::DeferredTask;
use crate::templates::{PluginTemplateContext, PLUGIN_INDEX, PLUGIN_README};
use crate::tree::Tree;
use nx_plugin_core::types::PluginGeneratorSchema;
use serde_json::{json, Value};
use tracing::info;

/// Scaffold an Nx plugin project
///
/// The project lands at the workspace root for a root project, otherwise
/// under `packages/<name>`. Returns the task that installs the packages
/// the project added to the root manifest.
pub fn plugin_generator(
    tree: &mut Tree,
    schema: &PluginGeneratorSchema,
    ctx: &GeneratorContext,
) -> Result<DeferredTask> {
    let project_name = file_name(&schema.name);
    if project_name.is_empty() {
        return Err(Error::invalid_name(&schema.name, "plugin name has no usable characters"));
    }

    let project_name = project_name.as_str();
    let import_path = schema
        .import_path
        .clone()
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| project_name.to_string());

    let root = if schema.root_project {
        ".".to_string()
    } else {
        format!("packages/{}", project_name)
    };
    let offset = offset_from_root(&root);
    let layout = ProjectLayout {
        name: project_name,
        root: &root,
        offset: &offset,
        source_dir: "src",
    };

    info!("Generating plugin project {} at {}", project_name, root);

    add_project_configuration(tree, &root, &project_configuration(schema, &layout))?;
    write_package_json(tree, &layout, &import_path)?;

    let context = PluginTemplateContext {
        project_name: project_name.to_string(),
        import_path: import_path.clone(),
        output_path: layout.output_path(),
        unit_test_runner: if schema.unit_test_runner.is_enabled() {
            "jest".to_string()
        } else {
            "none".to_string()
        },
    };
    ctx.templates
        .render_to(tree, PLUGIN_README, layout.path("README.md"), &context)?;
    ctx.templates
        .render_to(tree, PLUGIN_INDEX, layout.main(), &context)?;

    write_json(tree, layout.path("generators.json"), &json!({"generators": {}}))?;
    write_json(tree, layout.path("executors.json"), &json!({"executors": {}}))?;

    if !schema.skip_ts_config {
        write_tsconfigs(tree, &layout, schema.unit_test_runner)?;
    }
    if schema.linter.is_enabled() {
        write_eslintrc(tree, &layout, !schema.skip_lint_checks, false)?;
    }
    if schema.unit_test_runner.is_enabled() {
        write_jest_config(tree, ctx, &layout)?;
    }

    if !layout.is_root() {
        register_ts_path(tree, &import_path, &layout.main())?;
    }

    add_dependencies(tree, &[("@nrwl/devkit", ctx.nx_version.as_str())], &[])?;
    add_tooling_dependencies(
        tree,
        ctx,
        schema.compiler,
        schema.linter,
        schema.unit_test_runner,
    )?;

    if !schema.skip_format {
        format_files(tree, &ctx.format)?;
    }

    Ok(install_packages_task(
        format!("install packages for {}", project_name),
        tree.root().to_owned(),
        ctx.package_manager,
        ctx.install_tracker.clone(),
    ))
}

fn project_configuration(schema: &PluginGeneratorSchema, layout: &ProjectLayout<'_>) -> Value {
    let mut targets = serde_json::Map::new();

    let asset_input = if layout.is_root() {
        ".".to_string()
    } else {
        format!("./{}", layout.root)
    };

    targets.insert(
        "build".to_string(),
        json!({
            "executor": schema.compiler.executor(),
            "outputs": ["{options.outputPath}"],
            "options": {
                "outputPath": layout.output_path(),
                "main": layout.main(),
                "tsConfig": layout.path("tsconfig.lib.json"),
                "assets": [
                    layout.path("*.md"),
                    {"input": format!("{}/src", asset_input), "glob": "**/!(*.ts)", "output": "./src"},
                    {"input": format!("{}/src", asset_input), "glob": "**/*.d.ts", "output": "./src"},
                    {"input": asset_input, "glob": "generators.json", "output": "."},
                    {"input": asset_input, "glob": "executors.json", "output": "."}
                ]
            }
        }),
    );

    if schema.linter.is_enabled() {
        targets.insert(
            "lint".to_string(),
            lint_target(vec![
                layout.path("**/*.ts"),
                layout.path("package.json"),
                layout.path("generators.json"),
                layout.path("executors.json"),
            ]),
        );
    }

    if schema.unit_test_runner.is_enabled() {
        targets.insert("test".to_string(), test_target(layout));
    }

    json!({
        "name": layout.name,
        "$schema": format!("{}node_modules/nx/schemas/project-schema.json", layout.offset),
        "sourceRoot": layout.path("src"),
        "projectType": "library",
        "targets": targets,
        "tags": []
    })
}

/// Stage the plugin's manifest
///
/// A root project shares the workspace manifest, so the plugin fields are
/// merged into it rather than written over it.
fn write_package_json(tree: &mut Tree, layout: &ProjectLayout<'_>, import_path: &str) -> Result<()> {
    let path = layout.path(PACKAGE_JSON);

    let fields = [
        ("name", json!(import_path)),
        ("version", json!("0.0.1")),
        ("main", json!("./src/index.js")),
        ("type", json!("commonjs")),
        ("generators", json!("./generators.json")),
        ("executors", json!("./executors.json")),
    ];

    if !tree.exists(&path) {
        let manifest: serde_json::Map<String, Value> = fields
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();
        return write_json(tree, &path, &Value::Object(manifest));
    }

    update_json(tree, &path, |mut json| {
        let root = root_object(&mut json, &path)?;
        for (key, value) in fields {
            if key == "name" || !root.contains_key(key) {
                root.insert(key.to_string(), value);
            }
        }
        Ok(json)
    })
}
