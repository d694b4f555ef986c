//! Companion CLI package generator
//!
//! Creates a `create-*` package whose binary calls `createWorkspace` with
//! an existing plugin as the preset, so users can bootstrap workspaces with
//! `npx create-my-plugin`.

use super::files::{
    add_tooling_dependencies, lint_target, register_ts_path, test_target, write_eslintrc,
    write_jest_config, write_tsconfigs, ProjectLayout,
};
use super::GeneratorContext;
use crate::error::{Error, Result};
use crate::format::format_files;
use crate::install::install_packages_task;
use crate::json::write_json;
use crate::manifest::{add_dependencies, PACKAGE_JSON};
use crate::names::package_to_file_name;
use crate::project::{add_project_configuration, find_project, offset_from_root, PROJECT_JSON};
use crate::tasks::DeferredTask;
use crate::templates::{CreatePackageTemplateContext, CREATE_PACKAGE_BIN, CREATE_PACKAGE_README};
use crate::tree::Tree;
use nx_plugin_core::types::CreatePackageSchema;
use regex::Regex;
use serde_json::{json, Value};
use std::sync::LazyLock;
use tracing::info;

static PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(@[a-z0-9-~][a-z0-9-._~]*/)?[a-z0-9-~][a-z0-9-._~]*$")
        .expect("valid package name regex")
});

/// Scaffold a CLI package that creates workspaces from `schema.project`
///
/// `schema.project` may be the plugin's project name or its package name.
/// A CLI name that is not a valid npm package name (such as the default
/// `create-@scope/name-package`) is published under its file-name form.
pub fn create_package_generator(
    tree: &mut Tree,
    schema: &CreatePackageSchema,
    ctx: &GeneratorContext,
) -> Result<DeferredTask> {
    let plugin = find_project(tree, &schema.project)?
        .ok_or_else(|| Error::project_not_found(&schema.project))?;

    let project_name = package_to_file_name(&schema.name);
    if project_name.is_empty() {
        return Err(Error::invalid_name(&schema.name, "CLI name has no usable characters"));
    }

    let cli_package = if is_valid_package_name(&schema.name) {
        schema.name.clone()
    } else {
        project_name.clone()
    };

    let root = if schema.root_project {
        if tree.exists(PROJECT_JSON) {
            return Err(Error::project_exists(&project_name, "."));
        }
        ".".to_string()
    } else {
        format!("packages/{}", project_name)
    };
    let offset = offset_from_root(&root);
    let layout = ProjectLayout {
        name: &project_name,
        root: &root,
        offset: &offset,
        source_dir: "bin",
    };

    info!(
        "Generating CLI package {} for {} at {}",
        cli_package, plugin.name, root
    );

    add_project_configuration(
        tree,
        &root,
        &project_configuration(schema, &layout, &plugin.name),
    )?;

    write_json(
        tree,
        layout.path(PACKAGE_JSON),
        &json!({
            "name": cli_package,
            "version": "0.0.1",
            "type": "commonjs",
            "bin": {
                bin_name(&cli_package): "./bin/index.js"
            },
            "dependencies": {
                "create-nx-workspace": ctx.nx_version
            }
        }),
    )?;

    let context = CreatePackageTemplateContext {
        cli_package: cli_package.clone(),
        preset: plugin.import_name().to_string(),
    };
    ctx.templates
        .render_to(tree, CREATE_PACKAGE_BIN, layout.main(), &context)?;
    ctx.templates
        .render_to(tree, CREATE_PACKAGE_README, layout.path("README.md"), &context)?;

    if !schema.skip_ts_config {
        write_tsconfigs(tree, &layout, schema.unit_test_runner)?;
    }
    if schema.linter.is_enabled() {
        write_eslintrc(tree, &layout, false, schema.set_parser_options_project)?;
    }
    if schema.unit_test_runner.is_enabled() {
        write_jest_config(tree, ctx, &layout)?;
    }
    if !layout.is_root() {
        register_ts_path(tree, &cli_package, &layout.main())?;
    }

    add_dependencies(
        tree,
        &[("create-nx-workspace", ctx.nx_version.as_str())],
        &[],
    )?;
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

fn is_valid_package_name(name: &str) -> bool {
    name.len() <= 214 && PACKAGE_NAME.is_match(name)
}

/// Executable name: the unscoped part of the package name
fn bin_name(package: &str) -> &str {
    package.rsplit('/').next().unwrap_or(package)
}

fn project_configuration(
    schema: &CreatePackageSchema,
    layout: &ProjectLayout<'_>,
    plugin_project: &str,
) -> Value {
    let mut targets = serde_json::Map::new();

    targets.insert(
        "build".to_string(),
        json!({
            "executor": schema.compiler.executor(),
            "outputs": ["{options.outputPath}"],
            "dependsOn": ["^build"],
            "options": {
                "outputPath": layout.output_path(),
                "main": layout.main(),
                "tsConfig": layout.path("tsconfig.lib.json"),
                "assets": [layout.path("*.md")]
            }
        }),
    );

    if schema.linter.is_enabled() {
        targets.insert(
            "lint".to_string(),
            lint_target(vec![layout.path("**/*.ts")]),
        );
    }

    if schema.unit_test_runner.is_enabled() {
        targets.insert("test".to_string(), test_target(layout));
    }

    json!({
        "name": layout.name,
        "$schema": format!("{}node_modules/nx/schemas/project-schema.json", layout.offset),
        "sourceRoot": layout.path("bin"),
        "projectType": "library",
        "targets": targets,
        "implicitDependencies": [plugin_project],
        "tags": []
    })
}
