//! Workspace preset: plugin project plus its companion CLI package

use super::{create_package_generator, plugin_generator, GeneratorContext};
use crate::error::Result;
use crate::format::format_files;
use crate::manifest::{move_to_dev_dependencies, DependencyMove};
use crate::nx_json::remove_npm_scope;
use crate::tasks::TaskQueue;
use crate::tree::Tree;
use nx_plugin_core::types::{
    Compiler, CreatePackageSchema, Linter, PluginGeneratorSchema, PluginName, PresetSchema,
    UnitTestRunner,
};
use tracing::{debug, info};

/// Turn a fresh workspace into a plugin workspace
///
/// Steps run in a fixed order and the first failure aborts the rest:
///
/// 1. scaffold the plugin as the root project (named by the unscoped
///    plugin name, published under the full name)
/// 2. drop `npmScope` from `nx.json`
/// 3. move the devkit package to `devDependencies`
/// 4. scaffold the companion CLI package (`cliName`, or
///    `create-<pluginName>-package`)
/// 5. format every staged file
///
/// Returns the install tasks of steps 1 and 4, in that order.
pub fn preset_generator(
    tree: &mut Tree,
    schema: &PresetSchema,
    ctx: &GeneratorContext,
) -> Result<TaskQueue> {
    let plugin_name = PluginName::parse(&schema.plugin_name)?;

    info!("Preset 1/5: plugin project {}", plugin_name);
    let plugin_task = plugin_generator(
        tree,
        &PluginGeneratorSchema {
            name: plugin_name.local_name().to_string(),
            import_path: Some(plugin_name.as_str().to_string()),
            compiler: Compiler::Tsc,
            linter: Linter::EsLint,
            unit_test_runner: UnitTestRunner::Jest,
            root_project: true,
            skip_format: true,
            skip_lint_checks: false,
            skip_ts_config: false,
        },
        ctx,
    )?;

    info!("Preset 2/5: removing npmScope");
    remove_npm_scope(tree)?;

    info!("Preset 3/5: moving {} to devDependencies", ctx.devkit_package);
    match move_to_dev_dependencies(tree, &ctx.devkit_package)? {
        DependencyMove::Moved { version } => debug!("Moved {}@{}", ctx.devkit_package, version),
        DependencyMove::AlreadyDev => debug!("{} already a devDependency", ctx.devkit_package),
    }

    let cli_name = schema
        .cli_name
        .clone()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| plugin_name.default_cli_name());

    info!("Preset 4/5: CLI package {}", cli_name);
    let cli_task = create_package_generator(
        tree,
        &CreatePackageSchema {
            name: cli_name,
            project: plugin_name.as_str().to_string(),
            compiler: Compiler::Tsc,
            linter: Linter::EsLint,
            unit_test_runner: UnitTestRunner::Jest,
            root_project: false,
            skip_format: true,
            skip_ts_config: false,
            set_parser_options_project: false,
        },
        ctx,
    )?;

    info!("Preset 5/5: formatting");
    let formatted = format_files(tree, &ctx.format)?;
    debug!("Formatted {} files", formatted.len());

    Ok([plugin_task, cli_task].into_iter().collect())
}
