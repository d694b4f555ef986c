//! Workspace creation
//!
//! Stages a minimal npm-style Nx workspace, applies a preset to it, writes
//! everything to disk and then runs the follow-up work (installs, git).

use crate::error::{Error, Result};
use crate::generators::{ci_workflow_generator, preset_generator, CiWorkflowOptions, GeneratorContext};
use crate::git::{init_repository, InitOptions, InitOutcome};
use crate::json::write_json;
use crate::manifest::PACKAGE_JSON;
use crate::nx_json::NX_JSON;
use crate::templates::{WorkspaceTemplateContext, WORKSPACE_EDITORCONFIG, WORKSPACE_GITIGNORE, WORKSPACE_README};
use crate::tree::{FileChange, Tree};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Local;
use nx_plugin_core::types::{CreatorConfig, PluginOptions, PresetSchema};
use serde_json::json;
use tracing::{info, warn};

/// How git initialization went
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitStatus {
    /// `--skip-git`
    Skipped,
    Initialized,
    /// The target directory already belongs to a repository
    AlreadyInRepository,
    /// Initialization failed; the workspace itself is fine
    Failed(String),
}

/// Result of [`create_workspace`]
#[derive(Debug)]
pub struct CreatedWorkspace {
    pub directory: Utf8PathBuf,
    pub changes: Vec<FileChange>,
    /// Names of the deferred tasks that ran, in order
    pub tasks_run: Vec<String>,
    pub ci_workflow: Option<Utf8PathBuf>,
    pub git: GitStatus,
}

/// Create a workspace named after the plugin inside `cwd`
///
/// The workspace directory is only created once the skeleton, preset and
/// CI workflow have all been staged, so a failing generator leaves the
/// disk untouched.
///
/// `preset_package` is written into the workspace manifest as the package
/// that provides the preset; it is the devkit package the preset later
/// moves to `devDependencies`.
pub async fn create_workspace(
    preset_package: &str,
    options: &PluginOptions,
    config: &CreatorConfig,
    cwd: &Utf8Path,
) -> Result<CreatedWorkspace> {
    let directory = cwd.join(options.workspace_name());
    ensure_empty_target(&directory)?;

    info!("Creating workspace at {}", directory);
    let mut tree = Tree::new(directory.clone());

    let ctx = GeneratorContext {
        devkit_package: preset_package.to_string(),
        ..GeneratorContext::new(options.package_manager(), config)?
    };

    stage_skeleton(&mut tree, preset_package, options, config, &ctx)?;

    let schema = PresetSchema::new(
        options.plugin_name().as_str(),
        options.cli_name().map(str::to_string),
    );
    let tasks = preset_generator(&mut tree, &schema, &ctx)?;

    let ci_workflow = match options.ci() {
        Some(provider) => Some(ci_workflow_generator(
            &mut tree,
            provider,
            &CiWorkflowOptions::new(options.package_manager(), options.default_base()),
            &ctx,
        )?),
        None => None,
    };

    // Nothing touches the disk until every generator has succeeded
    std::fs::create_dir_all(&directory)?;
    let changes = tree.commit()?;
    info!("Wrote {} files", changes.len());

    let mut tasks_run = Vec::new();
    if options.skip_install() {
        info!("Skipping {} deferred tasks", tasks.len());
    } else {
        tasks_run = tasks.names().into_iter().map(str::to_string).collect();
        tasks.run_serial().await?;
    }

    let git = if options.git().skip_git {
        GitStatus::Skipped
    } else {
        initialize_git(&directory, options, config).await
    };

    Ok(CreatedWorkspace {
        directory,
        changes,
        tasks_run,
        ci_workflow,
        git,
    })
}

fn ensure_empty_target(directory: &Utf8Path) -> Result<()> {
    if !directory.exists() {
        return Ok(());
    }

    let occupied = !directory.is_dir() || std::fs::read_dir(directory)?.next().is_some();
    if occupied {
        return Err(Error::workspace_exists(directory.as_str()));
    }
    Ok(())
}

fn stage_skeleton(
    tree: &mut Tree,
    preset_package: &str,
    options: &PluginOptions,
    config: &CreatorConfig,
    ctx: &GeneratorContext,
) -> Result<()> {
    let name = options.workspace_name();
    let nx_version = config.nx_version.as_str();

    let mut dev_dependencies = serde_json::Map::new();
    dev_dependencies.insert("nx".to_string(), json!(nx_version));
    if options.nx_cloud() {
        dev_dependencies.insert("nx-cloud".to_string(), json!("latest"));
    }

    write_json(
        tree,
        PACKAGE_JSON,
        &json!({
            "name": name,
            "version": "0.0.0",
            "license": "MIT",
            "scripts": {},
            "private": true,
            "dependencies": {
                preset_package: nx_version
            },
            "devDependencies": dev_dependencies
        }),
    )?;

    let runner = if options.nx_cloud() {
        "nx-cloud"
    } else {
        "nx/tasks-runners/default"
    };
    write_json(
        tree,
        NX_JSON,
        &json!({
            "$schema": "./node_modules/nx/schemas/nx-schema.json",
            "npmScope": name,
            "affected": {"defaultBase": options.default_base()},
            "tasksRunnerOptions": {
                "default": {
                    "runner": runner,
                    "options": {"cacheableOperations": ["build", "lint", "test", "e2e"]}
                }
            },
            "targetDefaults": {
                "build": {"dependsOn": ["^build"], "inputs": ["production", "^production"]}
            },
            "namedInputs": {
                "default": ["{projectRoot}/**/*", "sharedGlobals"],
                "production": ["default"],
                "sharedGlobals": []
            }
        }),
    )?;

    let context = WorkspaceTemplateContext {
        workspace_name: name.to_string(),
        plugin_name: options.plugin_name().to_string(),
        exec_command: options.package_manager().exec_command().to_string(),
        date: Local::now().format("%Y-%m-%d").to_string(),
        indent_width: config.formatting.indent_width,
    };
    ctx.templates
        .render_to(tree, WORKSPACE_GITIGNORE, ".gitignore", &context)?;
    ctx.templates
        .render_to(tree, WORKSPACE_EDITORCONFIG, ".editorconfig", &context)?;
    ctx.templates
        .render_to(tree, WORKSPACE_README, "README.md", &context)?;

    write_json(tree, ".prettierrc", &json!({"singleQuote": true}))?;
    tree.write(
        ".prettierignore",
        "# Add files here to ignore them from prettier formatting\n\n/dist\n/coverage\n",
    )?;

    Ok(())
}

async fn initialize_git(
    directory: &Utf8Path,
    options: &PluginOptions,
    config: &CreatorConfig,
) -> GitStatus {
    let init_options = InitOptions {
        branch: options.default_base().to_string(),
        commit: options.git().commit.clone(),
    };

    match init_repository(directory, &init_options, &config.git_workflow).await {
        Ok(InitOutcome::Initialized) => GitStatus::Initialized,
        Ok(InitOutcome::AlreadyInRepository) => GitStatus::AlreadyInRepository,
        Err(e) => {
            warn!("Could not initialize git: {}", e);
            GitStatus::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_non_empty_target_rejected() {
        let temp = TempDir::new().unwrap();
        let dir = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();

        assert!(ensure_empty_target(&dir.join("missing")).is_ok());
        assert!(ensure_empty_target(&dir).is_ok());

        std::fs::write(dir.join("file"), "x").unwrap();
        let err = ensure_empty_target(&dir).unwrap_err();
        assert!(matches!(err, Error::WorkspaceExists { .. }));
    }
}
