//! Workspace creation command handler

use anyhow::Result;
use camino::Utf8Path;
use nx_plugin_core::types::{CreatorConfig, PluginOptions};
use nx_plugin_generators::{create_workspace, CreatedWorkspace, GitStatus};

use crate::output;

/// Create the plugin workspace for fully resolved options
pub async fn run(options: &PluginOptions, config: &CreatorConfig, cwd: &Utf8Path) -> Result<()> {
    output::header("Create Nx Plugin Workspace");
    output::kv("Plugin", options.plugin_name().as_str());
    output::kv("Package manager", options.package_manager().as_str());
    output::kv("Default base", options.default_base());
    if let Some(ci) = options.ci() {
        output::kv("CI", ci.label());
    }
    println!();

    let spinner = output::spinner(&format!(
        "Creating your workspace in {}",
        options.workspace_name()
    ));
    let result = create_workspace(&config.devkit_package, options, config, cwd).await;
    spinner.finish_and_clear();

    let created = result?;
    report(options, &created);
    Ok(())
}

fn report(options: &PluginOptions, created: &CreatedWorkspace) {
    output::success(&format!(
        "Successfully created the workspace: {}",
        options.workspace_name()
    ));
    output::kv("Location", created.directory.as_str());
    output::kv("Files", &created.changes.len().to_string());
    if let Some(workflow) = &created.ci_workflow {
        output::kv("CI workflow", workflow.as_str());
    }

    if created.tasks_run.is_empty() {
        output::info("Dependencies were not installed");
    }

    match &created.git {
        GitStatus::Initialized => output::kv("Git", "initialized"),
        GitStatus::AlreadyInRepository => output::kv("Git", "already inside a repository"),
        GitStatus::Skipped => {}
        GitStatus::Failed(reason) => {
            output::warning(&format!("Could not initialize git: {}", reason))
        }
    }

    output::header("Next steps");
    println!("  cd {}", options.workspace_name());
    if created.tasks_run.is_empty() {
        println!("  {}", options.package_manager().install_command());
    }
    println!(
        "  {} nx build {}",
        options.package_manager().exec_command(),
        options.plugin_name().local_name()
    );
}
