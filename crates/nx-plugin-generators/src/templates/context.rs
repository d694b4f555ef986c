//! Serializable contexts for the embedded templates

use serde::Serialize;

/// Variables shared by per-project templates (jest config)
#[derive(Debug, Clone, Serialize)]
pub struct ProjectTemplateContext {
    pub project_name: String,
    /// Relative path back to the workspace root, with trailing slash
    pub offset_from_root: String,
    pub coverage_directory: String,
}

/// Variables for the plugin project templates
#[derive(Debug, Clone, Serialize)]
pub struct PluginTemplateContext {
    pub project_name: String,
    pub import_path: String,
    pub output_path: String,
    pub unit_test_runner: String,
}

/// Variables for the companion CLI package templates
#[derive(Debug, Clone, Serialize)]
pub struct CreatePackageTemplateContext {
    /// Published name of the CLI package
    pub cli_package: String,
    /// Package passed to `createWorkspace` as the preset
    pub preset: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceTemplateContext {
    pub workspace_name: String,
    pub plugin_name: String,
    pub exec_command: String,
    pub date: String,
    pub indent_width: usize,
}

/// Variables for CI workflow templates
#[derive(Debug, Clone, Serialize)]
pub struct CiTemplateContext {
    pub workflow_name: String,
    pub workflow_file_name: String,
    pub job_name: String,
    pub default_base: String,
    pub package_manager: String,
    pub install_command: String,
    pub exec_command: String,
}
