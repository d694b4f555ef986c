//! Tool configuration (versions, defaults, git workflow)
//!
//! Loaded by [`crate::config::HierarchicalConfigLoader`]; every field has a
//! default so partial user files are accepted.

use serde::{Deserialize, Serialize};

/// create-nx-plugin configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CreatorConfig {
    /// Version of the Nx packages written into generated manifests
    #[serde(default = "default_nx_version")]
    pub nx_version: String,

    /// Package that provides the plugin authoring devkit (the workspace preset)
    #[serde(default = "default_devkit_package")]
    pub devkit_package: String,

    /// Default base branch for affected commands and CI
    #[serde(default = "default_base")]
    pub default_base: String,

    /// Git workflow defaults
    #[serde(default)]
    pub git_workflow: GitWorkflowConfig,

    /// Formatting pass settings
    #[serde(default)]
    pub formatting: FormattingConfig,
}

impl Default for CreatorConfig {
    fn default() -> Self {
        Self {
            nx_version: default_nx_version(),
            devkit_package: default_devkit_package(),
            default_base: default_base(),
            git_workflow: GitWorkflowConfig::default(),
            formatting: FormattingConfig::default(),
        }
    }
}

/// Git workflow configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitWorkflowConfig {
    /// Message of the initial commit
    #[serde(default = "default_initial_commit_message")]
    pub initial_commit_message: String,
}

impl Default for GitWorkflowConfig {
    fn default() -> Self {
        Self {
            initial_commit_message: default_initial_commit_message(),
        }
    }
}

/// Formatting pass configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FormattingConfig {
    /// Spaces per indentation level in JSON files
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            indent_width: default_indent_width(),
        }
    }
}

fn default_nx_version() -> String {
    "15.8.0".to_string()
}

fn default_devkit_package() -> String {
    "@nrwl/nx-plugin".to_string()
}

fn default_base() -> String {
    "main".to_string()
}

fn default_initial_commit_message() -> String {
    "initial commit".to_string()
}

fn default_indent_width() -> usize {
    2
}
