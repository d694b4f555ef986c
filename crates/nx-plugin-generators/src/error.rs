//! Error types for nx-plugin-generators

use thiserror::Error;

/// Result type alias using nx-plugin-generators's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Generator and workspace creation error types
#[derive(Error, Debug)]
pub enum Error {
    /// Path outside the workspace or otherwise unusable
    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    /// File expected in the tree is missing
    #[error("File not found in workspace: {path}")]
    FileNotFound { path: String },

    /// File content could not be parsed as JSON
    #[error("Failed to parse JSON in {path}: {source}")]
    InvalidJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// JSON document had an unexpected shape
    #[error("Unexpected structure in {path}: {message}")]
    UnexpectedJson { path: String, message: String },

    /// Dependency expected in package.json is missing
    #[error("Dependency '{package}' not found in dependencies or devDependencies of {path}")]
    MissingDependency { package: String, path: String },

    /// Project already exists
    #[error("Project '{name}' already exists at: {root}")]
    ProjectExists { name: String, root: String },

    /// Project not found
    #[error("Cannot find project '{name}'")]
    ProjectNotFound { name: String },

    /// Invalid project or package name
    #[error("Invalid name: {name}. {reason}")]
    InvalidName { name: String, reason: String },

    /// Workspace directory already exists and has content
    #[error("Directory already exists and is not empty: {path}")]
    WorkspaceExists { path: String },

    /// Template rendering error
    #[error("Template rendering failed for {template}: {source}")]
    TemplateRender {
        template: String,
        #[source]
        source: tera::Error,
    },

    /// Git operation failed
    #[error("Git operation failed: {message}")]
    GitOperation { message: String },

    /// Git command not found
    #[error("Git command not found. Please ensure git is installed and in PATH")]
    GitNotFound,

    /// Deferred task failed
    #[error("Task '{task}' failed: {message}")]
    TaskFailed { task: String, message: String },

    /// Required command not found
    #[error("Required command not found: {command}")]
    CommandNotFound { command: String },

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Template error from Tera
    #[error("Template error: {0}")]
    Tera(#[from] tera::Error),

    /// Core library error
    #[error("Core error: {0}")]
    Core(#[from] nx_plugin_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath { path: path.into() }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create an unexpected JSON structure error
    pub fn unexpected_json(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnexpectedJson {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a missing dependency error
    pub fn missing_dependency(package: impl Into<String>, path: impl Into<String>) -> Self {
        Self::MissingDependency {
            package: package.into(),
            path: path.into(),
        }
    }

    /// Create a project exists error
    pub fn project_exists(name: impl Into<String>, root: impl Into<String>) -> Self {
        Self::ProjectExists {
            name: name.into(),
            root: root.into(),
        }
    }

    /// Create a project not found error
    pub fn project_not_found(name: impl Into<String>) -> Self {
        Self::ProjectNotFound { name: name.into() }
    }

    /// Create an invalid name error
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a workspace exists error
    pub fn workspace_exists(path: impl Into<String>) -> Self {
        Self::WorkspaceExists { path: path.into() }
    }

    /// Create a git operation error
    pub fn git_operation(message: impl Into<String>) -> Self {
        Self::GitOperation {
            message: message.into(),
        }
    }

    /// Create a task failed error
    pub fn task_failed(task: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TaskFailed {
            task: task.into(),
            message: message.into(),
        }
    }

    /// Create a command not found error
    pub fn command_not_found(command: impl Into<String>) -> Self {
        Self::CommandNotFound {
            command: command.into(),
        }
    }
}
