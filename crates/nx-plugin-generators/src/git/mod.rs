//! Git operations for newly created workspaces
//!
//! ```no_run
//! use nx_plugin_generators::git::{init_repository, InitOptions};
//! use nx_plugin_core::types::{CommitOptions, GitWorkflowConfig};
//! use camino::Utf8Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let path = Utf8Path::new("/tmp/my-plugin");
//! let options = InitOptions {
//!     branch: "main".to_string(),
//!     commit: CommitOptions::default(),
//! };
//! init_repository(path, &options, &GitWorkflowConfig::default()).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod init;

pub use config::configure_user;
pub use init::{init_repository, is_inside_work_tree, InitOptions, InitOutcome};
