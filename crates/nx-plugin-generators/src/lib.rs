//! # nx-plugin-generators
//!
//! Generators behind create-nx-plugin:
//! - a staged file [`Tree`](tree::Tree) generators read from and write to
//! - JSON, manifest and `nx.json` helpers
//! - the plugin, create-package, CI workflow and preset generators
//! - deferred tasks (package installs) run after the tree is committed
//! - git initialization and the workspace creation routine
//!
//! ## Running the preset against a workspace
//!
//! ```no_run
//! use nx_plugin_generators::generators::{preset_generator, GeneratorContext};
//! use nx_plugin_generators::tree::Tree;
//! use nx_plugin_core::types::{CreatorConfig, PackageManager, PresetSchema};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = GeneratorContext::new(PackageManager::Npm, &CreatorConfig::default())?;
//! let mut tree = Tree::new("/tmp/my-plugin");
//!
//! let tasks = preset_generator(&mut tree, &PresetSchema::new("@acme/tools", None), &ctx)?;
//! tree.commit()?;
//! tasks.run_serial().await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod format;
pub mod generators;
pub mod git;
pub mod install;
pub mod json;
pub mod manifest;
pub mod names;
pub mod nx_json;
pub mod project;
pub mod tasks;
pub mod templates;
pub mod tree;
pub mod workspace;

pub use error::{Error, Result};
pub use tasks::{DeferredTask, TaskQueue};
pub use tree::Tree;
pub use workspace::{create_workspace, CreatedWorkspace, GitStatus};
