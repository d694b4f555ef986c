//! Type definitions for plugin workspace options and generator schemas

mod ci;
mod creator_config;
mod options;
mod package_manager;
mod plugin_name;
mod schema;
mod tooling;

pub use ci::CiProvider;
pub use creator_config::{CreatorConfig, FormattingConfig, GitWorkflowConfig};
pub use options::{CommitOptions, CreatePluginArgs, GitOptions, PluginOptions, PluginOptionsBuilder};
pub use package_manager::PackageManager;
pub use plugin_name::PluginName;
pub use schema::{CreatePackageSchema, PluginGeneratorSchema, PresetSchema};
pub use tooling::{Compiler, Linter, UnitTestRunner};
