//! Code generators
//!
//! Every generator takes the staged [`Tree`](crate::tree::Tree), its schema
//! and a shared [`GeneratorContext`]. Generators only stage changes; work
//! that needs the files on disk comes back as a [`DeferredTask`](crate::tasks::DeferredTask).

mod ci;
mod create_package;
mod files;
mod plugin;
mod preset;
pub mod versions;

pub use ci::{ci_workflow_generator, CiWorkflowOptions};
pub use create_package::create_package_generator;
pub use plugin::plugin_generator;
pub use preset::preset_generator;

use crate::error::Result;
use crate::format::FormatOptions;
use crate::install::InstallTracker;
use crate::templates::FileTemplateRegistry;
use nx_plugin_core::types::{CreatorConfig, PackageManager};

/// Settings and shared state for one generator run
#[derive(Debug)]
pub struct GeneratorContext {
    pub package_manager: PackageManager,
    /// Version written for every Nx package
    pub nx_version: String,
    /// Package relocated to devDependencies by the preset
    pub devkit_package: String,
    pub format: FormatOptions,
    pub templates: FileTemplateRegistry,
    pub install_tracker: InstallTracker,
}

impl GeneratorContext {
    pub fn new(package_manager: PackageManager, config: &CreatorConfig) -> Result<Self> {
        Ok(Self {
            package_manager,
            nx_version: config.nx_version.clone(),
            devkit_package: config.devkit_package.clone(),
            format: FormatOptions {
                indent_width: config.formatting.indent_width,
            },
            templates: FileTemplateRegistry::new()?,
            install_tracker: InstallTracker::new(),
        })
    }
}
