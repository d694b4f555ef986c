//! CI workflow generator

use super::GeneratorContext;
use crate::error::Result;
use crate::templates::{
    CiTemplateContext, CI_AZURE, CI_BITBUCKET, CI_CIRCLECI, CI_GITHUB, CI_GITLAB,
};
use crate::tree::Tree;
use camino::Utf8PathBuf;
use nx_plugin_core::types::{CiProvider, PackageManager};
use tracing::info;

/// Options for a CI workflow
#[derive(Debug, Clone)]
pub struct CiWorkflowOptions {
    /// Workflow display name
    pub name: String,
    pub package_manager: PackageManager,
    /// Branch affected commands compare against
    pub default_base: String,
}

impl CiWorkflowOptions {
    pub fn new(package_manager: PackageManager, default_base: impl Into<String>) -> Self {
        Self {
            name: "CI".to_string(),
            package_manager,
            default_base: default_base.into(),
        }
    }
}

fn template_for(provider: CiProvider) -> &'static str {
    match provider {
        CiProvider::Github => CI_GITHUB,
        CiProvider::CircleCi => CI_CIRCLECI,
        CiProvider::Azure => CI_AZURE,
        CiProvider::Gitlab => CI_GITLAB,
        CiProvider::BitbucketPipelines => CI_BITBUCKET,
    }
}

/// Stage the workflow file for `provider`, returning its path
pub fn ci_workflow_generator(
    tree: &mut Tree,
    provider: CiProvider,
    options: &CiWorkflowOptions,
    ctx: &GeneratorContext,
) -> Result<Utf8PathBuf> {
    let path = Utf8PathBuf::from(provider.workflow_path());
    info!("Generating {} workflow at {}", provider.label(), path);

    let file_name = options.name.to_lowercase().replace(' ', "-");
    let context = CiTemplateContext {
        workflow_name: options.name.clone(),
        workflow_file_name: file_name,
        job_name: "main".to_string(),
        default_base: options.default_base.clone(),
        package_manager: options.package_manager.as_str().to_string(),
        install_command: options.package_manager.install_command(),
        exec_command: options.package_manager.exec_command().to_string(),
    };

    ctx.templates
        .render_to(tree, template_for(provider), &path, &context)?;
    Ok(path)
}
