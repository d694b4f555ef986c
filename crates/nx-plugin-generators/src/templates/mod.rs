//! Embedded file templates
//!
//! Text files generators emit (READMEs, TypeScript entry points, CI
//! workflows, workspace dotfiles) are Tera templates compiled into the
//! binary. JSON files are built in code instead so they can be merged with
//! existing content.

mod context;

pub use context::{
    CiTemplateContext, CreatePackageTemplateContext, PluginTemplateContext,
    ProjectTemplateContext, WorkspaceTemplateContext,
};

use crate::error::{Error, Result};
use crate::tree::Tree;
use camino::Utf8Path;
use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

pub const PLUGIN_README: &str = "plugin/README.md";
pub const PLUGIN_INDEX: &str = "plugin/src/index.ts";
pub const PROJECT_JEST_CONFIG: &str = "project/jest.config.ts";
pub const CREATE_PACKAGE_BIN: &str = "create-package/bin/index.ts";
pub const CREATE_PACKAGE_README: &str = "create-package/README.md";
pub const WORKSPACE_README: &str = "workspace/README.md";
pub const WORKSPACE_GITIGNORE: &str = "workspace/gitignore";
pub const WORKSPACE_EDITORCONFIG: &str = "workspace/editorconfig";
pub const CI_GITHUB: &str = "ci/github.yml";
pub const CI_CIRCLECI: &str = "ci/circleci.yml";
pub const CI_AZURE: &str = "ci/azure.yml";
pub const CI_GITLAB: &str = "ci/gitlab.yml";
pub const CI_BITBUCKET: &str = "ci/bitbucket-pipelines.yml";

const TEMPLATES: &[(&str, &str)] = &[
    (PLUGIN_README, include_str!("../../templates/plugin/README.md.tera")),
    (PLUGIN_INDEX, include_str!("../../templates/plugin/src/index.ts.tera")),
    (
        PROJECT_JEST_CONFIG,
        include_str!("../../templates/project/jest.config.ts.tera"),
    ),
    (
        CREATE_PACKAGE_BIN,
        include_str!("../../templates/create-package/bin/index.ts.tera"),
    ),
    (
        CREATE_PACKAGE_README,
        include_str!("../../templates/create-package/README.md.tera"),
    ),
    (WORKSPACE_README, include_str!("../../templates/workspace/README.md.tera")),
    (
        WORKSPACE_GITIGNORE,
        include_str!("../../templates/workspace/gitignore.tera"),
    ),
    (
        WORKSPACE_EDITORCONFIG,
        include_str!("../../templates/workspace/editorconfig.tera"),
    ),
    (CI_GITHUB, include_str!("../../templates/ci/github.yml.tera")),
    (CI_CIRCLECI, include_str!("../../templates/ci/circleci.yml.tera")),
    (CI_AZURE, include_str!("../../templates/ci/azure.yml.tera")),
    (CI_GITLAB, include_str!("../../templates/ci/gitlab.yml.tera")),
    (
        CI_BITBUCKET,
        include_str!("../../templates/ci/bitbucket-pipelines.yml.tera"),
    ),
];

/// Registry of the embedded file templates
pub struct FileTemplateRegistry {
    tera: Tera,
}

impl FileTemplateRegistry {
    /// Create a registry with every embedded template registered
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        Ok(Self { tera })
    }

    /// Names of all registered templates
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tera.get_template_names().collect();
        names.sort_unstable();
        names
    }

    /// Render a template with a serializable context
    pub fn render<C: Serialize>(&self, template: &str, context: &C) -> Result<String> {
        let context = Context::from_serialize(context).map_err(|source| Error::TemplateRender {
            template: template.to_string(),
            source,
        })?;

        self.tera
            .render(template, &context)
            .map_err(|source| Error::TemplateRender {
                template: template.to_string(),
                source,
            })
    }

    /// Render a template and stage the result at `dest`
    pub fn render_to<C: Serialize>(
        &self,
        tree: &mut Tree,
        template: &str,
        dest: impl AsRef<Utf8Path>,
        context: &C,
    ) -> Result<()> {
        let dest = dest.as_ref();
        debug!("Rendering {} -> {}", template, dest);
        let content = self.render(template, context)?;
        tree.write(dest, content)
    }
}

impl std::fmt::Debug for FileTemplateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileTemplateRegistry")
            .field("templates", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ci_context(package_manager: &str) -> CiTemplateContext {
        CiTemplateContext {
            workflow_name: "CI".to_string(),
            workflow_file_name: "ci".to_string(),
            job_name: "main".to_string(),
            default_base: "trunk".to_string(),
            package_manager: package_manager.to_string(),
            install_command: "npm ci".to_string(),
            exec_command: "npx".to_string(),
        }
    }

    #[test]
    fn test_all_templates_register() {
        let registry = FileTemplateRegistry::new().unwrap();
        assert_eq!(registry.names().len(), TEMPLATES.len());
    }

    #[test]
    fn test_every_ci_template_renders() {
        let registry = FileTemplateRegistry::new().unwrap();
        for template in [CI_GITHUB, CI_CIRCLECI, CI_AZURE, CI_GITLAB, CI_BITBUCKET] {
            let rendered = registry.render(template, &ci_context("npm")).unwrap();
            assert!(rendered.contains("npm ci"), "{} missing install", template);
            assert!(rendered.contains("trunk"), "{} missing base", template);
        }
    }

    #[test]
    fn test_azure_keeps_pipeline_expressions() {
        let registry = FileTemplateRegistry::new().unwrap();
        let rendered = registry.render(CI_AZURE, &ci_context("npm")).unwrap();
        assert!(rendered.contains("${{ if eq(variables['Build.Reason'], 'PullRequest') }}:"));
    }

    #[test]
    fn test_pnpm_setup_only_for_pnpm() {
        let registry = FileTemplateRegistry::new().unwrap();
        let npm = registry.render(CI_GITHUB, &ci_context("npm")).unwrap();
        let pnpm = registry.render(CI_GITHUB, &ci_context("pnpm")).unwrap();
        assert!(!npm.contains("pnpm/action-setup"));
        assert!(pnpm.contains("pnpm/action-setup"));
    }

    #[test]
    fn test_missing_variable_is_render_error() {
        let registry = FileTemplateRegistry::new().unwrap();
        let err = registry
            .render(PLUGIN_README, &serde_json::json!({}))
            .unwrap_err();
        assert!(matches!(err, Error::TemplateRender { .. }));
    }
}
