//! Command option sets
//!
//! `CreatePluginArgs` is the partially-specified form straight off the
//! command line. `PluginOptions` is the fully resolved, read-only form the
//! workspace creation and generators consume.

use serde::{Deserialize, Serialize};

use super::{CiProvider, PackageManager, PluginName};

/// Author and message overrides for the initial commit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitOptions {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// Git behaviour for the new workspace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitOptions {
    /// Do not initialize a repository
    pub skip_git: bool,
    pub commit: CommitOptions,
}

/// Raw arguments, any of which may still need resolving
#[derive(Debug, Clone, Default)]
pub struct CreatePluginArgs {
    pub plugin_name: Option<String>,
    pub cli_name: Option<String>,
    pub package_manager: Option<PackageManager>,
    pub ci: Option<CiProvider>,
    pub all_prompts: bool,
    pub nx_cloud: Option<bool>,
    pub default_base: Option<String>,
    pub git: GitOptions,
    pub skip_install: bool,
}

/// Fully resolved options for one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginOptions {
    plugin_name: PluginName,
    cli_name: Option<String>,
    package_manager: PackageManager,
    ci: Option<CiProvider>,
    nx_cloud: bool,
    default_base: String,
    git: GitOptions,
    skip_install: bool,
}

impl PluginOptions {
    /// Start building options for a plugin name
    pub fn builder(plugin_name: PluginName) -> PluginOptionsBuilder {
        PluginOptionsBuilder {
            options: PluginOptions {
                plugin_name,
                cli_name: None,
                package_manager: PackageManager::default(),
                ci: None,
                nx_cloud: false,
                default_base: "main".to_string(),
                git: GitOptions::default(),
                skip_install: false,
            },
        }
    }

    pub fn plugin_name(&self) -> &PluginName {
        &self.plugin_name
    }

    /// Workspace (and root project) name: the unscoped plugin name
    pub fn workspace_name(&self) -> &str {
        self.plugin_name.local_name()
    }

    pub fn cli_name(&self) -> Option<&str> {
        self.cli_name.as_deref()
    }

    pub fn package_manager(&self) -> PackageManager {
        self.package_manager
    }

    pub fn ci(&self) -> Option<CiProvider> {
        self.ci
    }

    pub fn nx_cloud(&self) -> bool {
        self.nx_cloud
    }

    pub fn default_base(&self) -> &str {
        &self.default_base
    }

    pub fn git(&self) -> &GitOptions {
        &self.git
    }

    pub fn skip_install(&self) -> bool {
        self.skip_install
    }
}

/// Builder for [`PluginOptions`]
#[derive(Debug, Clone)]
pub struct PluginOptionsBuilder {
    options: PluginOptions,
}

impl PluginOptionsBuilder {
    pub fn cli_name(mut self, cli_name: Option<String>) -> Self {
        self.options.cli_name = cli_name.filter(|n| !n.is_empty());
        self
    }

    pub fn package_manager(mut self, package_manager: PackageManager) -> Self {
        self.options.package_manager = package_manager;
        self
    }

    pub fn ci(mut self, ci: Option<CiProvider>) -> Self {
        self.options.ci = ci;
        self
    }

    pub fn nx_cloud(mut self, nx_cloud: bool) -> Self {
        self.options.nx_cloud = nx_cloud;
        self
    }

    pub fn default_base(mut self, default_base: impl Into<String>) -> Self {
        self.options.default_base = default_base.into();
        self
    }

    pub fn git(mut self, git: GitOptions) -> Self {
        self.options.git = git;
        self
    }

    pub fn skip_install(mut self, skip_install: bool) -> Self {
        self.options.skip_install = skip_install;
        self
    }

    pub fn build(self) -> PluginOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let options = PluginOptions::builder(PluginName::parse("tools").unwrap()).build();
        assert_eq!(options.workspace_name(), "tools");
        assert_eq!(options.package_manager(), PackageManager::Npm);
        assert_eq!(options.default_base(), "main");
        assert!(options.ci().is_none());
        assert!(!options.nx_cloud());
    }

    #[test]
    fn test_workspace_name_is_local_name() {
        let options =
            PluginOptions::builder(PluginName::parse("@acme/tools").unwrap()).build();
        assert_eq!(options.workspace_name(), "tools");
        assert_eq!(options.plugin_name().as_str(), "@acme/tools");
    }

    #[test]
    fn test_empty_cli_name_is_dropped() {
        let options = PluginOptions::builder(PluginName::parse("tools").unwrap())
            .cli_name(Some(String::new()))
            .build();
        assert_eq!(options.cli_name(), None);
    }
}
