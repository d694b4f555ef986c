//! CLI argument parsing with clap

use anyhow::Result;
use clap::builder::{BoolishValueParser, PossibleValuesParser};
use clap::{Args, Parser};
use nx_plugin_core::types::{CiProvider, CommitOptions, CreatePluginArgs, GitOptions, PackageManager};

/// Create a new Nx workspace for building and publishing an Nx plugin
#[derive(Parser, Debug)]
#[command(name = "create-nx-plugin")]
#[command(author, version, long_version = crate::version::long_version(), about, long_about = None)]
pub struct Cli {
    /// Plugin name, optionally scoped (my-plugin, @my-org/my-plugin)
    #[arg(value_name = "NAME")]
    pub positional_name: Option<String>,

    /// Plugin name, instead of the positional argument
    #[arg(long = "name", alias = "pluginName", value_name = "NAME")]
    pub name: Option<String>,

    /// Name of the companion CLI package (default: create-<name>-package)
    #[arg(long, alias = "cliName")]
    pub cli_name: Option<String>,

    /// Package manager to use
    #[arg(long, visible_alias = "pm", value_parser = PossibleValuesParser::new(["npm", "yarn", "pnpm"]))]
    pub package_manager: Option<String>,

    /// Generate a CI workflow (requires Nx Cloud)
    #[arg(long, value_parser = PossibleValuesParser::new(["github", "circleci", "azure", "gitlab", "bitbucket-pipelines"]))]
    pub ci: Option<String>,

    /// Show all prompts
    #[arg(short, long, alias = "allPrompts")]
    pub all_prompts: bool,

    /// Enable Nx Cloud distributed caching
    #[arg(
        long,
        alias = "nxCloud",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub nx_cloud: Option<bool>,

    /// Default base branch for affected commands
    #[arg(long, alias = "defaultBase")]
    pub default_base: Option<String>,

    #[command(flatten)]
    pub git: GitArgs,

    /// Skip installing dependencies
    #[arg(long, alias = "skipInstall")]
    pub skip_install: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Git options for the new workspace
#[derive(Args, Debug)]
#[command(next_help_heading = "Git")]
pub struct GitArgs {
    /// Do not initialize a git repository
    #[arg(long, alias = "skipGit")]
    pub skip_git: bool,

    /// Author name of the initial commit
    #[arg(long, alias = "commit.name")]
    pub commit_name: Option<String>,

    /// Author email of the initial commit
    #[arg(long, alias = "commit.email")]
    pub commit_email: Option<String>,

    /// Message of the initial commit
    #[arg(long, alias = "commit.message")]
    pub commit_message: Option<String>,
}

impl Cli {
    /// Convert to the raw (still unresolved) argument set
    pub fn to_args(&self) -> Result<CreatePluginArgs> {
        let package_manager: Option<PackageManager> = self
            .package_manager
            .as_deref()
            .map(str::parse)
            .transpose()?;
        let ci: Option<CiProvider> = self.ci.as_deref().map(str::parse).transpose()?;

        Ok(CreatePluginArgs {
            plugin_name: self.name.clone().or_else(|| self.positional_name.clone()),
            cli_name: self.cli_name.clone(),
            package_manager,
            ci,
            all_prompts: self.all_prompts,
            nx_cloud: self.nx_cloud,
            default_base: self.default_base.clone(),
            git: GitOptions {
                skip_git: self.git.skip_git,
                commit: CommitOptions {
                    name: self.git.commit_name.clone(),
                    email: self.git.commit_email.clone(),
                    message: self.git.commit_message.clone(),
                },
            },
            skip_install: self.skip_install,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_name_and_flags() {
        let cli = Cli::try_parse_from([
            "create-nx-plugin",
            "@acme/tools",
            "--pm",
            "pnpm",
            "--ci",
            "gitlab",
            "--nx-cloud",
            "--commit-name",
            "Ada",
        ])
        .unwrap();
        let args = cli.to_args().unwrap();

        assert_eq!(args.plugin_name.as_deref(), Some("@acme/tools"));
        assert_eq!(args.package_manager, Some(PackageManager::Pnpm));
        assert_eq!(args.ci, Some(CiProvider::Gitlab));
        assert_eq!(args.nx_cloud, Some(true));
        assert_eq!(args.git.commit.name.as_deref(), Some("Ada"));
        assert!(!args.all_prompts);
    }

    #[test]
    fn test_name_flag_and_camel_case_aliases() {
        let cli = Cli::try_parse_from([
            "create-nx-plugin",
            "--name",
            "tools",
            "--cliName",
            "create-tools",
            "--nx-cloud",
            "false",
            "-a",
        ])
        .unwrap();
        let args = cli.to_args().unwrap();

        assert_eq!(args.plugin_name.as_deref(), Some("tools"));
        assert_eq!(args.cli_name.as_deref(), Some("create-tools"));
        assert_eq!(args.nx_cloud, Some(false));
        assert!(args.all_prompts);
    }

    #[test]
    fn test_unknown_package_manager_rejected() {
        assert!(Cli::try_parse_from(["create-nx-plugin", "tools", "--pm", "bun"]).is_err());
    }

    #[test]
    fn test_nothing_supplied() {
        let args = Cli::try_parse_from(["create-nx-plugin"]).unwrap().to_args().unwrap();
        assert!(args.plugin_name.is_none());
        assert!(args.nx_cloud.is_none());
        assert!(args.package_manager.is_none());
    }
}
