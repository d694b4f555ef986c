//! Argument resolution
//!
//! Turns the raw command-line arguments into a complete [`PluginOptions`],
//! prompting for whatever is missing. The resolver never exits the process;
//! it reports failures as a [`Resolution`] and leaves exit codes to `main`.

use crate::prompts::Prompter;
use anyhow::Result;
use camino::Utf8Path;
use nx_plugin_core::types::{
    CiProvider, CreatePluginArgs, CreatorConfig, PackageManager, PluginName, PluginOptions,
};
use tracing::debug;

const CI_DO_IT_LATER: &str = "Do it later";

/// Outcome of resolving arguments
#[derive(Debug)]
pub enum Resolution {
    /// Every option is known
    Ready(PluginOptions),
    /// The plugin name was missing or unusable
    InvalidName(InvalidName),
    /// A prompt or lookup failed
    DeterminationFailed(anyhow::Error),
}

/// A rejected plugin name, ready to print as an error block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidName {
    pub title: String,
    pub body: Vec<String>,
}

impl InvalidName {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            title: "Invalid name".to_string(),
            body: vec![reason.into()],
        }
    }
}

/// Whether Nx Cloud was opted into
///
/// Only [`determine_nx_cloud`] produces one, which is what keeps CI
/// resolution after the cloud question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NxCloudChoice {
    Enabled,
    Disabled,
}

impl NxCloudChoice {
    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }
}

/// Use the supplied plugin name or ask for one
pub fn resolve_plugin_name(
    args: &CreatePluginArgs,
    prompter: &mut dyn Prompter,
) -> Result<std::result::Result<PluginName, InvalidName>> {
    let raw = match &args.plugin_name {
        Some(name) if !name.is_empty() => name.clone(),
        _ => prompter.input("Plugin name", None, true)?,
    };

    if raw.trim().is_empty() {
        return Ok(Err(InvalidName::new("Name cannot be empty")));
    }

    Ok(PluginName::parse(raw).map_err(|e| match e {
        nx_plugin_core::Error::InvalidName { reason, .. } => InvalidName::new(reason),
        other => InvalidName::new(other.to_string()),
    }))
}

/// Explicit package manager, a selection with `--all-prompts`, or detection
pub fn determine_package_manager(
    args: &CreatePluginArgs,
    prompter: &mut dyn Prompter,
    cwd: &Utf8Path,
) -> Result<PackageManager> {
    if let Some(pm) = args.package_manager {
        return Ok(pm);
    }

    let detected = PackageManager::detect(cwd);
    if !args.all_prompts {
        return Ok(detected);
    }

    let choices = PackageManager::all();
    let items: Vec<String> = choices.iter().map(|pm| pm.as_str().to_string()).collect();
    let default = choices.iter().position(|pm| *pm == detected).unwrap_or(0);

    let index = prompter.select("Which package manager to use", &items, default)?;
    Ok(choices.get(index).copied().unwrap_or(detected))
}

/// Explicit base branch, an input with `--all-prompts`, or the configured default
pub fn determine_default_base(
    args: &CreatePluginArgs,
    prompter: &mut dyn Prompter,
    config: &CreatorConfig,
) -> Result<String> {
    if let Some(base) = &args.default_base {
        return Ok(base.clone());
    }

    if !args.all_prompts {
        return Ok(config.default_base.clone());
    }

    let answer = prompter.input(
        "Main branch name",
        Some(config.default_base.as_str()),
        false,
    )?;

    if answer.trim().is_empty() {
        Ok(config.default_base.clone())
    } else {
        Ok(answer)
    }
}

/// Explicit Nx Cloud choice or a yes/no prompt
pub fn determine_nx_cloud(
    args: &CreatePluginArgs,
    prompter: &mut dyn Prompter,
) -> Result<NxCloudChoice> {
    let enabled = match args.nx_cloud {
        Some(enabled) => enabled,
        None => prompter.confirm("Enable distributed caching to make your CI faster", false)?,
    };

    Ok(if enabled {
        NxCloudChoice::Enabled
    } else {
        NxCloudChoice::Disabled
    })
}

/// CI provider, only ever resolved after the cloud choice
///
/// Without Nx Cloud there is no CI workflow; a `--ci` flag is dropped with a
/// warning. With Nx Cloud an explicit provider wins, `--all-prompts` offers a
/// selection, and otherwise no workflow is generated.
pub fn determine_ci(
    args: &CreatePluginArgs,
    prompter: &mut dyn Prompter,
    nx_cloud: NxCloudChoice,
) -> Result<Option<CiProvider>> {
    if !nx_cloud.is_enabled() {
        if args.ci.is_some() {
            prompter.warn("Nx Cloud must be enabled");
        }
        return Ok(None);
    }

    if let Some(ci) = args.ci {
        return Ok(Some(ci));
    }

    if !args.all_prompts {
        return Ok(None);
    }

    let providers = CiProvider::all();
    let mut items: Vec<String> = providers.iter().map(|p| p.label().to_string()).collect();
    items.push(CI_DO_IT_LATER.to_string());

    let index = prompter.select("CI workflow", &items, items.len() - 1)?;
    Ok(providers.get(index).copied())
}

/// Resolve every option, in order: name, package manager, default base,
/// Nx Cloud, CI
pub fn normalize_args(
    args: CreatePluginArgs,
    prompter: &mut dyn Prompter,
    config: &CreatorConfig,
    cwd: &Utf8Path,
) -> Resolution {
    let plugin_name = match resolve_plugin_name(&args, prompter) {
        Ok(Ok(name)) => name,
        Ok(Err(invalid)) => return Resolution::InvalidName(invalid),
        Err(e) => return Resolution::DeterminationFailed(e),
    };

    match determine_rest(&args, prompter, config, cwd, plugin_name) {
        Ok(options) => {
            debug!("Resolved options: {:?}", options);
            Resolution::Ready(options)
        }
        Err(e) => Resolution::DeterminationFailed(e),
    }
}

fn determine_rest(
    args: &CreatePluginArgs,
    prompter: &mut dyn Prompter,
    config: &CreatorConfig,
    cwd: &Utf8Path,
    plugin_name: PluginName,
) -> Result<PluginOptions> {
    let package_manager = determine_package_manager(args, prompter, cwd)?;
    let default_base = determine_default_base(args, prompter, config)?;
    let nx_cloud = determine_nx_cloud(args, prompter)?;
    let ci = determine_ci(args, prompter, nx_cloud)?;

    Ok(PluginOptions::builder(plugin_name)
        .cli_name(args.cli_name.clone())
        .package_manager(package_manager)
        .ci(ci)
        .nx_cloud(nx_cloud.is_enabled())
        .default_base(default_base)
        .git(args.git.clone())
        .skip_install(args.skip_install)
        .build())
}
