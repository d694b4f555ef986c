//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Embedded defaults (built into binary)
//! 2. User config (~/.config/create-nx-plugin/config.yaml)
//! 3. Environment variables (CREATE_NX_PLUGIN_* prefix)
//! 4. CLI flags (handled by caller)

use crate::error::{Error, Result};
use crate::types::CreatorConfig;
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;
use std::env;
use std::fs;

/// Embedded configuration files
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../embedded/config/"]
#[prefix = ""]
struct EmbeddedConfigs;

/// Name of the user configuration file inside the config directory
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Environment variable overriding the config directory
const CONFIG_DIR_ENV: &str = "CREATE_NX_PLUGIN_CONFIG_DIR";

/// Configuration hierarchy loader
pub struct HierarchicalConfigLoader {
    /// Directory holding the user config file
    config_dir: Utf8PathBuf,
}

impl HierarchicalConfigLoader {
    /// Create a loader for the standard config directory
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        Ok(Self { config_dir })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    /// Resolve the config directory (`$CREATE_NX_PLUGIN_CONFIG_DIR` or
    /// `~/.config/create-nx-plugin`)
    fn get_config_dir() -> Result<Utf8PathBuf> {
        if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
            if !dir.is_empty() {
                return Ok(Utf8PathBuf::from(dir));
            }
        }

        let home = crate::utils::get_home_dir()
            .map_err(|_| Error::invalid_config("Could not determine home directory"))?;
        let home = Utf8PathBuf::from_path_buf(home)
            .map_err(|_| Error::invalid_config("Home directory path is not valid UTF-8"))?;

        Ok(home.join(".config").join("create-nx-plugin"))
    }

    /// Load configuration with hierarchical precedence
    pub fn load(&self) -> Result<CreatorConfig> {
        let mut config = Self::load_embedded_config::<CreatorConfig>("defaults.yaml")?;

        let user_config_path = self.config_dir.join(CONFIG_FILE_NAME);
        if user_config_path.exists() {
            tracing::debug!("Loading user config from {}", user_config_path);
            config = self.load_yaml_file::<CreatorConfig>(&user_config_path)?;
        }

        config = self.apply_env_overrides(config);
        Self::validate(&config)?;

        Ok(config)
    }

    /// Load an embedded configuration file
    fn load_embedded_config<T: DeserializeOwned>(filename: &str) -> Result<T> {
        let embedded_file = EmbeddedConfigs::get(filename).ok_or_else(|| {
            Error::config_not_found(format!("Embedded config not found: {}", filename))
        })?;

        let content = std::str::from_utf8(&embedded_file.data).map_err(|_| {
            Error::invalid_config(format!("Invalid UTF-8 in embedded config: {}", filename))
        })?;

        let config: T = serde_yaml_ng::from_str(content).map_err(|e| {
            Error::invalid_config(format!(
                "Failed to parse embedded config {}: {}",
                filename, e
            ))
        })?;

        Ok(config)
    }

    /// Load a YAML file and parse it
    fn load_yaml_file<T: DeserializeOwned>(&self, path: &Utf8Path) -> Result<T> {
        let content = fs::read_to_string(path)?;
        let config: T = serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))?;
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&self, mut config: CreatorConfig) -> CreatorConfig {
        if let Ok(val) = env::var("CREATE_NX_PLUGIN_NX_VERSION") {
            config.nx_version = val;
        }

        if let Ok(val) = env::var("CREATE_NX_PLUGIN_DEFAULT_BASE") {
            config.default_base = val;
        }

        if let Ok(val) = env::var("CREATE_NX_PLUGIN_DEVKIT_PACKAGE") {
            config.devkit_package = val;
        }

        config
    }

    fn validate(config: &CreatorConfig) -> Result<()> {
        semver::Version::parse(&config.nx_version)
            .map_err(|_| Error::invalid_version(config.nx_version.clone()))?;

        if config.devkit_package.is_empty() {
            return Err(Error::invalid_config("devkit-package cannot be empty"));
        }
        if config.default_base.is_empty() {
            return Err(Error::invalid_config("default-base cannot be empty"));
        }

        Ok(())
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn create_temp_loader() -> (HierarchicalConfigLoader, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_dir =
            Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).expect("Invalid UTF-8 path");
        let loader = HierarchicalConfigLoader::with_dir(config_dir);
        (loader, temp_dir)
    }

    #[test]
    #[serial]
    fn test_load_defaults() {
        let (loader, _temp) = create_temp_loader();
        let config = loader.load().unwrap();
        assert_eq!(config, CreatorConfig::default());
    }

    #[test]
    #[serial]
    fn test_load_from_file_keeps_unset_defaults() {
        let (loader, _temp) = create_temp_loader();

        let config_content = r#"
nx-version: "15.9.2"
git-workflow:
  initial-commit-message: "chore: scaffold"
"#;
        fs::write(loader.config_dir().join(CONFIG_FILE_NAME), config_content).unwrap();

        let config = loader.load().unwrap();
        assert_eq!(config.nx_version, "15.9.2");
        assert_eq!(config.git_workflow.initial_commit_message, "chore: scaffold");
        assert_eq!(config.default_base, "main");
        assert_eq!(config.devkit_package, "@nrwl/nx-plugin");
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        let (loader, _temp) = create_temp_loader();

        env::set_var("CREATE_NX_PLUGIN_NX_VERSION", "16.0.0");
        env::set_var("CREATE_NX_PLUGIN_DEFAULT_BASE", "develop");

        let config = loader.load().unwrap();
        assert_eq!(config.nx_version, "16.0.0");
        assert_eq!(config.default_base, "develop");

        env::remove_var("CREATE_NX_PLUGIN_NX_VERSION");
        env::remove_var("CREATE_NX_PLUGIN_DEFAULT_BASE");
    }

    #[test]
    #[serial]
    fn test_invalid_version_rejected() {
        let (loader, _temp) = create_temp_loader();
        fs::write(
            loader.config_dir().join(CONFIG_FILE_NAME),
            "nx-version: latest\n",
        )
        .unwrap();

        let err = loader.load().unwrap_err();
        assert!(matches!(err, Error::InvalidVersion { .. }));
    }

    #[test]
    #[serial]
    fn test_config_dir_from_env() {
        env::set_var(CONFIG_DIR_ENV, "/tmp/custom-nx-plugin-config");
        let loader = HierarchicalConfigLoader::new().unwrap();
        assert_eq!(loader.config_dir(), "/tmp/custom-nx-plugin-config");
        env::remove_var(CONFIG_DIR_ENV);
    }
}
