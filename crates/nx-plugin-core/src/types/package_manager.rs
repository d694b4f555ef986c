//! Package manager selection and detection

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Node package managers a workspace can be created with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    /// Get all supported package managers
    pub fn all() -> Vec<Self> {
        vec![Self::Npm, Self::Yarn, Self::Pnpm]
    }

    /// Get the string representation (also the executable name)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// Lockfile written by this package manager
    pub fn lockfile(&self) -> &'static str {
        match self {
            Self::Npm => "package-lock.json",
            Self::Yarn => "yarn.lock",
            Self::Pnpm => "pnpm-lock.yaml",
        }
    }

    /// Arguments that install all dependencies of a workspace
    pub fn install_args(&self) -> Vec<&'static str> {
        match self {
            Self::Npm => vec!["install", "--no-fund", "--no-audit"],
            Self::Yarn => vec!["install", "--silent"],
            Self::Pnpm => vec!["install", "--reporter=silent"],
        }
    }

    /// Full install command line, as written into CI workflows
    pub fn install_command(&self) -> String {
        match self {
            Self::Npm => "npm ci".to_string(),
            Self::Yarn => "yarn install --frozen-lockfile".to_string(),
            Self::Pnpm => "pnpm install --frozen-lockfile".to_string(),
        }
    }

    /// Prefix for running a locally installed binary
    pub fn exec_command(&self) -> &'static str {
        match self {
            Self::Npm => "npx",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm exec",
        }
    }

    /// Detect the package manager for a directory
    ///
    /// Lockfiles in `dir` win; otherwise the `npm_config_user_agent` of the
    /// invoking package manager is consulted; npm is the fallback.
    pub fn detect(dir: &Utf8Path) -> Self {
        for pm in Self::all() {
            if dir.join(pm.lockfile()).exists() {
                tracing::debug!("Detected {} from {}", pm, pm.lockfile());
                return pm;
            }
        }

        std::env::var("npm_config_user_agent")
            .ok()
            .and_then(|agent| Self::from_user_agent(&agent))
            .unwrap_or_default()
    }

    /// Parse the leading `name/version` token of an npm user agent string
    pub fn from_user_agent(agent: &str) -> Option<Self> {
        let name = agent.split('/').next()?.trim();
        name.parse().ok()
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PackageManager {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            "pnpm" => Ok(Self::Pnpm),
            _ => Err(Error::unknown_choice(
                "package manager",
                s,
                &["npm", "yarn", "pnpm"],
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("PNPM".parse::<PackageManager>().unwrap(), PackageManager::Pnpm);
        assert!("bun".parse::<PackageManager>().is_err());
    }

    #[test]
    fn test_from_user_agent() {
        assert_eq!(
            PackageManager::from_user_agent("yarn/1.22.19 npm/? node/v18.12.0 linux x64"),
            Some(PackageManager::Yarn)
        );
        assert_eq!(
            PackageManager::from_user_agent("pnpm/7.26.0 npm/? node/v18.12.0"),
            Some(PackageManager::Pnpm)
        );
        assert_eq!(PackageManager::from_user_agent("bun/1.0"), None);
    }

    #[test]
    #[serial]
    fn test_detect_prefers_lockfile() {
        let temp = TempDir::new().unwrap();
        let dir = Utf8Path::from_path(temp.path()).unwrap();
        std::fs::write(dir.join("pnpm-lock.yaml"), "").unwrap();

        std::env::set_var("npm_config_user_agent", "yarn/1.22.19");
        assert_eq!(PackageManager::detect(dir), PackageManager::Pnpm);
        std::env::remove_var("npm_config_user_agent");
    }

    #[test]
    #[serial]
    fn test_detect_falls_back_to_user_agent_then_npm() {
        let temp = TempDir::new().unwrap();
        let dir = Utf8Path::from_path(temp.path()).unwrap();

        std::env::set_var("npm_config_user_agent", "yarn/1.22.19 npm/?");
        assert_eq!(PackageManager::detect(dir), PackageManager::Yarn);

        std::env::remove_var("npm_config_user_agent");
        assert_eq!(PackageManager::detect(dir), PackageManager::Npm);
    }
}
