//! CI providers a workspace workflow can be generated for

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Supported CI providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CiProvider {
    Github,
    #[serde(rename = "circleci")]
    CircleCi,
    Azure,
    Gitlab,
    BitbucketPipelines,
}

impl CiProvider {
    /// Get all providers in prompt order
    pub fn all() -> Vec<Self> {
        vec![
            Self::Github,
            Self::Gitlab,
            Self::Azure,
            Self::BitbucketPipelines,
            Self::CircleCi,
        ]
    }

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::CircleCi => "circleci",
            Self::Azure => "azure",
            Self::Gitlab => "gitlab",
            Self::BitbucketPipelines => "bitbucket-pipelines",
        }
    }

    /// Human-readable label for prompts
    pub fn label(&self) -> &'static str {
        match self {
            Self::Github => "GitHub Actions",
            Self::CircleCi => "Circle CI",
            Self::Azure => "Azure DevOps",
            Self::Gitlab => "GitLab",
            Self::BitbucketPipelines => "BitBucket Pipelines",
        }
    }

    /// Workspace-relative path of the generated workflow file
    pub fn workflow_path(&self) -> &'static str {
        match self {
            Self::Github => ".github/workflows/ci.yml",
            Self::CircleCi => ".circleci/config.yml",
            Self::Azure => "azure-pipelines.yml",
            Self::Gitlab => ".gitlab-ci.yml",
            Self::BitbucketPipelines => "bitbucket-pipelines.yml",
        }
    }
}

impl std::fmt::Display for CiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CiProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s_lower = s.to_lowercase();
        Self::all()
            .into_iter()
            .find(|p| p.as_str() == s_lower)
            .ok_or_else(|| {
                Error::unknown_choice(
                    "CI provider",
                    s,
                    &Self::all().iter().map(|p| p.as_str()).collect::<Vec<_>>(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_providers() {
        for provider in CiProvider::all() {
            assert_eq!(provider.as_str().parse::<CiProvider>().unwrap(), provider);
        }
    }

    #[test]
    fn test_unknown_provider_lists_valid_values() {
        let err = "jenkins".parse::<CiProvider>().unwrap_err();
        assert!(err.to_string().contains("github"));
        assert!(err.to_string().contains("bitbucket-pipelines"));
    }

    #[test]
    fn test_serde_names_match_as_str() {
        for provider in CiProvider::all() {
            let json = serde_json::to_string(&provider).unwrap();
            assert_eq!(json, format!("\"{}\"", provider.as_str()));
        }
    }
}
