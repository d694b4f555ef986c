//! Build tool choices passed through to generators

use serde::{Deserialize, Serialize};

/// TypeScript compiler used by a project's build target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compiler {
    #[default]
    Tsc,
    Swc,
}

impl Compiler {
    /// Build executor implementing this compiler
    pub fn executor(&self) -> &'static str {
        match self {
            Self::Tsc => "@nrwl/js:tsc",
            Self::Swc => "@nrwl/js:swc",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tsc => "tsc",
            Self::Swc => "swc",
        }
    }
}

/// Linter configured for a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Linter {
    #[default]
    EsLint,
    None,
}

impl Linter {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::EsLint)
    }
}

/// Unit test runner configured for a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitTestRunner {
    #[default]
    Jest,
    None,
}

impl UnitTestRunner {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Jest)
    }
}
