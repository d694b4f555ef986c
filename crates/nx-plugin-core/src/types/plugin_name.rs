//! Plugin name handling
//!
//! A plugin name is either a bare package name (`my-plugin`) or a scoped one
//! (`my-org/my-plugin`, `@my-org/my-plugin`). The scoped form is what gets
//! published and imported; the local segment is what names the project and
//! its directory.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A validated, possibly scoped plugin name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PluginName {
    raw: String,
}

impl PluginName {
    /// Parse a plugin name, rejecting empty names and empty local segments
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(Error::invalid_name(raw, "Name cannot be empty"));
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(Error::invalid_name(raw, "Name cannot contain whitespace"));
        }

        let name = Self { raw };
        if name.local_name().is_empty() {
            return Err(Error::invalid_name(
                name.raw,
                "Scoped names need a package segment after '/'",
            ));
        }

        Ok(name)
    }

    /// The name exactly as supplied, used as the import path
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The unscoped project name (segment after the first `/`)
    pub fn local_name(&self) -> &str {
        match self.raw.split('/').nth(1) {
            Some(local) => local,
            None => &self.raw,
        }
    }

    /// Default name of the companion create-package CLI
    ///
    /// Built from the name as supplied, scope included.
    pub fn default_cli_name(&self) -> String {
        format!("create-{}-package", self.raw)
    }
}

impl std::fmt::Display for PluginName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for PluginName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PluginName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<PluginName> for String {
    fn from(name: PluginName) -> Self {
        name.raw
    }
}
