//! Generator schemas
//!
//! These mirror the option records the Nx generators accept, so they are
//! (de)serialized in camelCase.

use serde::{Deserialize, Serialize};

use super::{Compiler, Linter, UnitTestRunner};
use crate::error::Result;

/// Options for the preset generator (the generator pipeline entry point)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetSchema {
    pub plugin_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cli_name: Option<String>,
}

impl PresetSchema {
    pub fn new(plugin_name: impl Into<String>, cli_name: Option<String>) -> Self {
        Self {
            plugin_name: plugin_name.into(),
            cli_name,
        }
    }

    /// Parse generator options handed over as JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Options for the plugin project generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginGeneratorSchema {
    pub name: String,
    #[serde(default)]
    pub import_path: Option<String>,
    #[serde(default)]
    pub compiler: Compiler,
    #[serde(default)]
    pub linter: Linter,
    #[serde(default)]
    pub unit_test_runner: UnitTestRunner,
    #[serde(default)]
    pub root_project: bool,
    #[serde(default)]
    pub skip_format: bool,
    #[serde(default)]
    pub skip_lint_checks: bool,
    #[serde(default)]
    pub skip_ts_config: bool,
}

/// Options for the create-package (companion CLI) generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePackageSchema {
    pub name: String,
    /// Plugin project the CLI creates workspaces for (project or package name)
    pub project: String,
    #[serde(default)]
    pub compiler: Compiler,
    #[serde(default)]
    pub linter: Linter,
    #[serde(default)]
    pub unit_test_runner: UnitTestRunner,
    #[serde(default)]
    pub root_project: bool,
    #[serde(default)]
    pub skip_format: bool,
    #[serde(default)]
    pub skip_ts_config: bool,
    #[serde(default)]
    pub set_parser_options_project: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_schema_requires_plugin_name() {
        assert!(PresetSchema::from_json(r#"{"cliName": "x"}"#).is_err());

        let schema = PresetSchema::from_json(r#"{"pluginName": "@acme/tools"}"#).unwrap();
        assert_eq!(schema.plugin_name, "@acme/tools");
        assert_eq!(schema.cli_name, None);
    }

    #[test]
    fn test_plugin_schema_defaults() {
        let schema: PluginGeneratorSchema =
            serde_json::from_str(r#"{"name": "tools", "linter": "none"}"#).unwrap();
        assert_eq!(schema.compiler, Compiler::Tsc);
        assert_eq!(schema.linter, Linter::None);
        assert_eq!(schema.unit_test_runner, UnitTestRunner::Jest);
        assert!(!schema.root_project);
    }
}
