//! Project files shared by the plugin and create-package generators

use super::versions::*;
use super::GeneratorContext;
use crate::error::Result;
use crate::json::{object_entry, root_object, update_json, write_json};
use crate::manifest::add_dependencies;
use crate::project::join_root;
use crate::templates::{ProjectTemplateContext, PROJECT_JEST_CONFIG};
use crate::tree::Tree;
use nx_plugin_core::types::{Compiler, Linter, UnitTestRunner};
use serde_json::{json, Value};
use tracing::debug;

pub(crate) const TSCONFIG_BASE: &str = "tsconfig.base.json";
const ROOT_ESLINTRC: &str = ".eslintrc.json";
const JEST_PRESET: &str = "jest.preset.js";

/// Where a project lives and how it is built
pub(crate) struct ProjectLayout<'a> {
    pub name: &'a str,
    pub root: &'a str,
    pub offset: &'a str,
    /// Directory (relative to the root) holding the entry point
    pub source_dir: &'a str,
}

impl ProjectLayout<'_> {
    pub fn path(&self, relative: &str) -> String {
        join_root(self.root, relative)
    }

    pub fn is_root(&self) -> bool {
        self.root == "."
    }

    pub fn main(&self) -> String {
        self.path(&format!("{}/index.ts", self.source_dir))
    }

    pub fn output_path(&self) -> String {
        if self.is_root() {
            format!("dist/{}", self.name)
        } else {
            format!("dist/{}", self.root)
        }
    }

    pub fn coverage_directory(&self) -> String {
        if self.is_root() {
            format!("{}coverage/{}", self.offset, self.name)
        } else {
            format!("{}coverage/{}", self.offset, self.root)
        }
    }
}

/// Stage `tsconfig.base.json` unless it exists
pub(crate) fn ensure_tsconfig_base(tree: &mut Tree) -> Result<()> {
    if tree.exists(TSCONFIG_BASE) {
        return Ok(());
    }

    write_json(
        tree,
        TSCONFIG_BASE,
        &json!({
            "compileOnSave": false,
            "compilerOptions": {
                "rootDir": ".",
                "sourceMap": true,
                "declaration": false,
                "moduleResolution": "node",
                "emitDecoratorMetadata": true,
                "experimentalDecorators": true,
                "importHelpers": true,
                "target": "es2015",
                "module": "esnext",
                "lib": ["es2020", "dom"],
                "skipLibCheck": true,
                "skipDefaultLibCheck": true,
                "baseUrl": ".",
                "paths": {}
            },
            "exclude": ["node_modules", "tmp"]
        }),
    )
}

/// Map an import path to a project's entry point in `tsconfig.base.json`
pub(crate) fn register_ts_path(tree: &mut Tree, import_path: &str, entry: &str) -> Result<()> {
    ensure_tsconfig_base(tree)?;

    update_json(tree, TSCONFIG_BASE, |mut json| {
        let root = root_object(&mut json, TSCONFIG_BASE)?;
        let options = object_entry(root, "compilerOptions", TSCONFIG_BASE)?;
        let paths = object_entry(options, "paths", TSCONFIG_BASE)?;
        paths.insert(import_path.to_string(), json!([entry]));
        Ok(json)
    })?;

    debug!("Registered {} -> {} in {}", import_path, entry, TSCONFIG_BASE);
    Ok(())
}

/// Stage `tsconfig.json`, `tsconfig.lib.json` and, with jest, `tsconfig.spec.json`
pub(crate) fn write_tsconfigs(
    tree: &mut Tree,
    layout: &ProjectLayout<'_>,
    unit_test_runner: UnitTestRunner,
) -> Result<()> {
    ensure_tsconfig_base(tree)?;

    let mut references = vec![json!({"path": "./tsconfig.lib.json"})];
    if unit_test_runner.is_enabled() {
        references.push(json!({"path": "./tsconfig.spec.json"}));
    }

    write_json(
        tree,
        layout.path("tsconfig.json"),
        &json!({
            "extends": format!("{}{}", layout.offset, TSCONFIG_BASE),
            "compilerOptions": {
                "module": "commonjs",
                "forceConsistentCasingInFileNames": true,
                "strict": true,
                "noImplicitOverride": true,
                "noPropertyAccessFromIndexSignature": true,
                "noImplicitReturns": true,
                "noFallthroughCasesInSwitch": true
            },
            "files": [],
            "include": [],
            "references": references
        }),
    )?;

    let mut lib_exclude = vec![json!("jest.config.ts")];
    if unit_test_runner.is_enabled() {
        lib_exclude.extend([json!("**/*.spec.ts"), json!("**/*.test.ts")]);
    }

    write_json(
        tree,
        layout.path("tsconfig.lib.json"),
        &json!({
            "extends": "./tsconfig.json",
            "compilerOptions": {
                "outDir": format!("{}dist/out-tsc", layout.offset),
                "declaration": true,
                "types": ["node"]
            },
            "include": [format!("{}/**/*.ts", layout.source_dir)],
            "exclude": lib_exclude
        }),
    )?;

    if unit_test_runner.is_enabled() {
        write_json(
            tree,
            layout.path("tsconfig.spec.json"),
            &json!({
                "extends": "./tsconfig.json",
                "compilerOptions": {
                    "outDir": format!("{}dist/out-tsc", layout.offset),
                    "module": "commonjs",
                    "types": ["jest", "node"]
                },
                "include": [
                    "jest.config.ts",
                    format!("{}/**/*.test.ts", layout.source_dir),
                    format!("{}/**/*.spec.ts", layout.source_dir),
                    format!("{}/**/*.d.ts", layout.source_dir)
                ]
            }),
        )?;
    }

    Ok(())
}

fn eslint_overrides(plugin_checks: bool) -> Vec<Value> {
    let mut overrides = vec![
        json!({"files": ["*.ts", "*.tsx", "*.js", "*.jsx"], "rules": {}}),
        json!({"files": ["*.ts", "*.tsx"], "rules": {}}),
        json!({"files": ["*.js", "*.jsx"], "rules": {}}),
    ];

    if plugin_checks {
        overrides.push(json!({
            "files": ["./package.json", "./generators.json", "./executors.json"],
            "parser": "jsonc-eslint-parser",
            "rules": {"@nrwl/nx/nx-plugin-checks": "error"}
        }));
    }

    overrides
}

/// Stage the workspace's root `.eslintrc.json` unless it exists
fn ensure_root_eslintrc(tree: &mut Tree) -> Result<()> {
    if tree.exists(ROOT_ESLINTRC) {
        return Ok(());
    }

    write_json(
        tree,
        ROOT_ESLINTRC,
        &json!({
            "root": true,
            "ignorePatterns": ["**/*"],
            "plugins": ["@nrwl/nx"],
            "overrides": [
                {
                    "files": ["*.ts", "*.tsx", "*.js", "*.jsx"],
                    "rules": {
                        "@nrwl/nx/enforce-module-boundaries": [
                            "error",
                            {
                                "enforceBuildableLibDependency": true,
                                "allow": [],
                                "depConstraints": [
                                    {"sourceTag": "*", "onlyDependOnLibsWithTags": ["*"]}
                                ]
                            }
                        ]
                    }
                },
                {"files": ["*.ts", "*.tsx"], "extends": ["plugin:@nrwl/nx/typescript"], "rules": {}},
                {"files": ["*.js", "*.jsx"], "extends": ["plugin:@nrwl/nx/javascript"], "rules": {}}
            ]
        }),
    )
}

/// Stage a project's `.eslintrc.json`
///
/// The root project's config is the workspace config, so it carries the
/// project overrides itself instead of extending anything.
pub(crate) fn write_eslintrc(
    tree: &mut Tree,
    layout: &ProjectLayout<'_>,
    plugin_checks: bool,
    parser_options_project: bool,
) -> Result<()> {
    let mut overrides = eslint_overrides(plugin_checks);

    if parser_options_project {
        if let Some(ts) = overrides.get_mut(1).and_then(Value::as_object_mut) {
            ts.insert(
                "parserOptions".to_string(),
                json!({"project": [layout.path("tsconfig.*?.json")]}),
            );
        }
    }

    if layout.is_root() {
        ensure_root_eslintrc(tree)?;
        return update_json(tree, ROOT_ESLINTRC, |mut json| {
            let root = root_object(&mut json, ROOT_ESLINTRC)?;
            root.insert("ignorePatterns".to_string(), json!(["!**/*"]));
            let existing = root
                .entry("overrides".to_string())
                .or_insert_with(|| json!([]));
            if let Some(list) = existing.as_array_mut() {
                list.extend(overrides);
            }
            Ok(json)
        });
    }

    ensure_root_eslintrc(tree)?;
    write_json(
        tree,
        layout.path(".eslintrc.json"),
        &json!({
            "extends": [format!("{}{}", layout.offset, ROOT_ESLINTRC)],
            "ignorePatterns": ["!**/*"],
            "overrides": overrides
        }),
    )
}

/// Stage a project's `jest.config.ts`, plus the workspace jest preset
pub(crate) fn write_jest_config(
    tree: &mut Tree,
    ctx: &GeneratorContext,
    layout: &ProjectLayout<'_>,
) -> Result<()> {
    if !tree.exists(JEST_PRESET) {
        tree.write(
            JEST_PRESET,
            "const nxPreset = require('@nrwl/jest/preset').default;\n\nmodule.exports = { ...nxPreset };\n",
        )?;
    }

    let context = ProjectTemplateContext {
        project_name: layout.name.to_string(),
        offset_from_root: layout.offset.to_string(),
        coverage_directory: layout.coverage_directory(),
    };
    ctx.templates
        .render_to(tree, PROJECT_JEST_CONFIG, layout.path("jest.config.ts"), &context)
}

/// `lint` target over the given patterns
pub(crate) fn lint_target(patterns: Vec<String>) -> Value {
    json!({
        "executor": "@nrwl/linter:eslint",
        "outputs": ["{options.outputFile}"],
        "options": {"lintFilePatterns": patterns}
    })
}

/// `test` target running the project's jest config
pub(crate) fn test_target(layout: &ProjectLayout<'_>) -> Value {
    json!({
        "executor": "@nrwl/jest:jest",
        "outputs": ["{workspaceRoot}/coverage/{projectRoot}"],
        "options": {
            "jestConfig": layout.path("jest.config.ts"),
            "passWithNoTests": true
        }
    })
}

/// Add the build, lint and test tooling a project needs to the root manifest
pub(crate) fn add_tooling_dependencies(
    tree: &mut Tree,
    ctx: &GeneratorContext,
    compiler: Compiler,
    linter: Linter,
    unit_test_runner: UnitTestRunner,
) -> Result<bool> {
    let nx = ctx.nx_version.as_str();

    let mut dev = vec![
        ("@nrwl/js", nx),
        ("typescript", TYPESCRIPT_VERSION),
        ("@types/node", TYPES_NODE_VERSION),
    ];

    if compiler == Compiler::Swc {
        dev.extend([("@swc/core", SWC_CORE_VERSION), ("@swc/helpers", SWC_HELPERS_VERSION)]);
    }

    if linter.is_enabled() {
        dev.extend([
            ("@nrwl/linter", nx),
            ("@nrwl/eslint-plugin-nx", nx),
            ("eslint", ESLINT_VERSION),
            ("@typescript-eslint/parser", TYPESCRIPT_ESLINT_VERSION),
            ("@typescript-eslint/eslint-plugin", TYPESCRIPT_ESLINT_VERSION),
            ("jsonc-eslint-parser", JSONC_ESLINT_PARSER_VERSION),
        ]);
    }

    if unit_test_runner.is_enabled() {
        dev.extend([
            ("@nrwl/jest", nx),
            ("jest", JEST_VERSION),
            ("ts-jest", TS_JEST_VERSION),
            ("@types/jest", TYPES_JEST_VERSION),
        ]);
    }

    add_dependencies(tree, &[("tslib", TSLIB_VERSION)], &dev)
}
