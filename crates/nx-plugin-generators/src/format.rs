//! Formatting pass over staged files

use crate::error::Result;
use crate::tree::Tree;
use camino::Utf8Path;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use tracing::debug;

/// Extensions treated as text and normalized
const TEXT_EXTENSIONS: &[&str] = &[
    "ts", "js", "mjs", "cjs", "md", "yml", "yaml", "txt", "gitignore", "prettierrc",
    "editorconfig", "prettierignore",
];

/// Formatting options
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    pub indent_width: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self { indent_width: 2 }
    }
}

/// Format every file with a staged write
///
/// JSON files are re-serialized with consistent indentation; other text
/// files get trailing whitespace trimmed and exactly one final newline.
/// Files that fail to parse are left untouched. Returns the formatted paths.
pub fn format_files(tree: &mut Tree, options: &FormatOptions) -> Result<Vec<String>> {
    let mut formatted = Vec::new();

    for path in tree.staged_writes() {
        let Some(content) = tree.read_to_string(&path).ok().flatten() else {
            continue;
        };

        let result = if is_json(&path) {
            format_json(&content, options.indent_width)
        } else if is_text(&path) {
            Some(format_text(&content))
        } else {
            None
        };

        match result {
            Some(output) if output != content => {
                tree.write(&path, output)?;
                formatted.push(path.to_string());
            }
            Some(_) => {}
            None => debug!("Skipping format for {}", path),
        }
    }

    Ok(formatted)
}

fn is_json(path: &Utf8Path) -> bool {
    matches!(path.extension(), Some("json"))
}

fn is_text(path: &Utf8Path) -> bool {
    let ext = path
        .extension()
        .or_else(|| path.file_name().map(|n| n.trim_start_matches('.')));
    ext.is_some_and(|e| TEXT_EXTENSIONS.contains(&e))
}

/// Re-serialize JSON with the given indentation
pub fn format_json(content: &str, indent_width: usize) -> Option<String> {
    let value: Value = serde_json::from_str(content).ok()?;

    let indent = " ".repeat(indent_width);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer).ok()?;

    let mut output = String::from_utf8(buf).ok()?;
    output.push('\n');
    Some(output)
}

/// Trim trailing whitespace and end with exactly one newline
pub fn format_text(content: &str) -> String {
    let mut output = content
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");

    while output.ends_with('\n') {
        output.pop();
    }
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_json_keeps_key_order() {
        let formatted = format_json(r#"{"name":"tools","version":"0.0.1","a":[1,2]}"#, 2).unwrap();
        assert_eq!(
            formatted,
            "{\n  \"name\": \"tools\",\n  \"version\": \"0.0.1\",\n  \"a\": [\n    1,\n    2\n  ]\n}\n"
        );
    }

    #[test]
    fn test_format_json_rejects_comments() {
        assert!(format_json("{ // comment\n}", 2).is_none());
    }

    #[test]
    fn test_format_text() {
        assert_eq!(format_text("a  \nb\t\n\n\n"), "a\nb\n");
        assert_eq!(format_text("no newline"), "no newline\n");
    }

    #[test]
    fn test_format_files_only_touches_staged() {
        let temp = TempDir::new().unwrap();
        let mut tree = Tree::new(camino::Utf8PathBuf::from_path_buf(temp.path().into()).unwrap());
        std::fs::write(tree.root().join("untouched.json"), "{\"a\":1}").unwrap();

        tree.write("package.json", "{\"name\":\"x\"}").unwrap();
        tree.write("src/index.ts", "export * from './lib';   ").unwrap();
        tree.write("logo.png", vec![0u8, 1, 2]).unwrap();

        let formatted = format_files(&mut tree, &FormatOptions { indent_width: 4 }).unwrap();
        assert_eq!(formatted, vec!["package.json", "src/index.ts"]);
        assert_eq!(
            tree.read_to_string("package.json").unwrap().unwrap(),
            "{\n    \"name\": \"x\"\n}\n"
        );
        assert_eq!(
            tree.read_to_string("untouched.json").unwrap().unwrap(),
            "{\"a\":1}"
        );
    }
}
