//! File-name forms of project and package names

use regex::Regex;
use std::sync::LazyLock;

static WORD_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Z]?[a-z0-9]+|[A-Z]+(?:[a-z0-9]|$)|[A-Z]").expect("valid word regex")
});

/// kebab-case form of a name, used for directories and project names
///
/// Empty when the name has no ASCII alphanumeric characters.
pub fn file_name(name: &str) -> String {
    split_words(name).join("-")
}

fn split_words(name: &str) -> Vec<String> {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .flat_map(|segment| {
            WORD_BOUNDARY
                .find_iter(segment)
                .map(|m| m.as_str().to_lowercase())
                .collect::<Vec<_>>()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Project/directory name for a possibly scoped package name
///
/// `@acme/tools` and `create-@acme/tools-package` both become valid
/// directory names (`acme-tools`, `create-acme-tools-package`).
pub fn package_to_file_name(package: &str) -> String {
    file_name(&package.replace('@', "").replace('/', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_from_kebab_and_camel() {
        assert_eq!(file_name("my-nx-plugin"), "my-nx-plugin");
        assert_eq!(file_name("myPlugin2"), "my-plugin2");
        assert_eq!(file_name("My_Plugin"), "my-plugin");
        assert_eq!(file_name("."), "");
    }

    #[test]
    fn test_package_to_file_name() {
        assert_eq!(package_to_file_name("@acme/tools"), "acme-tools");
        assert_eq!(
            package_to_file_name("create-@acme/tools-package"),
            "create-acme-tools-package"
        );
        assert_eq!(package_to_file_name("create-tools-package"), "create-tools-package");
    }
}
