use colored::Colorize;
use std::collections::HashSet;

/// Knows which configuration keys smupdate reads, so typos in a config file
/// get reported instead of silently ignored.
pub struct ConfigValidator {
    /// Recognized `section.key` names for plain tables
    known_fields: HashSet<&'static str>,
    /// Recognized keys inside each `[[roots]]` entry
    root_fields: HashSet<&'static str>,
}

impl ConfigValidator {
    /// Create a new validator with known configuration fields
    #[must_use]
    pub fn new() -> Self {
        let known_fields = [
            "manifest.version",
            "manifest.notes",
            "manifest.output",
            "manifest.git_repo",
            "manifest.fallback_tag",
            "walk.order",
            "walk.follow_links",
        ]
        .into_iter()
        .collect();

        let root_fields = ["local", "remote", "classifier"].into_iter().collect();

        Self {
            known_fields,
            root_fields,
        }
    }

    /// Keys present in `content` that smupdate does not read.
    ///
    /// Content that is not valid TOML yields no keys; parse errors are
    /// reported by the real deserialization.
    #[must_use]
    pub fn unknown_keys(&self, content: &str) -> Vec<String> {
        let Ok(table) = content.parse::<toml::Table>() else {
            return Vec::new();
        };

        let mut unknown = Vec::new();
        for (section, value) in &table {
            match (section.as_str(), value) {
                ("roots", toml::Value::Array(roots)) => {
                    for (i, root) in roots.iter().enumerate() {
                        let Some(root) = root.as_table() else { continue };
                        for key in root.keys() {
                            if !self.root_fields.contains(key.as_str()) {
                                unknown.push(format!("roots[{i}].{key}"));
                            }
                        }
                    }
                }
                (_, toml::Value::Table(inner)) => {
                    for key in inner.keys() {
                        let full = format!("{section}.{key}");
                        if !self.known_fields.contains(full.as_str()) {
                            unknown.push(full);
                        }
                    }
                }
                _ => unknown.push(section.clone()),
            }
        }
        unknown
    }

    /// Print a warning for every unknown key in `content`.
    pub fn warn_unknown_keys(&self, content: &str) {
        for key in self.unknown_keys(content) {
            eprintln!(
                "{} Unknown configuration option '{}' will be ignored",
                "warning:".yellow().bold(),
                key
            );
        }
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys_pass() {
        let validator = ConfigValidator::new();
        let content = r#"
[manifest]
version = "1.0"
notes = []

[walk]
order = "bottom-up"

[[roots]]
local = "a"
remote = "Path_SM"
classifier = "scripting"
"#;
        assert!(validator.unknown_keys(content).is_empty());
    }

    #[test]
    fn test_unknown_keys_reported() {
        let validator = ConfigValidator::new();
        let content = r#"
stray = 1

[walk]
follow_symlinks = true

[[roots]]
local = "a"
remote = "Path_SM"
classifier = "scripting"
exclude = ["*.bak"]
"#;
        let unknown = validator.unknown_keys(content);
        assert_eq!(unknown.len(), 3);
        assert!(unknown.contains(&"stray".to_string()));
        assert!(unknown.contains(&"walk.follow_symlinks".to_string()));
        assert!(unknown.contains(&"roots[0].exclude".to_string()));
    }

    #[test]
    fn test_invalid_toml_has_no_keys() {
        assert!(ConfigValidator::new().unknown_keys("[[[").is_empty());
    }
}
