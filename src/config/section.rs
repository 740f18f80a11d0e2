//! Path-addressable view over a parsed configuration document.
//!
//! Paths are `.`-separated keys (`messages.no-permission`). Every typed
//! lookup takes a default so callers never have to handle missing keys.

use serde_yaml::Value;

/// A configuration document or a nested section of one.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSection {
    /// Logical document name (`messages`, `sounds`, ...).
    document: String,
    /// Path of this section inside the document (empty for the root).
    path: String,
    root: Value,
}

impl ConfigSection {
    /// Wrap a parsed document root.
    pub fn new(document: impl Into<String>, root: Value) -> Self {
        Self {
            document: document.into(),
            path: String::new(),
            root,
        }
    }

    /// An empty document, used when nothing was loaded.
    pub fn empty(document: impl Into<String>) -> Self {
        Self::new(document, Value::Mapping(Default::default()))
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn current_path(&self) -> &str {
        &self.path
    }

    /// Fully qualified name of a node below this section, for diagnostics.
    pub fn qualified(&self, node: &str) -> String {
        let mut out = self.document.clone();
        for part in [self.path.as_str(), node] {
            if !part.is_empty() {
                out.push('.');
                out.push_str(part);
            }
        }
        out
    }

    fn lookup(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(&self.root);
        }
        path.split('.').try_fold(&self.root, |value, key| child(value, key))
    }

    /// Whether anything (other than null) exists at `path`.
    pub fn contains(&self, path: &str) -> bool {
        matches!(self.lookup(path), Some(value) if !value.is_null())
    }

    pub fn is_section(&self, path: &str) -> bool {
        matches!(self.lookup(path), Some(Value::Mapping(_)))
    }

    pub fn is_list(&self, path: &str) -> bool {
        matches!(self.lookup(path), Some(Value::Sequence(_)))
    }

    /// Raw string at `path` without scalar conversion.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.lookup(path).and_then(Value::as_str)
    }

    /// Scalar at `path` rendered as a string (numbers and booleans included).
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.lookup(path).and_then(scalar_to_string)
    }

    pub fn string(&self, path: &str, default: &str) -> String {
        self.get_string(path).unwrap_or_else(|| default.to_string())
    }

    pub fn int(&self, path: &str, default: i64) -> i64 {
        match self.lookup(path) {
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(default),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }

    pub fn float(&self, path: &str, default: f64) -> f64 {
        match self.lookup(path) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(default),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }

    pub fn boolean(&self, path: &str, default: bool) -> bool {
        match self.lookup(path) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => match s.to_lowercase().as_str() {
                "true" | "yes" | "on" => true,
                "false" | "no" | "off" => false,
                _ => default,
            },
            _ => default,
        }
    }

    /// String list at `path`. Non-list values yield an empty list.
    pub fn string_list(&self, path: &str) -> Vec<String> {
        match self.lookup(path) {
            Some(Value::Sequence(items)) => items.iter().filter_map(scalar_to_string).collect(),
            _ => Vec::new(),
        }
    }

    /// Nested section at `path`, if it is a mapping.
    pub fn section(&self, path: &str) -> Option<ConfigSection> {
        match self.lookup(path) {
            Some(value @ Value::Mapping(_)) => Some(ConfigSection {
                document: self.document.clone(),
                path: if self.path.is_empty() {
                    path.to_string()
                } else {
                    format!("{}.{}", self.path, path)
                },
                root: value.clone(),
            }),
            _ => None,
        }
    }

    /// Top-level keys of this section, in document order.
    pub fn keys(&self) -> Vec<String> {
        match &self.root {
            Value::Mapping(map) => map.keys().filter_map(scalar_to_string).collect(),
            _ => Vec::new(),
        }
    }

    /// The underlying value tree.
    pub fn value(&self) -> &Value {
        &self.root
    }
}

/// Child of a mapping by key; numeric keys (`1:`) match their string form.
fn child<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    let Value::Mapping(map) = value else {
        return None;
    };
    map.get(key).or_else(|| {
        map.iter()
            .find(|(k, _)| !k.is_string() && scalar_to_string(k).as_deref() == Some(key))
            .map(|(_, v)| v)
    })
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_section() -> ConfigSection {
        let root: Value = serde_yaml::from_str(
            r#"
messages:
  prefix: "&8[&6Test&8]"
  no-permission: "&cNo permission."
  count: 3
  ratio: 0.5
  flag: yes
  lines:
    - "first"
    - "second"
    - 3
"#,
        )
        .unwrap();
        ConfigSection::new("messages", root)
    }

    #[test]
    fn test_nested_lookup() {
        let section = make_section();
        assert_eq!(section.get_str("messages.prefix"), Some("&8[&6Test&8]"));
        assert_eq!(section.get_str("messages.missing"), None);
        assert!(section.contains("messages.no-permission"));
    }

    #[test]
    fn test_typed_defaults() {
        let section = make_section();
        assert_eq!(section.int("messages.count", 0), 3);
        assert_eq!(section.int("messages.missing", 7), 7);
        assert_eq!(section.float("messages.ratio", 1.0), 0.5);
        assert!(section.boolean("messages.missing", true));
        assert_eq!(section.string("messages.missing", "fallback"), "fallback");
        assert_eq!(section.string("messages.count", ""), "3");
    }

    #[test]
    fn test_string_list() {
        let section = make_section();
        assert_eq!(section.string_list("messages.lines"), vec!["first", "second", "3"]);
        assert!(section.string_list("messages.prefix").is_empty());
        assert!(section.is_list("messages.lines"));
    }

    #[test]
    fn test_subsection_paths() {
        let section = make_section();
        let messages = section.section("messages").unwrap();
        assert_eq!(messages.current_path(), "messages");
        assert_eq!(messages.get_str("prefix"), Some("&8[&6Test&8]"));
        assert_eq!(messages.qualified("gone"), "messages.messages.gone");
        assert!(messages.keys().contains(&"no-permission".to_string()));
        assert!(section.section("messages.prefix").is_none());
    }

    #[test]
    fn test_numeric_keys() {
        let root: Value = serde_yaml::from_str("sounds:\n  1:\n    pitch: 0.7\n").unwrap();
        let section = ConfigSection::new("sounds", root);
        let cues = section.section("sounds").unwrap();

        assert_eq!(cues.keys(), vec!["1"]);
        assert_eq!(cues.float("1.pitch", 1.0), 0.7);
        assert!(cues.section("1").is_some());
    }
}
