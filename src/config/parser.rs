//! Configuration document parsing (YAML format).

use std::path::Path;

use serde_yaml::Value;

use crate::common::error::{ConfigError, ConfigResult};
use crate::config::section::ConfigSection;

/// Load a configuration document from a YAML file.
pub fn load_document(name: &str, path: impl AsRef<Path>) -> ConfigResult<ConfigSection> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_document(name, &content)
}

/// Parse a configuration document from a YAML string.
///
/// An empty document is valid and yields an empty section.
pub fn parse_document(name: &str, content: &str) -> ConfigResult<ConfigSection> {
    if content.trim().is_empty() {
        return Ok(ConfigSection::empty(name));
    }

    let root: Value = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
        message: format!("{}: {}", name, e),
    })?;

    match root {
        Value::Mapping(_) => Ok(ConfigSection::new(name, root)),
        Value::Null => Ok(ConfigSection::empty(name)),
        _ => Err(ConfigError::ParseError {
            message: format!("{}: top level must be a mapping", name),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mapping() {
        let doc = parse_document("messages", "messages:\n  prefix: \"[x]\"\n").unwrap();
        assert_eq!(doc.document(), "messages");
        assert_eq!(doc.get_str("messages.prefix"), Some("[x]"));
    }

    #[test]
    fn test_parse_empty_is_ok() {
        let doc = parse_document("sounds", "   \n").unwrap();
        assert!(doc.keys().is_empty());
    }

    #[test]
    fn test_parse_rejects_scalar_root() {
        let result = parse_document("config", "just a string");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("mapping"));
    }

    #[test]
    fn test_parse_reports_syntax_errors() {
        let result = parse_document("config", "key: [unclosed");
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_document("config", "/definitely/not/here.yml");
        assert!(matches!(result, Err(ConfigError::IoError { .. })));
    }
}
