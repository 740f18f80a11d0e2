//! Configuration type definitions.

use serde::Deserialize;

use crate::common::error::{ConfigError, ConfigResult};
use crate::config::section::ConfigSection;
use crate::config::store::{ConfigSource, CONFIG_DOCUMENT};

/// Default cap on escape-expansion passes per render.
pub const DEFAULT_NEW_LINES: u32 = 4;

/// Root settings structure, read from the `config` document.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Host/plugin name; also forms the admin permission node.
    pub name: String,
    /// Fallback chat prefix when `messages.prefix` is absent.
    pub prefix: String,
    /// Enables debug-level logging in the console host.
    pub debug: bool,
    pub general: GeneralSettings,
}

/// `general` block.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Maximum number of escape-expansion passes.
    #[serde(rename = "new-lines")]
    pub new_lines: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: "concierge".to_string(),
            prefix: "&8[&6Concierge&8]".to_string(),
            debug: false,
            general: GeneralSettings::default(),
        }
    }
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            new_lines: DEFAULT_NEW_LINES,
        }
    }
}

impl Settings {
    /// Deserialize settings from a parsed `config` document.
    pub fn from_section(section: &ConfigSection) -> ConfigResult<Self> {
        serde_yaml::from_value(section.value().clone()).map_err(|e| ConfigError::ParseError {
            message: format!("{}: {}", section.document(), e),
        })
    }

    /// Read settings from a source, using defaults when no `config` document exists.
    pub fn from_source(source: &dyn ConfigSource) -> ConfigResult<Self> {
        match source.document(CONFIG_DOCUMENT) {
            Some(section) => Self::from_section(&section),
            None => Ok(Self::default()),
        }
    }

    /// Permission node granting admin-tier commands (`<name>.admin`).
    pub fn admin_node(&self) -> String {
        format!("{}.admin", self.name.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parser::parse_document;
    use crate::config::store::ConfigStore;

    #[test]
    fn test_settings_from_document() {
        let doc = parse_document(
            "config",
            "name: Mines\nprefix: \"[M]\"\ndebug: true\ngeneral:\n  new-lines: 2\n",
        )
        .unwrap();
        let settings = Settings::from_section(&doc).unwrap();

        assert_eq!(settings.name, "Mines");
        assert_eq!(settings.prefix, "[M]");
        assert!(settings.debug);
        assert_eq!(settings.general.new_lines, 2);
        assert_eq!(settings.admin_node(), "mines.admin");
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let doc = parse_document("config", "debug: true\n").unwrap();
        let settings = Settings::from_section(&doc).unwrap();

        assert_eq!(settings.name, "concierge");
        assert_eq!(settings.general.new_lines, DEFAULT_NEW_LINES);
    }

    #[test]
    fn test_missing_document_uses_defaults() {
        let store = ConfigStore::new();
        let settings = Settings::from_source(&store).unwrap();
        assert_eq!(settings.admin_node(), "concierge.admin");
    }

    #[test]
    fn test_wrong_type_is_parse_error() {
        let doc = parse_document("config", "general:\n  new-lines: lots\n").unwrap();
        assert!(matches!(
            Settings::from_section(&doc),
            Err(ConfigError::ParseError { .. })
        ));
    }
}
