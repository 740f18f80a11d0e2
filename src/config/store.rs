//! Named configuration documents.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::common::error::{ConfigError, ConfigResult};
use crate::config::defaults;
use crate::config::parser::{load_document, parse_document};
use crate::config::section::ConfigSection;

/// Document holding general settings.
pub const CONFIG_DOCUMENT: &str = "config";
/// Document holding chat templates and command syntax strings.
pub const MESSAGES_DOCUMENT: &str = "messages";
/// Document holding sound cue groups.
pub const SOUNDS_DOCUMENT: &str = "sounds";
/// Document holding item tooltip definitions.
pub const INVENTORIES_DOCUMENT: &str = "inventories";

/// Supplies already-loaded configuration documents by logical name.
pub trait ConfigSource: Send + Sync {
    /// Returns the named document, if one was loaded.
    fn document(&self, name: &str) -> Option<Arc<ConfigSection>>;
}

/// In-memory configuration source.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    documents: HashMap<String, Arc<ConfigSection>>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the bundled default documents.
    pub fn with_defaults() -> Self {
        let mut store = Self::new();
        for (name, content) in defaults::DOCUMENTS {
            // Bundled documents are covered by tests; a broken one is skipped.
            if let Ok(section) = parse_document(name, content) {
                store.insert(section);
            }
        }
        store
    }

    /// Insert (or replace) a parsed document.
    pub fn insert(&mut self, section: ConfigSection) {
        debug!("Registered config document '{}'", section.document());
        self.documents
            .insert(section.document().to_string(), Arc::new(section));
    }

    /// Parse and insert a document from YAML text.
    pub fn insert_yaml(&mut self, name: &str, content: &str) -> ConfigResult<()> {
        self.insert(parse_document(name, content)?);
        Ok(())
    }

    /// Parse and insert a document from a YAML file.
    pub fn load_file(&mut self, name: &str, path: impl AsRef<Path>) -> ConfigResult<()> {
        self.insert(load_document(name, path)?);
        Ok(())
    }

    /// Load every `*.yml` / `*.yaml` file in a directory, keyed by file stem.
    ///
    /// Returns the number of documents loaded.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> ConfigResult<usize> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|e| ConfigError::IoError {
            path: dir.display().to_string(),
            source: e,
        })?;

        let mut loaded = 0;
        for entry in entries {
            let entry = entry.map_err(|e| ConfigError::IoError {
                path: dir.display().to_string(),
                source: e,
            })?;
            let path = entry.path();
            let is_yaml = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"))
                .unwrap_or(false);
            if !is_yaml {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let name = name.to_string();
            self.load_file(&name, &path)?;
            loaded += 1;
        }

        info!("Loaded {} config documents from {}", loaded, dir.display());
        Ok(loaded)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.documents.contains_key(name)
    }
}

impl ConfigSource for ConfigStore {
    fn document(&self, name: &str) -> Option<Arc<ConfigSection>> {
        self.documents.get(name).cloned()
    }
}
