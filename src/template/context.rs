//! Shared render context.

use std::sync::Arc;

use crate::config::{ConfigSection, ConfigSource, Settings, MESSAGES_DOCUMENT};
use crate::placeholder::PlaceholderRegistry;
use crate::template::formatting::{colorize, join_nodes};
use crate::template::resolver::TemplateResolver;

/// Everything a builder needs to render: documents, settings and a resolver.
#[derive(Clone)]
pub struct Templates {
    source: Arc<dyn ConfigSource>,
    settings: Arc<Settings>,
    resolver: TemplateResolver,
}

impl Templates {
    /// Build a context over `registry`, sealing it.
    pub fn new(
        source: Arc<dyn ConfigSource>,
        settings: Arc<Settings>,
        registry: &PlaceholderRegistry,
    ) -> Self {
        let resolver = TemplateResolver::new(registry, settings.general.new_lines);
        Self {
            source,
            settings,
            resolver,
        }
    }

    /// Build a context with an explicit resolver.
    pub fn with_resolver(
        source: Arc<dyn ConfigSource>,
        settings: Arc<Settings>,
        resolver: TemplateResolver,
    ) -> Self {
        Self {
            source,
            settings,
            resolver,
        }
    }

    pub fn source(&self) -> &dyn ConfigSource {
        self.source.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn resolver(&self) -> &TemplateResolver {
        &self.resolver
    }

    /// Named document, or an empty one when it wasn't loaded.
    pub fn document(&self, name: &str) -> Arc<ConfigSection> {
        self.source
            .document(name)
            .unwrap_or_else(|| Arc::new(ConfigSection::empty(name)))
    }

    /// The `messages` document.
    pub fn messages(&self) -> Arc<ConfigSection> {
        self.document(MESSAGES_DOCUMENT)
    }

    /// Colourised chat prefix: `messages.prefix`, falling back to settings.
    pub fn prefix(&self) -> String {
        let messages = self.messages();
        colorize(&messages.string("messages.prefix", &self.settings.prefix))
    }

    /// Syntax string declared for a command under `commands.<node>.syntax`.
    pub fn command_syntax(&self, node: &str) -> String {
        join_nodes(&self.messages(), &[format!("commands.{}.syntax", node)])
    }

    /// Description declared for a command under `commands.<node>.description`.
    pub fn command_description(&self, node: &str) -> String {
        join_nodes(&self.messages(), &[format!("commands.{}.description", node)])
    }
}

impl std::fmt::Debug for Templates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Templates")
            .field("settings", &self.settings)
            .field("resolver", &self.resolver)
            .finish()
    }
}
