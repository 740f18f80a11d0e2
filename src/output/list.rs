//! Multi-line message builder backed by a string list node.

use tracing::{debug, warn};

use crate::config::ConfigSection;
use crate::output::builder::{OutputBuilder, RenderOptions};
use crate::output::message::RenderedMessage;
use crate::template::formatting::colorize;
use crate::template::Templates;

/// Builder for a list of lines read from one template node.
#[derive(Debug, Clone)]
pub struct ListMessageBuilder {
    node: String,
    section: Option<ConfigSection>,
    options: RenderOptions,
}

impl ListMessageBuilder {
    /// Lines from `node` of the `messages` document.
    pub fn new(node: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            section: None,
            options: RenderOptions::default(),
        }
    }

    /// Read the node from `section` instead of the `messages` document.
    pub fn from_section(mut self, section: ConfigSection) -> Self {
        self.section = Some(section);
        self
    }

    /// Raw lines of the node, or an inline error line when it isn't a list.
    fn raw_lines(&self, templates: &Templates) -> Vec<String> {
        let messages;
        let section = match &self.section {
            Some(section) => section,
            None => {
                messages = templates.messages();
                messages.as_ref()
            }
        };
        if !section.is_list(&self.node) {
            let qualified = section.qualified(&self.node);
            warn!("Missing template list {}", qualified);
            return vec![format!("Error {}", qualified)];
        }
        section.string_list(&self.node)
    }

    /// Resolve every line; only the first carries the prefix.
    ///
    /// The prefix is added after resolution, as for single messages.
    pub fn get(&self, templates: &Templates) -> Vec<String> {
        let mut lines: Vec<String> = self
            .raw_lines(templates)
            .iter()
            .map(|line| {
                templates.resolver().resolve(
                    &colorize(line),
                    &self.options.locals,
                    self.options.default_value.as_ref(),
                )
            })
            .collect();

        if self.options.prefix {
            let prefix = templates.prefix();
            if let Some(first) = lines.first_mut().filter(|_| !prefix.is_empty()) {
                *first = format!("{} {}", prefix, first);
            }
        }
        lines
    }

    /// Deliver every line, in order, to every recipient.
    pub fn send(&self, templates: &Templates) {
        if self.options.recipients.is_empty() {
            debug!("List message '{}' has no recipients", self.node);
            return;
        }
        let lines: Vec<RenderedMessage> = self
            .get(templates)
            .into_iter()
            .map(RenderedMessage::plain)
            .collect();
        for recipient in &self.options.recipients {
            for line in &lines {
                recipient.send_message(line);
            }
        }
    }
}

impl OutputBuilder for ListMessageBuilder {
    fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::{parse_document, ConfigStore, Settings};
    use crate::platform::RecordingSender;
    use crate::template::TemplateResolver;

    fn templates() -> Templates {
        let mut store = ConfigStore::new();
        store
            .insert_yaml(
                "messages",
                "messages:\n  prefix: \"[P]\"\n  rules:\n    - \"&6Rule one: %x%\"\n    - \"Rule two\"\n",
            )
            .unwrap();
        Templates::with_resolver(
            Arc::new(store),
            Arc::new(Settings::default()),
            TemplateResolver::standalone(),
        )
    }

    #[test]
    fn test_prefix_on_first_line_only() {
        let t = templates();
        let lines = ListMessageBuilder::new("messages.rules").replace("%x%", "be kind").get(&t);
        assert_eq!(lines, vec!["[P] §6Rule one: be kind", "Rule two"]);
    }

    #[test]
    fn test_missing_node_renders_inline_error() {
        let t = templates();
        let ann = Arc::new(RecordingSender::player("Ann"));

        ListMessageBuilder::new("messages.none").to(ann.clone()).send(&t);
        assert_eq!(ann.messages(), vec!["[P] Error messages.messages.none"]);

        let scalar = ListMessageBuilder::new("messages.prefix").without_prefix().get(&t);
        assert_eq!(scalar, vec!["Error messages.messages.prefix"]);
    }

    #[test]
    fn test_prefix_added_after_resolution() {
        let mut store = ConfigStore::new();
        store
            .insert_yaml(
                "messages",
                "messages:\n  prefix: \"[%x%]%nl%\"\n  rules:\n    - \"%x%\"\n",
            )
            .unwrap();
        let t = Templates::with_resolver(
            Arc::new(store),
            Arc::new(Settings::default()),
            TemplateResolver::standalone(),
        );

        let lines = ListMessageBuilder::new("messages.rules").replace("%x%", "one").get(&t);
        assert_eq!(lines, vec!["[%x%]%nl% one"]);
    }

    #[test]
    fn test_from_section() {
        let t = templates();
        let doc = parse_document("inventories", "shop:\n  lines:\n    - a\n    - b\n").unwrap();
        let lines = ListMessageBuilder::new("shop.lines")
            .from_section(doc)
            .without_prefix()
            .get(&t);
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_send_preserves_line_order_per_recipient() {
        let t = templates();
        let a = Arc::new(RecordingSender::player("Ann"));
        let b = Arc::new(RecordingSender::player("Bob"));

        ListMessageBuilder::new("messages.rules")
            .without_prefix()
            .replace("%x%", "1")
            .to(a.clone())
            .to(b.clone())
            .send(&t);

        let expected = vec!["§6Rule one: 1".to_string(), "Rule two".to_string()];
        assert_eq!(a.messages(), expected);
        assert_eq!(b.messages(), expected);
    }
}
