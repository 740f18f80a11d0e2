//! Chat message builder.
//!
//! A message is read from one or more template nodes (by default in the
//! `messages` document), resolved, prefixed and delivered as a chat line,
//! an overlay or a timed title.

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ConfigSection;
use crate::output::builder::{OutputBuilder, RenderOptions};
use crate::template::formatting::{colorize, join_nodes};
use crate::template::Templates;

/// Title timing defaults, in ticks.
pub const DEFAULT_FADE_IN: u32 = 20;
pub const DEFAULT_STAY: u32 = 200;
pub const DEFAULT_FADE_OUT: u32 = 20;

/// What a click on the message does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum ClickAction {
    RunCommand(String),
    SuggestCommand(String),
    OpenUrl(String),
    CopyToClipboard(String),
}

impl ClickAction {
    fn value(&self) -> &str {
        match self {
            Self::RunCommand(v) | Self::SuggestCommand(v) | Self::OpenUrl(v) | Self::CopyToClipboard(v) => v,
        }
    }

    fn with_value(&self, value: String) -> Self {
        match self {
            Self::RunCommand(_) => Self::RunCommand(value),
            Self::SuggestCommand(_) => Self::SuggestCommand(value),
            Self::OpenUrl(_) => Self::OpenUrl(value),
            Self::CopyToClipboard(_) => Self::CopyToClipboard(value),
        }
    }
}

/// A fully resolved chat message.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMessage {
    pub text: String,
    pub click: Option<ClickAction>,
    pub hover: Option<String>,
}

#[derive(Serialize)]
struct HoverEvent<'a> {
    action: &'static str,
    contents: &'a str,
}

#[derive(Serialize)]
struct Component<'a> {
    text: &'a str,
    #[serde(rename = "clickEvent", skip_serializing_if = "Option::is_none")]
    click_event: Option<&'a ClickAction>,
    #[serde(rename = "hoverEvent", skip_serializing_if = "Option::is_none")]
    hover_event: Option<HoverEvent<'a>>,
}

impl RenderedMessage {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            click: None,
            hover: None,
        }
    }

    /// Lines of the message, in order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    /// Chat component JSON carrying the click and hover payload.
    pub fn to_component_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&Component {
            text: &self.text,
            click_event: self.click.as_ref(),
            hover_event: self.hover.as_deref().map(|contents| HoverEvent {
                action: "show_text",
                contents,
            }),
        })
    }
}

/// A resolved title display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleDisplay {
    pub title: String,
    pub subtitle: String,
    pub fade_in: u32,
    pub stay: u32,
    pub fade_out: u32,
}

#[derive(Debug, Clone)]
enum Source {
    /// Nodes of the `messages` document.
    Nodes(Vec<String>),
    /// Nodes of an explicit section.
    Section(ConfigSection, Vec<String>),
    /// Literal template text.
    Literal(String),
}

/// Builder for chat messages, overlays and titles.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    source: Source,
    options: RenderOptions,
    click: Option<ClickAction>,
    hover: Option<String>,
}

impl MessageBuilder {
    /// A message made of `messages` document nodes joined by spaces.
    pub fn new<S: Into<String>>(nodes: impl IntoIterator<Item = S>) -> Self {
        Self::from_source(Source::Nodes(nodes.into_iter().map(Into::into).collect()))
    }

    /// A message from a single `messages` document node.
    pub fn node(node: impl Into<String>) -> Self {
        Self::new([node.into()])
    }

    /// A message from literal template text.
    pub fn literal(text: impl Into<String>) -> Self {
        Self::from_source(Source::Literal(text.into()))
    }

    fn from_source(source: Source) -> Self {
        Self {
            source,
            options: RenderOptions::default(),
            click: None,
            hover: None,
        }
    }

    /// Read the nodes from `section` instead of the `messages` document.
    pub fn from_section(mut self, section: ConfigSection) -> Self {
        self.source = match self.source {
            Source::Nodes(nodes) | Source::Section(_, nodes) => Source::Section(section, nodes),
            literal @ Source::Literal(_) => literal,
        };
        self
    }

    pub fn with_click(mut self, click: ClickAction) -> Self {
        self.click = Some(click);
        self
    }

    pub fn with_hover(mut self, hover: impl Into<String>) -> Self {
        self.hover = Some(hover.into());
        self
    }

    fn raw(&self, templates: &Templates) -> String {
        match &self.source {
            Source::Nodes(nodes) => join_nodes(&templates.messages(), nodes),
            Source::Section(section, nodes) => join_nodes(section, nodes),
            Source::Literal(text) => colorize(text),
        }
    }

    fn resolve(&self, templates: &Templates, raw: &str) -> String {
        templates.resolver().resolve(
            raw,
            &self.options.locals,
            self.options.default_value.as_ref(),
        )
    }

    /// Resolve the message text, prefixed when enabled.
    pub fn text(&self, templates: &Templates) -> String {
        let resolved = self.resolve(templates, &self.raw(templates));
        let resolved = resolved.trim();
        if !self.options.prefix {
            return resolved.to_string();
        }
        let prefix = templates.prefix();
        if prefix.is_empty() {
            resolved.to_string()
        } else {
            format!("{} {}", prefix, resolved)
        }
    }

    /// Resolve the message with its click and hover payload.
    pub fn get(&self, templates: &Templates) -> RenderedMessage {
        RenderedMessage {
            text: self.text(templates),
            click: self
                .click
                .as_ref()
                .map(|click| click.with_value(self.resolve(templates, click.value()))),
            hover: self
                .hover
                .as_ref()
                .map(|hover| self.resolve(templates, &colorize(hover))),
        }
    }

    /// Deliver the message to every recipient.
    pub fn send(&self, templates: &Templates) {
        if self.options.recipients.is_empty() {
            debug!("Message has no recipients");
            return;
        }
        let message = self.get(templates);
        for recipient in &self.options.recipients {
            recipient.send_message(&message);
        }
    }

    /// Deliver the message as an overlay to interactive recipients.
    pub fn send_overlay(&self, templates: &Templates) {
        let text = self.text(templates).replace('\n', "");
        for recipient in self.options.recipients.iter().filter(|r| r.is_interactive()) {
            recipient.send_overlay(&text);
        }
    }

    /// Read the title section named by the single node.
    ///
    /// The section holds `enabled`, `title`, `subtitle`, `fadeIn`, `stay` and
    /// `fadeOut`. Returns `None` when the section is disabled.
    pub fn title(&self, templates: &Templates) -> Option<TitleDisplay> {
        let (section, node) = match &self.source {
            Source::Nodes(nodes) if nodes.len() == 1 => (templates.messages().as_ref().clone(), &nodes[0]),
            Source::Section(section, nodes) if nodes.len() == 1 => (section.clone(), &nodes[0]),
            _ => {
                warn!("A title needs exactly one template node");
                return None;
            }
        };
        if !section.boolean(&format!("{}.enabled", node), false) {
            return None;
        }

        let line = |key: &str| {
            let raw = colorize(&section.string(&format!("{}.{}", node, key), ""));
            self.resolve(templates, &raw).replace('\n', "")
        };
        let ticks = |key: &str, default: u32| {
            let value = section.int(&format!("{}.{}", node, key), i64::from(default));
            u32::try_from(value).unwrap_or(default)
        };

        Some(TitleDisplay {
            title: line("title"),
            subtitle: line("subtitle"),
            fade_in: ticks("fadeIn", DEFAULT_FADE_IN),
            stay: ticks("stay", DEFAULT_STAY),
            fade_out: ticks("fadeOut", DEFAULT_FADE_OUT),
        })
    }

    /// Deliver the title to interactive recipients, if enabled.
    pub fn send_title(&self, templates: &Templates) {
        let Some(title) = self.title(templates) else {
            return;
        };
        for recipient in self.options.recipients.iter().filter(|r| r.is_interactive()) {
            recipient.send_title(&title);
        }
    }
}

impl OutputBuilder for MessageBuilder {
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
    use crate::common::types::{BoundValue, SenderInfo};
    use crate::config::{ConfigStore, Settings};
    use crate::placeholder::{Placeholder, PlaceholderRegistry};
    use crate::platform::{Delivery, RecordingSender, Sender};

    const MESSAGES: &str = r#"
messages:
  prefix: "&8[Test]"
  greeting: "Hi %player%"
  farewell: "&7Bye%newline%now"
  welcome:
    enabled: true
    title: "&6Welcome %player%"
    subtitle: "line%nl%break"
    stay: 100
  hidden:
    enabled: false
    title: "secret"
"#;

    fn templates() -> Templates {
        let mut store = ConfigStore::new();
        store.insert_yaml("messages", MESSAGES).unwrap();
        let registry = PlaceholderRegistry::new();
        registry
            .register(Placeholder::for_sender(["%player%"], |info| info.name.clone()).with_priority(50))
            .unwrap();
        Templates::new(Arc::new(store), Arc::new(Settings::default()), &registry)
    }

    fn ann() -> BoundValue {
        BoundValue::Sender(SenderInfo::player("Ann"))
    }

    #[test]
    fn test_prefix_applied_once() {
        let t = templates();
        let text = MessageBuilder::node("messages.farewell").text(&t);
        assert_eq!(text, "§8[Test] §7Bye\nnow");
    }

    #[test]
    fn test_without_prefix_and_default_value() {
        let t = templates();
        let text = MessageBuilder::node("messages.greeting")
            .without_prefix()
            .with_default_value(ann())
            .text(&t);
        assert_eq!(text, "Hi Ann");
    }

    #[test]
    fn test_multiple_nodes_and_missing_node() {
        let t = templates();
        let text = MessageBuilder::new(["messages.greeting", "messages.nope"])
            .without_prefix()
            .text(&t);
        assert_eq!(text, "Hi %player% Error messages.messages.nope");
    }

    #[test]
    fn test_send_to_no_recipients_is_noop() {
        let t = templates();
        MessageBuilder::node("messages.greeting").send(&t);
    }

    #[test]
    fn test_send_delivers_to_every_recipient() {
        let t = templates();
        let a = Arc::new(RecordingSender::player("Ann"));
        let b = Arc::new(RecordingSender::console());

        MessageBuilder::literal("&aHello %who%")
            .without_prefix()
            .replace("%who%", "all")
            .to(a.clone())
            .to(b.clone())
            .send(&t);

        assert_eq!(a.messages(), vec!["§aHello all"]);
        assert_eq!(b.messages(), vec!["§aHello all"]);
    }

    #[test]
    fn test_click_and_hover_are_resolved() {
        let t = templates();
        let message = MessageBuilder::literal("Click me")
            .without_prefix()
            .replace("%cmd%", "/help")
            .with_click(ClickAction::RunCommand("%cmd%".to_string()))
            .with_hover("&7Runs %cmd%")
            .get(&t);

        assert_eq!(message.click, Some(ClickAction::RunCommand("/help".to_string())));
        assert_eq!(message.hover.as_deref(), Some("§7Runs /help"));

        let json: serde_json::Value = serde_json::from_str(&message.to_component_json().unwrap()).unwrap();
        assert_eq!(json["text"], "Click me");
        assert_eq!(json["clickEvent"]["action"], "run_command");
        assert_eq!(json["clickEvent"]["value"], "/help");
        assert_eq!(json["hoverEvent"]["contents"], "§7Runs /help");
    }

    #[test]
    fn test_plain_component_has_no_events() {
        let json = RenderedMessage::plain("hi").to_component_json().unwrap();
        assert_eq!(json, r#"{"text":"hi"}"#);
    }

    #[test]
    fn test_overlay_strips_newlines_and_skips_console() {
        let t = templates();
        let player = Arc::new(RecordingSender::player("Ann"));
        let console = Arc::new(RecordingSender::console());

        MessageBuilder::node("messages.farewell")
            .without_prefix()
            .to(player.clone())
            .to(console.clone())
            .send_overlay(&t);

        assert_eq!(player.deliveries(), vec![Delivery::Overlay("§7Byenow".to_string())]);
        assert!(console.deliveries().is_empty());
    }

    #[test]
    fn test_title_reads_section() {
        let t = templates();
        let title = MessageBuilder::node("messages.welcome")
            .with_default_value(ann())
            .title(&t)
            .unwrap();

        assert_eq!(title.title, "§6Welcome Ann");
        assert_eq!(title.subtitle, "linebreak");
        assert_eq!(title.fade_in, DEFAULT_FADE_IN);
        assert_eq!(title.stay, 100);
        assert_eq!(title.fade_out, DEFAULT_FADE_OUT);
    }

    #[test]
    fn test_disabled_title_is_skipped() {
        let t = templates();
        let player = Arc::new(RecordingSender::player("Ann"));
        MessageBuilder::node("messages.hidden")
            .to(player.clone() as Arc<dyn Sender>)
            .send_title(&t);

        assert!(player.deliveries().is_empty());
        assert!(MessageBuilder::new(["a", "b"]).title(&t).is_none());
    }
}
