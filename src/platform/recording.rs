//! In-memory recipient that records everything delivered to it.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use crate::output::{RenderedMessage, TitleDisplay};
use crate::platform::Sender;
use crate::sound::SoundCue;

/// One delivery made to a [`RecordingSender`].
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    Message(RenderedMessage),
    Overlay(String),
    Title(TitleDisplay),
    Sound(SoundCue),
}

/// Sender that keeps every delivery for later inspection.
#[derive(Debug)]
pub struct RecordingSender {
    name: String,
    interactive: bool,
    permissions: HashSet<String>,
    deliveries: Mutex<Vec<Delivery>>,
}

impl RecordingSender {
    /// An interactive sender with no permissions.
    pub fn player(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interactive: true,
            permissions: HashSet::new(),
            deliveries: Mutex::new(Vec::new()),
        }
    }

    /// A non-interactive sender with no permissions.
    pub fn console() -> Self {
        Self {
            interactive: false,
            ..Self::player("CONSOLE")
        }
    }

    pub fn with_permission(mut self, node: impl Into<String>) -> Self {
        self.permissions.insert(node.into());
        self
    }

    fn record(&self, delivery: Delivery) {
        self.deliveries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(delivery);
    }

    /// Everything delivered so far, in order.
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Text of every chat message delivered.
    pub fn messages(&self) -> Vec<String> {
        self.deliveries()
            .into_iter()
            .filter_map(|d| match d {
                Delivery::Message(message) => Some(message.text),
                _ => None,
            })
            .collect()
    }

    /// Every sound cue played.
    pub fn sounds(&self) -> Vec<SoundCue> {
        self.deliveries()
            .into_iter()
            .filter_map(|d| match d {
                Delivery::Sound(cue) => Some(cue),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.deliveries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Sender for RecordingSender {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn has_permission(&self, node: &str) -> bool {
        self.permissions.contains(node)
    }

    fn send_message(&self, message: &RenderedMessage) {
        self.record(Delivery::Message(message.clone()));
    }

    fn send_overlay(&self, text: &str) {
        self.record(Delivery::Overlay(text.to_string()));
    }

    fn send_title(&self, title: &TitleDisplay) {
        self.record(Delivery::Title(title.clone()));
    }

    fn play_sound(&self, cue: &SoundCue) {
        self.record(Delivery::Sound(cue.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let sender = RecordingSender::player("Ann");
        sender.send_message(&RenderedMessage::plain("one"));
        sender.send_overlay("two");
        sender.send_message(&RenderedMessage::plain("three"));

        assert_eq!(sender.messages(), vec!["one", "three"]);
        assert_eq!(sender.deliveries().len(), 3);

        sender.clear();
        assert!(sender.deliveries().is_empty());
    }

    #[test]
    fn test_permissions() {
        let sender = RecordingSender::player("Ann").with_permission("x.use");
        assert!(sender.has_permission("x.use"));
        assert!(!sender.has_permission("x.admin"));
        assert!(!RecordingSender::console().is_interactive());
    }
}
