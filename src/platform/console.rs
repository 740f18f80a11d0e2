//! Console sender for the standalone host.

use crate::output::RenderedMessage;
use crate::platform::Sender;
use crate::template::formatting::strip_colors;

/// Non-interactive sender with every permission. Writes plain text to stdout.
#[derive(Debug, Clone)]
pub struct ConsoleSender {
    name: String,
}

impl ConsoleSender {
    pub fn new() -> Self {
        Self {
            name: "CONSOLE".to_string(),
        }
    }
}

impl Default for ConsoleSender {
    fn default() -> Self {
        Self::new()
    }
}

impl Sender for ConsoleSender {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_interactive(&self) -> bool {
        false
    }

    fn has_permission(&self, _node: &str) -> bool {
        true
    }

    fn send_message(&self, message: &RenderedMessage) {
        for line in message.lines() {
            println!("{}", strip_colors(line));
        }
    }
}
