//! Host platform seam.
//!
//! The pipeline talks to recipients only through [`Sender`]: permission
//! checks, drawing text and playing sounds are the host's business.

mod console;
mod recording;

pub use console::ConsoleSender;
pub use recording::{Delivery, RecordingSender};

use crate::common::types::SenderInfo;
use crate::output::{RenderedMessage, TitleDisplay};
use crate::sound::SoundCue;

/// A command invoker and message recipient.
pub trait Sender: Send + Sync {
    fn name(&self) -> &str;

    /// Whether this is a player-like, interactive context.
    fn is_interactive(&self) -> bool;

    /// Permission evaluator for this sender.
    fn has_permission(&self, node: &str) -> bool;

    /// Deliver one chat message.
    fn send_message(&self, message: &RenderedMessage);

    /// Show a transient overlay line.
    fn send_overlay(&self, _text: &str) {}

    /// Show a timed title.
    fn send_title(&self, _title: &TitleDisplay) {}

    /// Play a sound cue now.
    fn play_sound(&self, _cue: &SoundCue) {}

    /// Snapshot used as a bound value for sender placeholders.
    fn info(&self) -> SenderInfo {
        SenderInfo {
            name: self.name().to_string(),
            interactive: self.is_interactive(),
        }
    }
}
