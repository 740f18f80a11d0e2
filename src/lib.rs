//! Concierge - command dispatch and templated chat feedback
//!
//! Commands are resolved from a label and arguments, gated on context,
//! permission and admin tier, then answered with configurable chat
//! templates and sound cues. Templates are filled by a priority-ordered
//! set of global and per-message placeholders.

pub mod command;
pub mod common;
pub mod config;
pub mod host;
pub mod output;
pub mod placeholder;
pub mod platform;
pub mod sound;
pub mod template;

pub use command::{Command, CommandContext, CommandRegistry, CommandSpec, Dispatcher, Outcome, Verdict};
pub use common::{AppError, BoundValue, SenderInfo};
pub use config::{ConfigStore, Settings};
pub use output::{ItemBuilder, ListMessageBuilder, MessageBuilder, OutputBuilder};
pub use placeholder::{LocalPlaceholder, Placeholder, PlaceholderRegistry};
pub use platform::Sender;
pub use template::{TemplateResolver, Templates};
