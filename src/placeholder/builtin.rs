//! Built-in global placeholders.

use chrono::Local;

use crate::common::error::RegistryError;
use crate::config::Settings;
use crate::placeholder::placeholder::Placeholder;
use crate::placeholder::registry::PlaceholderRegistry;
use crate::template::formatting::colorize;

/// Priority of the sender placeholders, ahead of the default.
pub const SENDER_PRIORITY: i32 = 50;

/// Register `%sender%`/`%player%`, `%time%` and `%prefix%`.
pub fn register_defaults(
    registry: &PlaceholderRegistry,
    settings: &Settings,
) -> Result<(), RegistryError> {
    registry.register_all([
        Placeholder::for_sender(["%sender%", "%player%"], |info| info.name.clone())
            .with_priority(SENDER_PRIORITY),
        Placeholder::simple(["%time%"], || Local::now().format("%H:%M:%S").to_string()),
        Placeholder::constant("%prefix%", colorize(&settings.prefix)),
    ])
}
