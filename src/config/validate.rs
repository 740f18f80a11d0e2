//! Configuration validation.
//!
//! Validates settings and the templates the dispatch pipeline depends on,
//! collecting every problem into a single error.

use crate::command::feedback::REQUIRED_TEMPLATES;
use crate::common::error::ConfigError;
use crate::config::store::{ConfigSource, MESSAGES_DOCUMENT, SOUNDS_DOCUMENT};
use crate::config::types::Settings;

/// Validate settings and loaded documents and return detailed errors.
pub fn validate_config(settings: &Settings, source: &dyn ConfigSource) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    if settings.name.trim().is_empty() {
        errors.push("name is required".to_string());
    }
    if settings.name.contains(char::is_whitespace) {
        errors.push(format!("name '{}' must not contain whitespace", settings.name));
    }
    if settings.general.new_lines == 0 {
        errors.push("general.new-lines must be at least 1".to_string());
    }

    match source.document(MESSAGES_DOCUMENT) {
        Some(messages) => {
            for node in REQUIRED_TEMPLATES {
                if !messages.contains(node) {
                    errors.push(format!("{}.{} is required", MESSAGES_DOCUMENT, node));
                }
            }
        }
        None => errors.push(format!("document '{}' is not loaded", MESSAGES_DOCUMENT)),
    }

    if let Some(sounds) = source.document(SOUNDS_DOCUMENT) {
        for group in sounds.keys() {
            let Some(cues) = sounds.section(&format!("{}.sounds", group)) else {
                continue;
            };
            for key in cues.keys() {
                let volume = cues.float(&format!("{}.volume", key), 1.0);
                let delay = cues.int(&format!("{}.delay", key), 0);
                if volume < 0.0 {
                    errors.push(format!("{} volume must not be negative", cues.qualified(&key)));
                }
                if delay < 0 {
                    errors.push(format!("{} delay must not be negative", cues.qualified(&key)));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            message: errors.join("\n"),
        })
    }
}
