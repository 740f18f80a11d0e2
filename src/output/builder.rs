//! State shared by every output builder.
//!
//! Builders are plain values: each fluent call consumes the builder and
//! returns an updated one, so a partially configured builder can be cloned
//! and reused without surprises.

use std::fmt::Display;
use std::sync::Arc;

use crate::common::types::BoundValue;
use crate::placeholder::{LocalPlaceholder, Placeholder};
use crate::platform::Sender;

/// Separator used when a list replacement is rendered.
pub const LIST_SEPARATOR: &str = ", ";

/// Render inputs common to every builder.
#[derive(Clone)]
pub struct RenderOptions {
    pub locals: Vec<LocalPlaceholder>,
    pub default_value: Option<BoundValue>,
    pub recipients: Vec<Arc<dyn Sender>>,
    pub prefix: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            locals: Vec::new(),
            default_value: None,
            recipients: Vec::new(),
            prefix: true,
        }
    }
}

impl std::fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderOptions")
            .field("locals", &self.locals)
            .field("default_value", &self.default_value)
            .field("recipients", &self.recipients.len())
            .field("prefix", &self.prefix)
            .finish()
    }
}

/// Fluent configuration shared by the message, list and item builders.
pub trait OutputBuilder: Sized {
    fn options(&self) -> &RenderOptions;

    fn options_mut(&mut self) -> &mut RenderOptions;

    /// Replace `syntax` with a fixed value.
    fn replace(self, syntax: &str, replacement: impl Display) -> Self {
        self.with_local(LocalPlaceholder::constant(syntax, replacement.to_string()))
    }

    /// Replace `syntax` with a fixed value at the given priority.
    fn replace_with_priority(self, priority: i32, syntax: &str, replacement: impl Display) -> Self {
        let placeholder = Placeholder::constant(syntax, replacement.to_string()).with_priority(priority);
        self.with_local(LocalPlaceholder::new(placeholder, None))
    }

    /// Replace `syntax` with every item mapped and joined by `, `.
    fn replace_list<T, F>(self, syntax: &str, items: impl IntoIterator<Item = T>, mapper: F) -> Self
    where
        F: Fn(T) -> String,
    {
        let joined = items.into_iter().map(mapper).collect::<Vec<_>>().join(LIST_SEPARATOR);
        self.replace(syntax, joined)
    }

    /// Add a placeholder scoped to this render with its own bound value.
    fn with_placeholder(self, placeholder: impl Into<Arc<Placeholder>>, value: Option<BoundValue>) -> Self {
        self.with_local(LocalPlaceholder::new(placeholder, value))
    }

    fn with_local(mut self, local: LocalPlaceholder) -> Self {
        self.options_mut().locals.push(local);
        self
    }

    /// Value offered to global placeholders that need one.
    fn with_default_value(mut self, value: impl Into<BoundValue>) -> Self {
        self.options_mut().default_value = Some(value.into());
        self
    }

    /// Add a recipient.
    fn to(mut self, recipient: Arc<dyn Sender>) -> Self {
        self.options_mut().recipients.push(recipient);
        self
    }

    /// Add several recipients.
    fn to_all(mut self, recipients: impl IntoIterator<Item = Arc<dyn Sender>>) -> Self {
        self.options_mut().recipients.extend(recipients);
        self
    }

    /// Render without the chat prefix.
    fn without_prefix(mut self) -> Self {
        self.options_mut().prefix = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        options: RenderOptions,
    }

    impl OutputBuilder for Probe {
        fn options(&self) -> &RenderOptions {
            &self.options
        }

        fn options_mut(&mut self) -> &mut RenderOptions {
            &mut self.options
        }
    }

    #[test]
    fn test_replace_list_joins_items() {
        let probe = Probe::default().replace_list("%items%", [1, 2, 3], |n| format!("#{}", n));
        let local = &probe.options().locals[0];

        assert_eq!(local.placeholder.resolve(None).unwrap(), Some("#1, #2, #3".to_string()));
    }

    #[test]
    fn test_replace_with_priority() {
        let probe = Probe::default().replace_with_priority(5, "%a%", 10);
        let local = &probe.options().locals[0];

        assert_eq!(local.placeholder.priority(), 5);
        assert_eq!(local.placeholder.resolve(None).unwrap(), Some("10".to_string()));
    }

    #[test]
    fn test_defaults_and_prefix() {
        let probe = Probe::default();
        assert!(probe.options().prefix);
        assert!(probe.options().default_value.is_none());

        let probe = probe.without_prefix().with_default_value(3i64);
        assert!(!probe.options().prefix);
        assert_eq!(probe.options().default_value, Some(BoundValue::Integer(3)));
    }
}
