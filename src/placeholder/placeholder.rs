//! Placeholder definitions.
//!
//! A placeholder maps one or more trigger tokens (`%player%`) to replacement
//! text. Context-free placeholders resolve on their own; typed placeholders
//! need a [`BoundValue`] whose kind their declared [`ValueKind`] accepts.

use std::fmt;
use std::sync::Arc;

use fancy_regex::{NoExpand, Regex};
use tracing::warn;

use crate::common::error::PlaceholderError;
use crate::common::types::{BoundValue, SenderInfo, ValueKind};

/// Priority given to placeholders that don't declare one.
pub const DEFAULT_PRIORITY: i32 = 99;

type ResolveFn = dyn Fn(Option<&BoundValue>) -> Result<Option<String>, PlaceholderError> + Send + Sync;

/// A single trigger token with its case-insensitive matcher.
#[derive(Debug, Clone)]
pub struct Token {
    syntax: String,
    /// `None` only if the escaped literal failed to compile.
    pattern: Option<Regex>,
}

impl Token {
    pub fn new(syntax: impl Into<String>) -> Self {
        let syntax = syntax.into();
        let pattern = match Regex::new(&format!("(?i){}", fancy_regex::escape(&syntax))) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                warn!("Falling back to exact matching for token '{}': {}", syntax, e);
                None
            }
        };
        Self { syntax, pattern }
    }

    pub fn syntax(&self) -> &str {
        &self.syntax
    }

    /// Whether the token occurs in `text`, ignoring case.
    pub fn occurs_in(&self, text: &str) -> bool {
        match &self.pattern {
            Some(pattern) => pattern.is_match(text).unwrap_or_else(|e| {
                warn!("Token match error for '{}': {}", self.syntax, e);
                false
            }),
            None => text.contains(&self.syntax),
        }
    }

    /// Replace every occurrence of the token in `text`, ignoring case.
    pub fn replace_in(&self, text: &str, replacement: &str) -> String {
        match &self.pattern {
            Some(pattern) => pattern.replace_all(text, NoExpand(replacement)).into_owned(),
            None => text.replace(&self.syntax, replacement),
        }
    }

    /// Whether `token` names this trigger token.
    pub fn is(&self, token: &str) -> bool {
        self.syntax.to_lowercase() == token.to_lowercase()
    }
}

/// A named, priority-ranked text-substitution rule.
#[derive(Clone)]
pub struct Placeholder {
    tokens: Vec<Token>,
    priority: i32,
    kind: Option<ValueKind>,
    resolve: Arc<ResolveFn>,
}

impl Placeholder {
    /// A context-free placeholder computed on every render.
    pub fn simple<S, F>(syntaxes: impl IntoIterator<Item = S>, f: F) -> Self
    where
        S: Into<String>,
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self::build(syntaxes, None, move |_| Ok(Some(f())))
    }

    /// A context-free placeholder with fixed replacement text.
    pub fn constant(syntax: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self::build([syntax], None, move |_| Ok(Some(value.clone())))
    }

    /// A placeholder that needs a bound value of a compatible kind.
    ///
    /// The closure is only called with values `kind` accepts; returning
    /// `Ok(None)` leaves the token untouched.
    pub fn typed<S, F>(kind: ValueKind, syntaxes: impl IntoIterator<Item = S>, f: F) -> Self
    where
        S: Into<String>,
        F: Fn(&BoundValue) -> Result<Option<String>, PlaceholderError> + Send + Sync + 'static,
    {
        Self::build(syntaxes, Some(kind), move |value| match value {
            Some(value) => f(value),
            None => Ok(None),
        })
    }

    /// A placeholder resolved from any command sender (player or console).
    pub fn for_sender<S, F>(syntaxes: impl IntoIterator<Item = S>, f: F) -> Self
    where
        S: Into<String>,
        F: Fn(&SenderInfo) -> String + Send + Sync + 'static,
    {
        let mut placeholder = Self::build(syntaxes, Some(ValueKind::Sender), |_| Ok(None));
        let described = placeholder.describe();
        placeholder.resolve = Arc::new(move |value: Option<&BoundValue>| {
            match value.and_then(BoundValue::as_sender) {
                Some(info) => Ok(Some(f(info))),
                None => Err(PlaceholderError::TypeMismatch {
                    syntaxes: described.clone(),
                    expected: ValueKind::Sender,
                    found: value.map(BoundValue::kind_name).unwrap_or("nothing"),
                }),
            }
        });
        placeholder
    }

    fn build<S, F>(syntaxes: impl IntoIterator<Item = S>, kind: Option<ValueKind>, f: F) -> Self
    where
        S: Into<String>,
        F: Fn(Option<&BoundValue>) -> Result<Option<String>, PlaceholderError> + Send + Sync + 'static,
    {
        Self {
            tokens: syntaxes.into_iter().map(Token::new).collect(),
            priority: DEFAULT_PRIORITY,
            kind,
            resolve: Arc::new(f),
        }
    }

    /// Set the priority; lower values resolve earlier.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn syntaxes(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(Token::syntax)
    }

    /// Declared input kind; `None` for context-free placeholders.
    pub fn kind(&self) -> Option<ValueKind> {
        self.kind
    }

    pub fn requires_value(&self) -> bool {
        self.kind.is_some()
    }

    /// Whether any of this placeholder's tokens is `token`.
    pub fn handles(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t.is(token))
    }

    /// Whether a global render with this default value may fire the placeholder.
    pub fn accepts(&self, value: Option<&BoundValue>) -> bool {
        match (self.kind, value) {
            (None, _) => true,
            (Some(kind), Some(value)) => kind.accepts(value),
            (Some(_), None) => false,
        }
    }

    /// Produce the replacement text.
    ///
    /// Returns `Ok(None)` when a value is required but none was given, and
    /// `TypeMismatch` when the value's kind isn't accepted.
    pub fn resolve(&self, value: Option<&BoundValue>) -> Result<Option<String>, PlaceholderError> {
        match (self.kind, value) {
            (None, _) => (self.resolve)(None),
            (Some(_), None) => Ok(None),
            (Some(kind), Some(value)) if !kind.accepts(value) => {
                Err(PlaceholderError::TypeMismatch {
                    syntaxes: self.describe(),
                    expected: kind,
                    found: value.kind_name(),
                })
            }
            (Some(_), Some(value)) => (self.resolve)(Some(value)),
        }
    }

    /// Token list rendered for diagnostics, e.g. `[%player%, %sender%]`.
    pub fn describe(&self) -> String {
        format!("[{}]", self.syntaxes().collect::<Vec<_>>().join(", "))
    }
}

impl fmt::Debug for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Placeholder")
            .field("syntaxes", &self.describe())
            .field("priority", &self.priority)
            .field("kind", &self.kind)
            .finish()
    }
}

/// A placeholder scoped to one render, with its own bound value.
#[derive(Debug, Clone)]
pub struct LocalPlaceholder {
    pub placeholder: Arc<Placeholder>,
    pub value: Option<BoundValue>,
}

impl LocalPlaceholder {
    pub fn new(placeholder: impl Into<Arc<Placeholder>>, value: Option<BoundValue>) -> Self {
        Self {
            placeholder: placeholder.into(),
            value,
        }
    }

    /// A constant replacement for `syntax`.
    pub fn constant(syntax: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(Placeholder::constant(syntax, value), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_case_insensitive() {
        let token = Token::new("%player%");
        assert!(token.occurs_in("hello %PLAYER%"));
        assert_eq!(token.replace_in("%Player% and %player%", "Ann"), "Ann and Ann");
        assert!(token.is("%PLAYER%"));
    }

    #[test]
    fn test_token_replacement_is_literal() {
        let token = Token::new("%cost%");
        assert_eq!(token.replace_in("pay %cost%", "$1.50"), "pay $1.50");
        let dotted = Token::new("a.b");
        assert_eq!(dotted.replace_in("a.b axb", "!"), "! axb");
    }

    #[test]
    fn test_simple_resolves_without_value() {
        let placeholder = Placeholder::simple(["%server%"], || "Lobby".to_string());
        assert_eq!(placeholder.priority(), DEFAULT_PRIORITY);
        assert!(!placeholder.requires_value());
        assert_eq!(placeholder.resolve(None).unwrap(), Some("Lobby".to_string()));
    }

    #[test]
    fn test_typed_without_value_is_skipped() {
        let placeholder = Placeholder::typed(ValueKind::Number, ["%amount%"], |v| {
            Ok(v.as_f64().map(|n| format!("{:.1}", n)))
        });
        assert_eq!(placeholder.resolve(None).unwrap(), None);
        assert_eq!(
            placeholder.resolve(Some(&BoundValue::Integer(2))).unwrap(),
            Some("2.0".to_string())
        );
    }

    #[test]
    fn test_typed_mismatch_is_error() {
        let placeholder = Placeholder::for_sender(["%player%"], |info| info.name.clone());
        let result = placeholder.resolve(Some(&BoundValue::Integer(5)));

        match result {
            Err(PlaceholderError::TypeMismatch { expected, found, .. }) => {
                assert_eq!(expected, ValueKind::Sender);
                assert_eq!(found, "integer");
            }
            other => panic!("expected type mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_for_sender_accepts_console() {
        let placeholder = Placeholder::for_sender(["%sender%"], |info| info.name.clone());
        let value = BoundValue::Sender(SenderInfo::console("CONSOLE"));
        assert!(placeholder.accepts(Some(&value)));
        assert_eq!(placeholder.resolve(Some(&value)).unwrap(), Some("CONSOLE".to_string()));
    }

    #[test]
    fn test_handles_and_describe() {
        let placeholder =
            Placeholder::simple(["%a%", "%b%"], || String::new()).with_priority(3);
        assert!(placeholder.handles("%B%"));
        assert!(!placeholder.handles("%c%"));
        assert_eq!(placeholder.describe(), "[%a%, %b%]");
        assert_eq!(placeholder.priority(), 3);
    }
}
