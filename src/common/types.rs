//! Shared value types used across the framework.

use std::fmt;

/// Snapshot of a command sender, usable as a bound value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderInfo {
    pub name: String,
    /// Whether the sender is a player-like interactive context.
    pub interactive: bool,
}

impl SenderInfo {
    pub fn player(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interactive: true,
        }
    }

    pub fn console(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            interactive: false,
        }
    }
}

/// A runtime value supplied to type-dependent placeholders for one render.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Flag(bool),
    Sender(SenderInfo),
}

impl BoundValue {
    /// Short name of the value's kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Decimal(_) => "decimal",
            Self::Flag(_) => "flag",
            Self::Sender(info) if info.interactive => "player",
            Self::Sender(_) => "sender",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_sender(&self) -> Option<&SenderInfo> {
        match self {
            Self::Sender(info) => Some(info),
            _ => None,
        }
    }

    /// Numeric view of integer and decimal values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Decimal(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for BoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{}", value),
            Self::Decimal(value) => write!(f, "{}", value),
            Self::Flag(value) => write!(f, "{}", value),
            Self::Sender(info) => f.write_str(&info.name),
        }
    }
}

impl From<&str> for BoundValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for BoundValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for BoundValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for BoundValue {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for BoundValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<SenderInfo> for BoundValue {
    fn from(value: SenderInfo) -> Self {
        Self::Sender(value)
    }
}

/// The input type a placeholder declares.
///
/// Compatibility is by capability, not equality: a `Sender` placeholder fires
/// for players and consoles alike, a `Number` placeholder for integers and
/// decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Any,
    Text,
    Integer,
    Decimal,
    Number,
    Flag,
    Sender,
    Player,
}

impl ValueKind {
    /// Check whether a bound value satisfies this kind.
    pub fn accepts(&self, value: &BoundValue) -> bool {
        match (self, value) {
            (Self::Any, _) => true,
            (Self::Text, BoundValue::Text(_)) => true,
            (Self::Integer, BoundValue::Integer(_)) => true,
            (Self::Decimal, BoundValue::Decimal(_)) => true,
            (Self::Number, BoundValue::Integer(_) | BoundValue::Decimal(_)) => true,
            (Self::Flag, BoundValue::Flag(_)) => true,
            (Self::Sender, BoundValue::Sender(_)) => true,
            (Self::Player, BoundValue::Sender(info)) => info.interactive,
            _ => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Number => "number",
            Self::Flag => "flag",
            Self::Sender => "sender",
            Self::Player => "player",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
