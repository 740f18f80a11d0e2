//! Command handler contract.

use std::sync::Arc;

use crate::command::gate::DispatchGate;
use crate::command::registry::CommandRegistry;
use crate::platform::Sender;
use crate::template::Templates;

/// Result a handler reports after running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
    SyntaxError,
}

/// Static description of a command: labels, access rules, template node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    node: String,
    labels: Vec<String>,
    alias: Option<String>,
    console_allowed: bool,
    permissions: Vec<String>,
    admin: bool,
}

impl CommandSpec {
    /// A player-only command with no permission requirement.
    ///
    /// `node` names its `commands.<node>` block in the `messages` document.
    pub fn new<S: Into<String>>(node: impl Into<String>, labels: impl IntoIterator<Item = S>) -> Self {
        Self {
            node: node.into(),
            labels: labels.into_iter().map(Into::into).collect(),
            alias: None,
            console_allowed: false,
            permissions: Vec::new(),
            admin: false,
        }
    }

    /// Allow non-interactive senders.
    pub fn allow_console(mut self) -> Self {
        self.console_allowed = true;
        self
    }

    /// Add a permission node; holding any one of them is enough.
    pub fn permission(mut self, node: impl Into<String>) -> Self {
        self.permissions.push(node.into());
        self
    }

    /// Require the admin tier for interactive senders.
    pub fn admin(mut self) -> Self {
        self.admin = true;
        self
    }

    /// A standalone label routed straight to this command.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn node(&self) -> &str {
        &self.node
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn alias_label(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn console_allowed(&self) -> bool {
        self.console_allowed
    }

    pub fn permissions(&self) -> &[String] {
        &self.permissions
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Whether `label` names this command, ignoring case.
    pub fn matches(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l.eq_ignore_ascii_case(label))
    }
}

/// Everything a handler can see while running.
pub struct CommandContext<'a> {
    /// Label the command was invoked with.
    pub label: &'a str,
    /// Arguments after the label.
    pub arguments: &'a [String],
    pub sender: &'a Arc<dyn Sender>,
    pub templates: &'a Templates,
    pub registry: &'a CommandRegistry,
    pub gate: &'a DispatchGate,
}

/// A command handler.
pub trait Command: Send + Sync {
    fn spec(&self) -> &CommandSpec;

    fn execute(&self, ctx: &CommandContext<'_>) -> Outcome;
}
