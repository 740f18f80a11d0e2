//! Requirement gate in front of every command.
//!
//! Checks run in a fixed order and stop at the first failure:
//! interactivity, then permission nodes (any-of), then the admin tier.
//! Only a command that passes all three is executed.

use tracing::debug;

use crate::command::handler::{Command, CommandContext, CommandSpec, Outcome};
use crate::common::error::{DispatchError, DispatchResult};
use crate::config::Settings;
use crate::platform::Sender;

/// Result of pushing one invocation through the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Stopped before the handler ran.
    Rejected(DispatchError),
    /// The handler ran and reported this outcome.
    Executed(Outcome),
}

/// Context, permission and tier checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchGate {
    admin_node: String,
}

impl DispatchGate {
    pub fn new(admin_node: impl Into<String>) -> Self {
        Self {
            admin_node: admin_node.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.admin_node())
    }

    pub fn admin_node(&self) -> &str {
        &self.admin_node
    }

    /// Run the three checks without executing anything.
    pub fn check(&self, spec: &CommandSpec, sender: &dyn Sender) -> DispatchResult<()> {
        if !sender.is_interactive() && !spec.console_allowed() {
            return Err(DispatchError::MustBeInteractive {
                command: spec.node().to_string(),
            });
        }

        let permissions = spec.permissions();
        if !permissions.is_empty() && !permissions.iter().any(|node| sender.has_permission(node)) {
            return Err(DispatchError::NoPermission {
                command: spec.node().to_string(),
            });
        }

        if spec.is_admin() && sender.is_interactive() && !sender.has_permission(&self.admin_node) {
            return Err(DispatchError::NoPermission {
                command: spec.node().to_string(),
            });
        }

        Ok(())
    }

    /// Whether `sender` may run the command.
    pub fn permits(&self, spec: &CommandSpec, sender: &dyn Sender) -> bool {
        self.check(spec, sender).is_ok()
    }

    /// Check the invocation and, if it passes, execute the handler.
    pub fn process(&self, command: &dyn Command, ctx: &CommandContext<'_>) -> Verdict {
        if let Err(rejection) = self.check(command.spec(), ctx.sender.as_ref()) {
            debug!("{} rejected: {}", ctx.sender.name(), rejection);
            return Verdict::Rejected(rejection);
        }
        let outcome = command.execute(ctx);
        debug!(
            "{} ran '{}' with outcome {:?}",
            ctx.sender.name(),
            command.spec().node(),
            outcome
        );
        Verdict::Executed(outcome)
    }
}
