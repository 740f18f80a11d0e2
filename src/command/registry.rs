//! Command registry and label resolution.
//!
//! Commands are registered explicitly through [`CommandRegistryBuilder`],
//! optionally grouped by namespace. Exactly one command is the main command,
//! run when no label is given.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::command::handler::Command;
use crate::common::error::{DispatchError, DispatchResult, RegistryError};

/// A command matched to an invocation.
#[derive(Clone)]
pub struct Resolved {
    pub command: Arc<dyn Command>,
    /// Label the command matched on.
    pub label: String,
    /// Arguments after the label.
    pub arguments: Vec<String>,
}

impl std::fmt::Debug for Resolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolved")
            .field("command", &self.command.spec().node())
            .field("label", &self.label)
            .field("arguments", &self.arguments)
            .finish()
    }
}

/// Registered commands in registration order.
pub struct CommandRegistry {
    commands: Vec<Arc<dyn Command>>,
    main: usize,
}

impl CommandRegistry {
    pub fn builder() -> CommandRegistryBuilder {
        CommandRegistryBuilder::default()
    }

    /// Resolve an invocation.
    ///
    /// With no arguments the main command runs under `label`. Otherwise the
    /// first command whose labels contain the first argument wins.
    pub fn resolve(&self, label: &str, arguments: &[String]) -> DispatchResult<Resolved> {
        let Some((first, rest)) = arguments.split_first() else {
            return Ok(Resolved {
                command: self.main(),
                label: label.to_string(),
                arguments: Vec::new(),
            });
        };

        self.commands
            .iter()
            .find(|command| command.spec().matches(first))
            .map(|command| Resolved {
                command: command.clone(),
                label: first.clone(),
                arguments: rest.to_vec(),
            })
            .ok_or_else(|| DispatchError::CommandNotFound {
                label: first.clone(),
            })
    }

    /// Command registered under the standalone `alias`.
    pub fn resolve_alias(&self, alias: &str) -> DispatchResult<Arc<dyn Command>> {
        self.commands
            .iter()
            .find(|command| {
                command
                    .spec()
                    .alias_label()
                    .is_some_and(|a| a.eq_ignore_ascii_case(alias))
            })
            .cloned()
            .ok_or_else(|| DispatchError::CommandNotFound {
                label: alias.to_string(),
            })
    }

    pub fn main(&self) -> Arc<dyn Command> {
        self.commands[self.main].clone()
    }

    pub fn commands(&self) -> &[Arc<dyn Command>] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Explicit registration table for commands.
#[derive(Default)]
pub struct CommandRegistryBuilder {
    commands: Vec<Arc<dyn Command>>,
    main: Option<usize>,
    error: Option<RegistryError>,
}

impl CommandRegistryBuilder {
    /// Register the main command.
    pub fn main(mut self, command: impl Command + 'static) -> Self {
        if let Some(existing) = self.main {
            if self.error.is_none() {
                self.error = Some(RegistryError::MultipleMainCommands {
                    first: self.commands[existing].spec().node().to_string(),
                    second: command.spec().node().to_string(),
                });
            }
            return self;
        }
        self.main = Some(self.commands.len());
        self.command(command)
    }

    /// Register one command.
    pub fn command(mut self, command: impl Command + 'static) -> Self {
        debug!("Registered command '{}'", command.spec().node());
        self.commands.push(Arc::new(command));
        self
    }

    /// Register a group of commands under a namespace.
    pub fn namespace(
        mut self,
        namespace: &str,
        commands: impl IntoIterator<Item = Arc<dyn Command>>,
    ) -> Self {
        let before = self.commands.len();
        self.commands.extend(commands);
        debug!(
            "Registered {} commands from namespace '{}'",
            self.commands.len() - before,
            namespace
        );
        self
    }

    pub fn build(self) -> Result<CommandRegistry, RegistryError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let main = self.main.ok_or(RegistryError::NoMainCommand)?;

        let mut seen = HashSet::new();
        for command in &self.commands {
            let spec = command.spec();
            for label in spec.labels() {
                if !seen.insert(label.to_lowercase()) {
                    warn!(
                        "Label '{}' of command '{}' is already taken; the earlier command wins",
                        label,
                        spec.node()
                    );
                }
            }
        }

        info!("Command registry built with {} commands", self.commands.len());
        Ok(CommandRegistry {
            commands: self.commands,
            main,
        })
    }
}
