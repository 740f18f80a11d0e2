//! Commands every host gets.

use crate::command::handler::{Command, CommandContext, CommandSpec, Outcome};
use crate::output::{MessageBuilder, OutputBuilder};

/// Lists the commands the sender may run. Registered as the main command.
#[derive(Debug, Clone)]
pub struct HelpCommand {
    spec: CommandSpec,
}

impl HelpCommand {
    pub fn new() -> Self {
        Self {
            spec: CommandSpec::new("help", ["help", "?"]).allow_console(),
        }
    }
}

impl Default for HelpCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for HelpCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn execute(&self, ctx: &CommandContext<'_>) -> Outcome {
        if !ctx.arguments.is_empty() {
            return Outcome::SyntaxError;
        }

        MessageBuilder::node("messages.help-header")
            .with_default_value(ctx.sender.info())
            .to(ctx.sender.clone())
            .send(ctx.templates);

        for command in ctx.registry.commands() {
            let spec = command.spec();
            if !ctx.gate.permits(spec, ctx.sender.as_ref()) {
                continue;
            }
            MessageBuilder::node("messages.help-entry")
                .without_prefix()
                .replace("%syntax%", ctx.templates.command_syntax(spec.node()))
                .replace("%description%", ctx.templates.command_description(spec.node()))
                .to(ctx.sender.clone())
                .send(ctx.templates);
        }
        Outcome::Success
    }
}

/// Shows the host name, version and command count.
#[derive(Debug, Clone)]
pub struct AboutCommand {
    spec: CommandSpec,
}

impl AboutCommand {
    pub fn new() -> Self {
        Self {
            spec: CommandSpec::new("about", ["about", "version"]).allow_console(),
        }
    }
}

impl Default for AboutCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for AboutCommand {
    fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn execute(&self, ctx: &CommandContext<'_>) -> Outcome {
        MessageBuilder::node("messages.about")
            .replace("%name%", &ctx.templates.settings().name)
            .replace("%version%", env!("CARGO_PKG_VERSION"))
            .replace("%commands%", ctx.registry.len())
            .to(ctx.sender.clone())
            .send(ctx.templates);
        Outcome::Success
    }
}
