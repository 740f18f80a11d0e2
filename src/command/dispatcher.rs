//! End-to-end command dispatch.
//!
//! Resolve the handler, run it through the gate, then render feedback.

use std::sync::Arc;

use tracing::{debug, info};

use crate::command::feedback::Feedback;
use crate::command::gate::{DispatchGate, Verdict};
use crate::command::handler::{Command, CommandContext};
use crate::command::registry::CommandRegistry;
use crate::common::error::DispatchError;
use crate::platform::Sender;
use crate::sound::Scheduler;
use crate::template::Templates;

/// Owns the registry, gate and feedback channel for one host.
pub struct Dispatcher {
    registry: CommandRegistry,
    gate: DispatchGate,
    feedback: Feedback,
    templates: Templates,
}

impl Dispatcher {
    pub fn new(registry: CommandRegistry, templates: Templates, scheduler: Arc<dyn Scheduler>) -> Self {
        let gate = DispatchGate::from_settings(templates.settings());
        info!(
            "Dispatcher ready with {} commands (admin node '{}')",
            registry.len(),
            gate.admin_node()
        );
        Self {
            registry,
            gate,
            feedback: Feedback::new(scheduler),
            templates,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn templates(&self) -> &Templates {
        &self.templates
    }

    pub fn gate(&self) -> &DispatchGate {
        &self.gate
    }

    /// Handle `label args...` from `sender`.
    pub fn dispatch(&self, sender: &Arc<dyn Sender>, label: &str, arguments: &[String]) -> Verdict {
        debug!("{} invoked '{}' {:?}", sender.name(), label, arguments);
        match self.registry.resolve(label, arguments) {
            Ok(resolved) => self.run(sender, resolved.command.as_ref(), &resolved.label, &resolved.arguments),
            Err(rejection) => self.reject(sender, rejection),
        }
    }

    /// Handle a standalone alias, bypassing the main label.
    pub fn dispatch_alias(&self, sender: &Arc<dyn Sender>, alias: &str, arguments: &[String]) -> Verdict {
        debug!("{} invoked alias '{}' {:?}", sender.name(), alias, arguments);
        match self.registry.resolve_alias(alias) {
            Ok(command) => self.run(sender, command.as_ref(), alias, arguments),
            Err(rejection) => self.reject(sender, rejection),
        }
    }

    /// Handle a whitespace-separated line under the configured root label.
    pub fn dispatch_line(&self, sender: &Arc<dyn Sender>, line: &str) -> Verdict {
        let arguments: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        let label = self.templates.settings().name.clone();
        self.dispatch(sender, &label, &arguments)
    }

    fn run(&self, sender: &Arc<dyn Sender>, command: &dyn Command, label: &str, arguments: &[String]) -> Verdict {
        let ctx = CommandContext {
            label,
            arguments,
            sender,
            templates: &self.templates,
            registry: &self.registry,
            gate: &self.gate,
        };
        let verdict = self.gate.process(command, &ctx);
        self.feedback
            .render(&self.templates, sender, &verdict, Some(command.spec()));
        verdict
    }

    fn reject(&self, sender: &Arc<dyn Sender>, rejection: DispatchError) -> Verdict {
        let verdict = Verdict::Rejected(rejection);
        self.feedback.render(&self.templates, sender, &verdict, None);
        verdict
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::command::handler::{CommandSpec, Outcome};
    use crate::common::types::SenderInfo;
    use crate::config::{ConfigStore, Settings};
    use crate::output::{MessageBuilder, OutputBuilder};
    use crate::placeholder::{builtin, PlaceholderRegistry};
    use crate::platform::RecordingSender;
    use crate::sound::ImmediateScheduler;

    /// Counts runs and returns a fixed outcome.
    struct Probe {
        spec: CommandSpec,
        outcome: Outcome,
        runs: Arc<AtomicUsize>,
    }

    impl Command for Probe {
        fn spec(&self) -> &CommandSpec {
            &self.spec
        }

        fn execute(&self, ctx: &CommandContext<'_>) -> Outcome {
            self.runs.fetch_add(1, Ordering::SeqCst);
            MessageBuilder::literal("ran %label% for %player%")
                .without_prefix()
                .replace("%label%", ctx.label)
                .with_default_value(SenderInfo::player(ctx.sender.name()))
                .to(ctx.sender.clone())
                .send(ctx.templates);
            self.outcome
        }
    }

    struct Fixture {
        dispatcher: Dispatcher,
        runs: Arc<AtomicUsize>,
    }

    fn fixture() -> Fixture {
        let runs = Arc::new(AtomicUsize::new(0));
        let probe = |node: &str, outcome: Outcome| Probe {
            spec: CommandSpec::new(node, [node]),
            outcome,
            runs: runs.clone(),
        };

        let registry = CommandRegistry::builder()
            .main(Probe {
                spec: CommandSpec::new("root", ["root"]).allow_console(),
                outcome: Outcome::Success,
                runs: runs.clone(),
            })
            .command(Probe {
                spec: CommandSpec::new("secret", ["secret"]).permission("x.use"),
                ..probe("secret", Outcome::Success)
            })
            .command(probe("broken", Outcome::SyntaxError))
            .command(Probe {
                spec: CommandSpec::new("fast", ["fast"]).alias("f"),
                ..probe("fast", Outcome::Success)
            })
            .build()
            .unwrap();

        let settings = Arc::new(Settings::default());
        let placeholders = PlaceholderRegistry::new();
        builtin::register_defaults(&placeholders, &settings).unwrap();
        let templates = Templates::new(Arc::new(ConfigStore::with_defaults()), settings, &placeholders);

        Fixture {
            dispatcher: Dispatcher::new(registry, templates, Arc::new(ImmediateScheduler)),
            runs,
        }
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_main_command_without_arguments() {
        let f = fixture();
        let console = Arc::new(RecordingSender::console());
        let sender: Arc<dyn Sender> = console.clone();

        let verdict = f.dispatcher.dispatch(&sender, "concierge", &[]);

        assert_eq!(verdict, Verdict::Executed(Outcome::Success));
        assert_eq!(console.messages(), vec!["ran concierge for CONSOLE"]);
    }

    #[test]
    fn test_no_permission_never_runs_handler() {
        let f = fixture();
        let ann = Arc::new(RecordingSender::player("Ann"));
        let sender: Arc<dyn Sender> = ann.clone();

        let verdict = f.dispatcher.dispatch(&sender, "concierge", &args(&["secret"]));

        assert_eq!(
            verdict,
            Verdict::Rejected(DispatchError::NoPermission {
                command: "secret".to_string()
            })
        );
        assert_eq!(f.runs.load(Ordering::SeqCst), 0);
        assert_eq!(ann.messages().len(), 1);
        assert!(ann.messages()[0].contains("do not have permission"));
    }

    #[test]
    fn test_permission_granted_runs_handler() {
        let f = fixture();
        let ann = Arc::new(RecordingSender::player("Ann").with_permission("x.use"));
        let sender: Arc<dyn Sender> = ann.clone();

        let verdict = f.dispatcher.dispatch(&sender, "concierge", &args(&["secret"]));

        assert_eq!(verdict, Verdict::Executed(Outcome::Success));
        assert_eq!(f.runs.load(Ordering::SeqCst), 1);
        assert_eq!(ann.messages(), vec!["ran secret for Ann"]);
    }

    #[test]
    fn test_console_rejected_before_permission() {
        let f = fixture();
        let console = Arc::new(RecordingSender::console().with_permission("x.use"));
        let sender: Arc<dyn Sender> = console.clone();

        let verdict = f.dispatcher.dispatch(&sender, "concierge", &args(&["secret"]));

        assert!(matches!(
            verdict,
            Verdict::Rejected(DispatchError::MustBeInteractive { .. })
        ));
        assert_eq!(f.runs.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_syntax_error_feedback() {
        let f = fixture();
        let ann = Arc::new(RecordingSender::player("Ann"));
        let sender: Arc<dyn Sender> = ann.clone();

        let verdict = f.dispatcher.dispatch(&sender, "concierge", &args(&["broken"]));

        assert_eq!(verdict, Verdict::Executed(Outcome::SyntaxError));
        let messages = ann.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[1].contains("Error messages.commands.broken.syntax"));
        assert_eq!(ann.sounds().len(), 1);
    }

    #[test]
    fn test_unknown_command() {
        let f = fixture();
        let ann = Arc::new(RecordingSender::player("Ann"));
        let sender: Arc<dyn Sender> = ann.clone();

        let verdict = f.dispatcher.dispatch_line(&sender, "teleport home");

        assert!(matches!(
            verdict,
            Verdict::Rejected(DispatchError::CommandNotFound { .. })
        ));
        assert!(ann.messages()[0].contains("does not exist"));
        assert!(ann.sounds().is_empty());
    }

    #[test]
    fn test_alias_dispatch() {
        let f = fixture();
        let ann = Arc::new(RecordingSender::player("Ann"));
        let sender: Arc<dyn Sender> = ann.clone();

        let verdict = f.dispatcher.dispatch_alias(&sender, "F", &[]);

        assert_eq!(verdict, Verdict::Executed(Outcome::Success));
        assert_eq!(ann.messages(), vec!["ran F for Ann"]);
        assert!(matches!(
            f.dispatcher.dispatch_alias(&sender, "nope", &[]),
            Verdict::Rejected(DispatchError::CommandNotFound { .. })
        ));
    }
}
