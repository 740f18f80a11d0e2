//! Turns gate verdicts into messages and error sounds.

use std::sync::Arc;

use tracing::debug;

use crate::command::gate::Verdict;
use crate::command::handler::{CommandSpec, Outcome};
use crate::common::error::DispatchError;
use crate::output::{MessageBuilder, OutputBuilder};
use crate::platform::Sender;
use crate::sound::{Scheduler, SoundPlayer};
use crate::template::Templates;

pub const COMMAND_NOT_FOUND: &str = "messages.command-doesnt-exist";
pub const MUST_BE_PLAYER: &str = "messages.must-be-player";
pub const NO_PERMISSION: &str = "messages.no-permission";
pub const INVALID_COMMAND: &str = "messages.invalid-command";
pub const INVALID_COMMAND_CORRECTION: &str = "messages.invalid-command-correction";

/// Templates the feedback channel renders; all must exist in `messages`.
pub const REQUIRED_TEMPLATES: &[&str] = &[
    COMMAND_NOT_FOUND,
    MUST_BE_PLAYER,
    NO_PERMISSION,
    INVALID_COMMAND,
    INVALID_COMMAND_CORRECTION,
];

/// Sound group played on errors.
pub const ERROR_SOUND: &str = "error";

/// Renders the feedback for one invocation.
#[derive(Clone)]
pub struct Feedback {
    scheduler: Arc<dyn Scheduler>,
}

impl Feedback {
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        Self { scheduler }
    }

    /// Render `verdict` to `sender`.
    ///
    /// `spec` is the resolved command, absent when nothing matched.
    pub fn render(
        &self,
        templates: &Templates,
        sender: &Arc<dyn Sender>,
        verdict: &Verdict,
        spec: Option<&CommandSpec>,
    ) {
        let syntax = spec.map(|spec| templates.command_syntax(spec.node()));
        let message = |nodes: &[&str]| {
            let mut builder = MessageBuilder::new(nodes.iter().copied())
                .with_default_value(sender.info())
                .to(sender.clone());
            if let Some(syntax) = &syntax {
                builder = builder.replace("%command%", syntax);
            }
            builder.send(templates);
        };

        match verdict {
            Verdict::Rejected(DispatchError::CommandNotFound { .. }) => {
                message(&[COMMAND_NOT_FOUND]);
            }
            Verdict::Rejected(DispatchError::MustBeInteractive { .. }) => {
                message(&[MUST_BE_PLAYER]);
            }
            Verdict::Rejected(DispatchError::NoPermission { .. }) => {
                message(&[NO_PERMISSION]);
                self.error_cue(templates, sender);
            }
            Verdict::Executed(Outcome::SyntaxError) => {
                message(&[INVALID_COMMAND, INVALID_COMMAND_CORRECTION]);
                self.error_cue(templates, sender);
            }
            Verdict::Executed(Outcome::Failure) => {
                self.error_cue(templates, sender);
            }
            Verdict::Executed(Outcome::Success) => {}
        }
    }

    /// Play the error sound group to interactive senders.
    fn error_cue(&self, templates: &Templates, sender: &Arc<dyn Sender>) {
        if !sender.is_interactive() {
            return;
        }
        let player = SoundPlayer::from_config(templates, ERROR_SOUND);
        if player.is_empty() {
            debug!("No '{}' sound group configured", ERROR_SOUND);
            return;
        }
        player.play_to(std::slice::from_ref(sender), self.scheduler.as_ref());
    }
}

impl std::fmt::Debug for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Feedback").finish_non_exhaustive()
    }
}
