//! Command registry, dispatch gate and feedback.

pub mod builtin;
pub mod dispatcher;
pub mod feedback;
pub mod gate;
pub mod handler;
pub mod registry;

pub use builtin::{AboutCommand, HelpCommand};
pub use dispatcher::Dispatcher;
pub use feedback::{Feedback, REQUIRED_TEMPLATES};
pub use gate::{DispatchGate, Verdict};
pub use handler::{Command, CommandContext, CommandSpec, Outcome};
pub use registry::{CommandRegistry, CommandRegistryBuilder, Resolved};
