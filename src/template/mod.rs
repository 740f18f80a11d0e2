//! Template resolution, colour formatting and the shared render context.

pub mod context;
pub mod formatting;
pub mod resolver;

pub use context::Templates;
pub use formatting::{colorize, colorize_and_strip, join_nodes, strip_colors};
pub use resolver::{expand_escapes, TemplateResolver, ESCAPE_TOKENS};
