//! Placeholders and the global placeholder registry.

pub mod builtin;
#[allow(clippy::module_inception)]
pub mod placeholder;
pub mod registry;

pub use placeholder::{LocalPlaceholder, Placeholder, Token, DEFAULT_PRIORITY};
pub use registry::{PlaceholderRegistry, Snapshot};
