//! Common utilities and types shared across the framework.

pub mod error;
pub mod types;

pub use error::{AppError, ConfigError, DispatchError, PlaceholderError, RegistryError};
pub use types::{BoundValue, SenderInfo, ValueKind};
