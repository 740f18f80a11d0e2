//! Error types for the framework.

use thiserror::Error;

use crate::common::types::ValueKind;

/// Top-level error aggregating every failure the framework can report.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },

    #[error("Missing section '{path}' in document '{document}'")]
    MissingSection { document: String, path: String },
}

/// Errors raised while producing a placeholder replacement.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaceholderError {
    #[error("Placeholder {syntaxes} expects a {expected} value but was given {found}")]
    TypeMismatch {
        syntaxes: String,
        expected: ValueKind,
        found: &'static str,
    },
}

/// Errors raised while building the placeholder or command registries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Placeholder registry is sealed; cannot register {syntaxes}")]
    Sealed { syntaxes: String },

    #[error("No main command was registered")]
    NoMainCommand,

    #[error("Only one main command may be registered (got '{first}' and '{second}')")]
    MultipleMainCommands { first: String, second: String },
}

/// Rejections produced by command resolution and the dispatch gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("No command matches '{label}'")]
    CommandNotFound { label: String },

    #[error("Command '{command}' must be run by a player")]
    MustBeInteractive { command: String },

    #[error("Missing permission for command '{command}'")]
    NoPermission { command: String },
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for dispatch operations.
pub type DispatchResult<T> = std::result::Result<T, DispatchError>;
