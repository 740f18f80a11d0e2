//! Configuration documents, settings and validation.

pub mod defaults;
pub mod env;
pub mod parser;
pub mod section;
pub mod store;
pub mod types;
pub mod validate;

pub use parser::{load_document, parse_document};
pub use section::ConfigSection;
pub use store::{
    ConfigSource, ConfigStore, CONFIG_DOCUMENT, INVENTORIES_DOCUMENT, MESSAGES_DOCUMENT,
    SOUNDS_DOCUMENT,
};
pub use types::{GeneralSettings, Settings};
pub use validate::validate_config;

use crate::common::error::ConfigResult;

/// Load settings from a source, apply environment overrides and validate.
pub fn load_and_validate(source: &dyn ConfigSource) -> ConfigResult<Settings> {
    let settings = env::apply_env_overrides(Settings::from_source(source)?);
    validate_config(&settings, source)?;
    Ok(settings)
}
