//! Environment variable overrides for configuration.
//!
//! Supports overriding config values with environment variables:
//! - `CONCIERGE_CONFIG_DIR` - Directory holding the YAML documents
//! - `CONCIERGE_PREFIX` - Fallback chat prefix
//! - `CONCIERGE_NEW_LINES` - Maximum escape-expansion passes
//! - `CONCIERGE_DEBUG` - Enable debug logging (`1`/`true`)

use std::env;

use crate::config::types::Settings;

/// Environment variable prefix for all config overrides.
const ENV_PREFIX: &str = "CONCIERGE";

/// Apply environment variable overrides to loaded settings.
pub fn apply_env_overrides(mut settings: Settings) -> Settings {
    if let Ok(prefix) = env::var(format!("{}_PREFIX", ENV_PREFIX)) {
        settings.prefix = prefix;
    }

    if let Ok(new_lines) = env::var(format!("{}_NEW_LINES", ENV_PREFIX)) {
        if let Ok(new_lines) = new_lines.trim().parse() {
            settings.general.new_lines = new_lines;
        }
    }

    if let Ok(debug) = env::var(format!("{}_DEBUG", ENV_PREFIX)) {
        settings.debug = matches!(debug.to_lowercase().as_str(), "1" | "true" | "yes");
    }

    settings
}

/// Get the config directory from environment or use default.
///
/// Checks `CONCIERGE_CONFIG_DIR`, otherwise returns "config".
pub fn get_config_dir() -> String {
    env::var(format!("{}_CONFIG_DIR", ENV_PREFIX)).unwrap_or_else(|_| "config".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_prefix() {
        assert_eq!(ENV_PREFIX, "CONCIERGE");
    }

    #[test]
    fn test_get_config_dir_default() {
        env::remove_var("CONCIERGE_CONFIG_DIR");
        assert_eq!(get_config_dir(), "config");
    }

    #[test]
    fn test_apply_env_overrides_no_vars() {
        env::remove_var("CONCIERGE_PREFIX");
        env::remove_var("CONCIERGE_NEW_LINES");
        env::remove_var("CONCIERGE_DEBUG");

        let result = apply_env_overrides(Settings::default());

        assert_eq!(result.prefix, Settings::default().prefix);
        assert_eq!(result.general.new_lines, 4);
        assert!(!result.debug);
    }
}
