//! Wiring for a standalone host.

use std::sync::Arc;

use tracing::info;

use crate::command::{AboutCommand, CommandRegistry, Dispatcher, HelpCommand};
use crate::common::error::Result;
use crate::config::{load_and_validate, ConfigStore};
use crate::placeholder::{builtin, PlaceholderRegistry};
use crate::sound::Scheduler;
use crate::template::Templates;

/// Validate `store`, register the built-in placeholders and commands, and
/// return a ready dispatcher. Seals `placeholders`.
pub fn bootstrap(
    store: ConfigStore,
    placeholders: &PlaceholderRegistry,
    scheduler: Arc<dyn Scheduler>,
) -> Result<Dispatcher> {
    let settings = Arc::new(load_and_validate(&store)?);
    builtin::register_defaults(placeholders, &settings)?;

    let registry = CommandRegistry::builder()
        .main(HelpCommand::new())
        .command(AboutCommand::new())
        .build()?;

    info!(
        "Host '{}' ready with {} global placeholders",
        settings.name,
        placeholders.len()
    );
    let templates = Templates::new(Arc::new(store), settings, placeholders);
    Ok(Dispatcher::new(registry, templates, scheduler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Outcome, Verdict};
    use crate::common::error::{AppError, ConfigError};
    use crate::platform::{RecordingSender, Sender};
    use crate::sound::ImmediateScheduler;

    #[test]
    fn test_bootstrap_with_defaults() {
        let placeholders = PlaceholderRegistry::new();
        let dispatcher = bootstrap(
            ConfigStore::with_defaults(),
            &placeholders,
            Arc::new(ImmediateScheduler),
        )
        .unwrap();

        assert!(placeholders.is_sealed());
        assert_eq!(dispatcher.registry().len(), 2);

        let console = Arc::new(RecordingSender::console());
        let sender: Arc<dyn Sender> = console.clone();
        assert_eq!(
            dispatcher.dispatch_line(&sender, "about"),
            Verdict::Executed(Outcome::Success)
        );
    }

    #[test]
    fn test_bootstrap_rejects_missing_templates() {
        let mut store = ConfigStore::with_defaults();
        store
            .insert_yaml("messages", "messages:\n  prefix: \"\"\n")
            .unwrap();

        let result = bootstrap(store, &PlaceholderRegistry::new(), Arc::new(ImmediateScheduler));
        assert!(matches!(result, Err(AppError::Config(ConfigError::ValidationError { .. }))));
    }
}
