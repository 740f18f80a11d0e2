//! Concierge console host
//!
//! Reads command lines from stdin and dispatches them as the console
//! sender under the configured root label.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{debug, error, info, warn};

use concierge::config::env::{apply_env_overrides, get_config_dir};
use concierge::config::{ConfigStore, Settings};
use concierge::host::bootstrap;
use concierge::placeholder::PlaceholderRegistry;
use concierge::platform::{ConsoleSender, Sender};
use concierge::sound::TokioScheduler;

#[tokio::main]
async fn main() -> Result<()> {
    let config_dir = get_config_dir();
    let mut store = ConfigStore::with_defaults();
    let loaded = if Path::new(&config_dir).is_dir() {
        Some(store.load_dir(&config_dir)?)
    } else {
        None
    };

    // Debug flag is read ahead of validation so logging is up before it runs
    let debug_enabled = Settings::from_source(&store)
        .map(|settings| apply_env_overrides(settings).debug)
        .unwrap_or(false);
    let level = if debug_enabled {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Concierge v{} starting...", env!("CARGO_PKG_VERSION"));
    match loaded {
        Some(count) => info!("Loaded {} documents from {}", count, config_dir),
        None => warn!("Config directory {} not found, using bundled defaults", config_dir),
    }

    let scheduler = Arc::new(TokioScheduler::new(tokio::runtime::Handle::current()));
    let dispatcher = bootstrap(store, PlaceholderRegistry::global(), scheduler).map_err(|e| {
        error!("Failed to start: {}", e);
        error!("Please check the documents in {}.", config_dir);
        e
    })?;

    let console: Arc<dyn Sender> = Arc::new(ConsoleSender::new());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    info!(
        "Type a command for '{}' (e.g. 'help'), Ctrl+D to exit",
        dispatcher.templates().settings().name
    );

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            line = lines.next_line() => match line? {
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => {
                    let verdict = dispatcher.dispatch_line(&console, &line);
                    debug!("'{}' -> {:?}", line.trim(), verdict);
                }
                None => {
                    info!("Input closed");
                    break;
                }
            },
        }
    }

    info!("Exiting...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C");
}
