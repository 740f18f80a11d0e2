//! Process-wide placeholder registry.
//!
//! Placeholders are kept ordered by priority, ties broken by registration
//! order. Registration happens during startup; the first snapshot taken for
//! rendering seals the registry so later registrations fail loudly instead
//! of racing with renders.

use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use tracing::{debug, info};

use crate::common::error::RegistryError;
use crate::placeholder::placeholder::Placeholder;

/// Ordered, shareable view of the registered placeholders.
pub type Snapshot = Arc<[Arc<Placeholder>]>;

static GLOBAL: OnceLock<PlaceholderRegistry> = OnceLock::new();

#[derive(Default)]
struct Inner {
    entries: Vec<Arc<Placeholder>>,
    snapshot: Option<Snapshot>,
    sealed: bool,
}

/// Ordered set of globally available placeholders.
#[derive(Default)]
pub struct PlaceholderRegistry {
    inner: RwLock<Inner>,
}

impl PlaceholderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static PlaceholderRegistry {
        GLOBAL.get_or_init(PlaceholderRegistry::new)
    }

    /// Add a placeholder after every entry with a lower or equal priority.
    pub fn register(&self, placeholder: Placeholder) -> Result<(), RegistryError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.sealed {
            return Err(RegistryError::Sealed {
                syntaxes: placeholder.describe(),
            });
        }

        let priority = placeholder.priority();
        let index = inner.entries.partition_point(|p| p.priority() <= priority);
        debug!(
            "Registered placeholder {} at priority {}",
            placeholder.describe(),
            priority
        );
        inner.entries.insert(index, Arc::new(placeholder));
        inner.snapshot = None;
        Ok(())
    }

    /// Register several placeholders, stopping at the first failure.
    pub fn register_all(
        &self,
        placeholders: impl IntoIterator<Item = Placeholder>,
    ) -> Result<(), RegistryError> {
        placeholders.into_iter().try_for_each(|p| self.register(p))
    }

    /// First placeholder, in priority order, handling `token`.
    pub fn lookup(&self, token: &str) -> Option<Arc<Placeholder>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.entries.iter().find(|p| p.handles(token)).cloned()
    }

    /// Close the registry to further registration.
    pub fn seal(&self) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        Self::seal_locked(&mut inner);
    }

    fn seal_locked(inner: &mut Inner) {
        if !inner.sealed {
            inner.sealed = true;
            info!("Placeholder registry sealed with {} placeholders", inner.entries.len());
        }
    }

    pub fn is_sealed(&self) -> bool {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).sealed
    }

    /// Ordered snapshot used for rendering. Seals the registry.
    ///
    /// Sealing and snapshotting happen under one write lock, so no
    /// registration can land between them.
    pub fn snapshot(&self) -> Snapshot {
        {
            let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(snapshot) = &inner.snapshot {
                return snapshot.clone();
            }
        }

        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        Self::seal_locked(&mut inner);
        if let Some(snapshot) = &inner.snapshot {
            return snapshot.clone();
        }
        let snapshot: Snapshot = inner.entries.iter().cloned().collect();
        inner.snapshot = Some(snapshot.clone());
        snapshot
    }

    /// Iterate placeholders in priority order.
    ///
    /// Each call starts a fresh pass over the same ordering.
    pub fn all_ordered(&self) -> impl Iterator<Item = Arc<Placeholder>> {
        let snapshot = self.snapshot();
        (0..snapshot.len()).map(move |i| snapshot[i].clone())
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for PlaceholderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceholderRegistry")
            .field("len", &self.len())
            .field("sealed", &self.is_sealed())
            .finish()
    }
}
