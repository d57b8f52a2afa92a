//! Cached capability lookups over a catalog source

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::debug;

use crate::entry::Catalog;

struct CachedCatalog {
    source: PathBuf,
    catalog: Arc<Catalog>,
}

/// Per-source-path cache of the loaded catalog, serving the capability
/// queries the overlay collaborator issues on every UI refresh.
///
/// The catalog is large and reloading it per query is not acceptable, so the
/// loaded map is cached against its source path. Reloads are serialized by a
/// dedicated lock while readers keep observing the previously published map;
/// the new map is published as a whole-`Arc` swap, never mutated in place.
/// Requesting a different source path invalidates the cache.
#[derive(Default)]
pub struct CapabilityCache {
    current: RwLock<Option<CachedCatalog>>,
    reload: Mutex<()>,
}

impl CapabilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog for `source`, loading it through `loader` when the cache
    /// holds nothing or a different source path.
    pub fn catalog_for(
        &self,
        source: &Path,
        loader: impl FnOnce(&Path) -> Catalog,
    ) -> Arc<Catalog> {
        if let Some(catalog) = self.cached(source) {
            return catalog;
        }

        // One load at a time; late arrivals re-check before loading again.
        let _guard = self
            .reload
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(catalog) = self.cached(source) {
            return catalog;
        }

        debug!(source = %source.display(), "loading workload catalog");
        let catalog = Arc::new(loader(source));
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(CachedCatalog {
            source: source.to_path_buf(),
            catalog: Arc::clone(&catalog),
        });
        catalog
    }

    /// Whether `name` or any ancestor carries one of `tags`.
    ///
    /// Walks the parent chain with its own cycle guard; an entry missing
    /// from the catalog terminates the walk.
    pub fn has_any_capability(
        &self,
        source: &Path,
        name: &str,
        tags: &HashSet<String>,
        loader: impl FnOnce(&Path) -> Catalog,
    ) -> bool {
        let catalog = self.catalog_for(source, loader);

        let mut visited = HashSet::new();
        let mut current = name.to_string();
        while visited.insert(current.clone()) {
            let Some(entry) = catalog.get(&current) else {
                break;
            };
            if entry.capabilities.iter().any(|tag| tags.contains(tag)) {
                return true;
            }
            match &entry.parent {
                Some(parent) => current = parent.clone(),
                None => break,
            }
        }
        false
    }

    /// Drop the cached map; the next query reloads.
    pub fn invalidate(&self) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn cached(&self, source: &Path) -> Option<Arc<Catalog>> {
        let state = self.current.read().unwrap_or_else(PoisonError::into_inner);
        state
            .as_ref()
            .filter(|cached| cached.source == source)
            .map(|cached| Arc::clone(&cached.catalog))
    }
}
