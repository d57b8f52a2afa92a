//! Catalog entries and the name-keyed catalog map

use std::collections::{BTreeSet, HashMap};

/// A requestable workload: unique name, optional parent, capability tags.
///
/// The parent is an inheritance pointer, not ownership — a clone set relying
/// on its parent's ROM data. Capability tags describe the input hardware the
/// workload supports and are consumed read-only by the overlay collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub display_name: String,
    pub parent: Option<String>,
    pub capabilities: BTreeSet<String>,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_name: name.clone(),
            name,
            parent: None,
            capabilities: BTreeSet::new(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_capabilities<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capabilities = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Read-only map of workloads keyed by name.
///
/// Built from entries produced by the external catalog loader; this crate
/// never parses the catalog source itself.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|e| (e.name.clone(), e))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_names_keep_the_last_entry() {
        let catalog = Catalog::from_entries([
            CatalogEntry::new("scud").with_parent("old"),
            CatalogEntry::new("scud").with_parent("new"),
        ]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("scud").unwrap().parent.as_deref(), Some("new"));
    }

    #[test]
    fn display_name_defaults_to_name() {
        let entry = CatalogEntry::new("vf3");
        assert_eq!(entry.display_name, "vf3");

        let entry = CatalogEntry::new("vf3").with_display_name("Virtua Fighter 3");
        assert_eq!(entry.display_name, "Virtua Fighter 3");
    }
}
