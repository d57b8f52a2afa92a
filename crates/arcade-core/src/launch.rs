//! Launch planning and realization

use std::path::PathBuf;

use arcade_catalog::{Catalog, missing_from, required_chain};
use arcade_fs::DataRoot;
use arcade_sync::{CachedItem, ContentSource, ExternalStore, Progress, sync_batch};
use tracing::{info, warn};

use crate::error::{Error, Result};

/// The required-archive expansion for one requested workload.
///
/// `missing` is a normal result, not an error: the caller checks it (and
/// renders it) before attempting to realize anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub workload: String,
    pub required: Vec<String>,
    pub missing: Vec<String>,
}

impl LaunchPlan {
    pub fn is_ready(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Parameters handed to the execution shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchParams {
    /// Absolute path of the primary content archive in the ROM cache.
    pub rom_path: PathBuf,
    /// The resolved workload name.
    pub workload: String,
    /// Absolute path of the workload catalog file.
    pub catalog_path: PathBuf,
    /// Absolute path of the local data root.
    pub data_root: PathBuf,
}

/// Expand `name` against the catalog and the external store.
pub fn plan(catalog: &Catalog, name: &str, store: &ExternalStore) -> LaunchPlan {
    let required = required_chain(catalog, name);
    let missing = missing_from(&required, &store.available());
    if !missing.is_empty() {
        warn!(workload = name, missing = ?missing, "required archives unavailable");
    }
    LaunchPlan {
        workload: name.to_string(),
        required,
        missing,
    }
}

/// Copy every required archive into the ROM cache, in chain order, and
/// produce the launch parameters.
///
/// Archives already cached at their expected size are skipped. The batch
/// aborts on the first failed item; a plan with missing members fails
/// immediately without touching the cache.
pub fn realize(
    plan: &LaunchPlan,
    store: &ExternalStore,
    data_root: &DataRoot,
    progress: &mut dyn FnMut(Progress),
) -> Result<LaunchParams> {
    if !plan.is_ready() {
        return Err(Error::MissingDependency {
            names: plan.missing.clone(),
        });
    }

    let cache_dir = data_root.rom_cache();
    let items: Vec<CachedItem> = plan
        .required
        .iter()
        .map(|name| {
            let expected = store.get(name).map(|archive| archive.size);
            CachedItem::new(name, cache_dir.join(format!("{name}.zip")), expected)
        })
        .collect();

    let report = sync_batch(&items, |item| store.open(&item.name), progress)?;
    info!(
        workload = %plan.workload,
        downloaded = report.downloaded,
        skipped = report.skipped,
        "ROM cache ready"
    );

    Ok(LaunchParams {
        rom_path: cache_dir.join(format!("{}.zip", plan.workload)),
        workload: plan.workload.clone(),
        catalog_path: data_root.catalog_file(),
        data_root: data_root.path().to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_catalog::CatalogEntry;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn store_with(archives: &[(&str, &str)]) -> (TempDir, ExternalStore) {
        let dir = TempDir::new().unwrap();
        for (name, content) in archives {
            fs::write(dir.path().join(format!("{name}.zip")), content).unwrap();
        }
        let store = ExternalStore::scan(dir.path());
        (dir, store)
    }

    fn clone_catalog() -> Catalog {
        Catalog::from_entries([
            CatalogEntry::new("base"),
            CatalogEntry::new("clone1").with_parent("base"),
        ])
    }

    #[test]
    fn plan_reports_missing_members_in_chain_order() {
        let (_dir, store) = store_with(&[("base", "b")]);

        let plan = plan(&clone_catalog(), "clone1", &store);

        assert_eq!(plan.required, ["clone1", "base"]);
        assert_eq!(plan.missing, ["clone1"]);
        assert!(!plan.is_ready());
    }

    #[test]
    fn realize_refuses_a_plan_with_missing_members() {
        let (_dir, store) = store_with(&[]);
        let root_dir = TempDir::new().unwrap();
        let root = DataRoot::new(root_dir.path());

        let plan = plan(&clone_catalog(), "clone1", &store);
        let err = realize(&plan, &store, &root, &mut |_| {}).unwrap_err();

        assert!(matches!(err, Error::MissingDependency { .. }));
        assert!(!root.rom_cache().exists());
    }

    #[test]
    fn realize_fills_the_cache_and_hands_off_paths() {
        let (_dir, store) = store_with(&[("clone1", "clone rom"), ("base", "base rom")]);
        let root_dir = TempDir::new().unwrap();
        let root = DataRoot::new(root_dir.path().join("arcade"));

        let plan = plan(&clone_catalog(), "clone1", &store);
        let mut seen = Vec::new();
        let params = realize(&plan, &store, &root, &mut |p| seen.push(p.name)).unwrap();

        assert_eq!(params.workload, "clone1");
        assert_eq!(params.rom_path, root.rom_cache().join("clone1.zip"));
        assert_eq!(params.catalog_path, root.catalog_file());
        assert_eq!(params.data_root, root.path());

        assert_eq!(seen, ["clone1", "base"]);
        assert_eq!(
            fs::read_to_string(root.rom_cache().join("base.zip")).unwrap(),
            "base rom"
        );
    }
}
