//! [`TestRoot`] builder for launcher test scenarios.

use std::fs;
use std::path::Path;

use arcade_fs::DataRoot;
use arcade_sync::{BundledTree, ExternalStore};
use tempfile::TempDir;

/// A bundled asset tree, a data root, and an external archive store, all
/// under one temporary directory.
///
/// # Example
///
/// ```rust,no_run
/// use arcade_test_utils::TestRoot;
///
/// let fixture = TestRoot::new();
/// fixture.add_bundled_file("Config/Emulator.ini", "[ Global ]");
/// fixture.add_archive("base", 64);
/// assert!(fixture.store().get("base").is_some());
/// ```
pub struct TestRoot {
    temp_dir: TempDir,
}

impl Default for TestRoot {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRoot {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("bundle")).unwrap();
        fs::create_dir_all(temp_dir.path().join("store")).unwrap();
        Self { temp_dir }
    }

    /// The bundled read-only asset tree.
    pub fn bundle(&self) -> BundledTree {
        BundledTree::new(self.temp_dir.path().join("bundle"))
    }

    /// The launcher's data root (not created until initialize runs).
    pub fn data_root(&self) -> DataRoot {
        DataRoot::new(self.temp_dir.path().join("root"))
    }

    /// Fresh scan of the external archive store.
    pub fn store(&self) -> ExternalStore {
        ExternalStore::scan(&self.temp_dir.path().join("store"))
    }

    /// Write a file into the bundled tree.
    pub fn add_bundled_file(&self, rel: &str, content: &str) {
        let path = self.temp_dir.path().join("bundle").join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Drop a `<name>.zip` archive of `size` filler bytes into the store.
    pub fn add_archive(&self, name: &str, size: usize) {
        let path = self.temp_dir.path().join("store").join(format!("{name}.zip"));
        fs::write(path, vec![b'r'; size]).unwrap();
    }

    /// Overwrite the settings INI inside the data root.
    pub fn write_settings(&self, content: &str) {
        let ini = self.data_root().settings_ini();
        fs::create_dir_all(ini.parent().unwrap()).unwrap();
        fs::write(ini, content).unwrap();
    }

    /// Read a file back out of the data root.
    pub fn read_from_root(&self, rel: &str) -> String {
        fs::read_to_string(self.temp_dir.path().join("root").join(rel)).unwrap()
    }

    pub fn root_path(&self) -> &Path {
        self.temp_dir.path()
    }
}
