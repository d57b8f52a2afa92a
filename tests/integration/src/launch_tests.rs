//! End-to-end launch preparation scenarios

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use arcade_catalog::{CapabilityCache, workload_status};
use arcade_core::{Error, plan, realize};
use arcade_test_utils::{TestRoot, clone_pair, gun_game_family};
use pretty_assertions::assert_eq;

#[test]
fn full_launch_flow_fills_cache_and_reports_progress() {
    let fixture = TestRoot::new();
    fixture.add_archive("clone1", 32);
    fixture.add_archive("base", 64);
    let root = fixture.data_root();
    let store = fixture.store();

    let plan = plan(&clone_pair(), "clone1", &store);
    assert!(plan.is_ready());

    let mut progress = Vec::new();
    let params = realize(&plan, &store, &root, &mut |p| {
        progress.push((p.done, p.total, p.name));
    })
    .unwrap();

    assert_eq!(
        progress,
        [(1, 2, "clone1".to_string()), (2, 2, "base".to_string())]
    );
    assert_eq!(params.rom_path, root.rom_cache().join("clone1.zip"));
    assert_eq!(fs::read(&params.rom_path).unwrap().len(), 32);
    assert_eq!(fs::read(root.rom_cache().join("base.zip")).unwrap().len(), 64);
}

#[test]
fn second_launch_skips_archives_cached_at_expected_size() {
    let fixture = TestRoot::new();
    fixture.add_archive("clone1", 32);
    fixture.add_archive("base", 64);
    let root = fixture.data_root();
    let store = fixture.store();

    let plan = plan(&clone_pair(), "clone1", &store);
    realize(&plan, &store, &root, &mut |_| {}).unwrap();

    // Mark the cached copies, then launch again: sizes match, so the
    // marked bytes must survive untouched.
    let cached = root.rom_cache().join("base.zip");
    fs::write(&cached, vec![b'm'; 64]).unwrap();

    realize(&plan, &store, &root, &mut |_| {}).unwrap();
    assert_eq!(fs::read(&cached).unwrap(), vec![b'm'; 64]);
}

#[test]
fn missing_archives_stop_the_flow_before_any_copy() {
    let fixture = TestRoot::new();
    fixture.add_archive("clone1", 32);
    let root = fixture.data_root();
    let store = fixture.store();

    let plan = plan(&clone_pair(), "clone1", &store);
    assert_eq!(plan.missing, ["base"]);

    let err = realize(&plan, &store, &root, &mut |_| {}).unwrap_err();
    assert!(matches!(err, Error::MissingDependency { ref names } if names == &["base"]));
    assert!(!root.rom_cache().exists());
}

#[test]
fn workload_list_reflects_store_contents() {
    let fixture = TestRoot::new();
    fixture.add_archive("base", 64);
    let store = fixture.store();

    let statuses = workload_status(&clone_pair(), &store.available());

    let base = statuses.iter().find(|s| s.name == "base").unwrap();
    assert!(base.launchable);
    assert_eq!(base.summary, "base.zip found");

    let clone = statuses.iter().find(|s| s.name == "clone1").unwrap();
    assert!(!clone.launchable);
    assert_eq!(clone.summary, "missing clone1.zip");
}

#[test]
fn overlay_capability_query_walks_parent_chain_once_loaded() {
    let cache = CapabilityCache::new();
    let source = Path::new("Config/Games.xml");
    let tags: HashSet<String> = ["gun".to_string()].into();

    assert!(cache.has_any_capability(source, "gunclone", &tags, |_| gun_game_family()));
    assert!(!cache.has_any_capability(source, "stickgame", &tags, |_| gun_game_family()));
}
