//! Ready-made workload catalogs for test scenarios.

use arcade_catalog::{Catalog, CatalogEntry};

/// A parent and its clone: `clone1` inherits ROM data from `base`.
pub fn clone_pair() -> Catalog {
    Catalog::from_entries([
        CatalogEntry::new("base").with_display_name("Base Game"),
        CatalogEntry::new("clone1")
            .with_display_name("Base Game (clone)")
            .with_parent("base"),
    ])
}

/// A lightgun family plus an unrelated stick game, for capability queries.
pub fn gun_game_family() -> Catalog {
    Catalog::from_entries([
        CatalogEntry::new("gungame").with_capabilities(["gun"]),
        CatalogEntry::new("gunclone").with_parent("gungame"),
        CatalogEntry::new("stickgame").with_capabilities(["analog_joystick"]),
    ])
}
