//! End-to-end startup reconciliation scenarios

use arcade_config::VideoSettings;
use arcade_core::{apply_video_settings, initialize};
use arcade_test_utils::TestRoot;
use pretty_assertions::assert_eq;

const SHIPPED_INI: &str = "\
;; Shipped defaults
[ Global ]
InputBrake = KEY_S,JOY1_ZAXIS_POS
InputGearShiftN = KEY_T
PingPongFlipLine = 1
";

#[test]
fn first_run_installs_assets_and_migrates_settings() {
    let fixture = TestRoot::new();
    fixture.add_bundled_file("Config/Emulator.ini", SHIPPED_INI);
    fixture.add_bundled_file("Config/Games.xml", "<games/>");
    fixture.add_bundled_file("Assets/overlay.png", "png");

    initialize(&fixture.bundle(), &fixture.data_root()).unwrap();

    let ini = fixture.read_from_root("Config/Emulator.ini");
    assert!(ini.contains("InputBrake = KEY_X,JOY1_ZAXIS_POS"));
    assert!(ini.contains("InputGearShiftN = KEY_6"));
    assert!(!ini.contains("PingPongFlipLine"));
    assert!(ini.contains("LegacyReal3DTiming = 1"));

    assert_eq!(fixture.read_from_root("Config/Games.xml"), "<games/>");
    assert_eq!(fixture.read_from_root("Assets/overlay.png"), "png");
}

#[test]
fn startup_is_idempotent_across_runs() {
    let fixture = TestRoot::new();
    fixture.add_bundled_file("Config/Emulator.ini", SHIPPED_INI);

    initialize(&fixture.bundle(), &fixture.data_root()).unwrap();
    let after_first = fixture.read_from_root("Config/Emulator.ini");

    initialize(&fixture.bundle(), &fixture.data_root()).unwrap();
    let after_second = fixture.read_from_root("Config/Emulator.ini");

    assert_eq!(after_second, after_first);
}

#[test]
fn user_edits_survive_subsequent_startups() {
    let fixture = TestRoot::new();
    fixture.add_bundled_file("Config/Emulator.ini", SHIPPED_INI);

    initialize(&fixture.bundle(), &fixture.data_root()).unwrap();
    fixture.write_settings("[ Global ]\nInputBrake = KEY_CUSTOM\nMyTweak = 1");
    initialize(&fixture.bundle(), &fixture.data_root()).unwrap();

    let ini = fixture.read_from_root("Config/Emulator.ini");
    assert!(ini.contains("InputBrake = KEY_CUSTOM"));
    assert!(ini.contains("MyTweak = 1"));
}

#[test]
fn video_settings_flow_through_startup_and_reads() {
    let fixture = TestRoot::new();
    fixture.add_bundled_file("Config/Emulator.ini", SHIPPED_INI);
    let root = fixture.data_root();

    initialize(&fixture.bundle(), &root).unwrap();

    let settings = VideoSettings {
        x_resolution: 1984,
        y_resolution: 1536,
        wide_screen: true,
        wide_background: false,
    };
    apply_video_settings(&root, &settings).unwrap();

    // The migrated lines and the upserted settings coexist in [ Global ].
    let ini = fixture.read_from_root("Config/Emulator.ini");
    assert!(ini.contains("InputBrake = KEY_X,JOY1_ZAXIS_POS"));
    assert!(ini.contains("XResolution = 1984"));
    assert!(ini.contains("WideScreen = 1"));

    assert_eq!(VideoSettings::read(&root.settings_ini()), settings);
}

#[test]
fn settings_file_missing_from_bundle_is_tolerated() {
    // A bundle without a Config tree installs nothing; startup still
    // succeeds and a later settings write synthesizes the INI.
    let fixture = TestRoot::new();
    let root = fixture.data_root();

    initialize(&fixture.bundle(), &root).unwrap();
    apply_video_settings(&root, &VideoSettings::default()).unwrap();

    let ini = fixture.read_from_root("Config/Emulator.ini");
    assert!(ini.starts_with("[ Global ]"));
}
