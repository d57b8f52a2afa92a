//! Property tests for the document round-trip invariant

use arcade_config::{ConfigDocument, Migrator};
use proptest::prelude::*;

/// Lines of printable characters, free of line terminators.
///
/// Trailing blank lines are trimmed: a final empty line is not expressible
/// in a file without a trailing separator, so it cannot survive a save.
fn arb_lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[ -~]{0,60}", 0..40).prop_map(|mut lines| {
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        lines
    })
}

proptest! {
    /// Saving and reloading an unmodified document reproduces the exact line
    /// set and order.
    #[test]
    fn save_load_round_trip_preserves_lines(lines in arb_lines()) {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("Emulator.ini");

        let doc = ConfigDocument::from_lines(lines.clone());
        doc.save(&path).unwrap();

        let reloaded = ConfigDocument::load(&path);
        prop_assert_eq!(reloaded.lines(), lines.as_slice());
        prop_assert!(!reloaded.is_modified());
    }

    /// Applying the built-in rule table twice is the same as applying it
    /// once: the second pass never reports a change.
    #[test]
    fn builtin_migration_is_idempotent(lines in arb_lines()) {
        let migrator = Migrator::new();

        let mut doc = ConfigDocument::from_lines(lines);
        migrator.apply(&mut doc);
        let migrated: Vec<String> = doc.lines().to_vec();

        let mut again = ConfigDocument::from_lines(migrated.clone());
        migrator.apply(&mut again);

        prop_assert!(!again.is_modified());
        prop_assert_eq!(again.lines(), migrated.as_slice());
    }
}
