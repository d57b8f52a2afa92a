//! Versioned settings-file migration

use std::path::Path;

use tracing::{debug, warn};

use crate::document::ConfigDocument;

/// One migration step, applied uniformly in table order.
///
/// Every variant is independently idempotent: applying it to a document that
/// already satisfies it changes nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationRule {
    /// Replace every line whose trimmed content equals `from`.
    ReplaceLine {
        from: &'static str,
        to: &'static str,
    },
    /// Drop every line whose trimmed form starts with `prefix`,
    /// case-insensitive.
    DeleteByPrefix { prefix: &'static str },
    /// Insert `key = value` into `section` unless a line there already
    /// starts with `key`; the section is created when absent.
    EnsureKey {
        section: &'static str,
        key: &'static str,
        value: &'static str,
    },
}

impl MigrationRule {
    fn apply(&self, doc: &mut ConfigDocument) {
        match self {
            Self::ReplaceLine { from, to } => doc.replace_exact(from, to),
            Self::DeleteByPrefix { prefix } => doc.delete_by_prefix(prefix),
            Self::EnsureKey {
                section,
                key,
                value,
            } => doc.ensure_key(section, key, value),
        }
    }
}

/// The built-in rule table bringing a settings file up to the current
/// control-mapping defaults.
pub fn builtin_rules() -> Vec<MigrationRule> {
    use MigrationRule::{DeleteByPrefix, EnsureKey, ReplaceLine};

    let replace = |from, to| ReplaceLine { from, to };

    vec![
        // Driving games: rebind brake and gear shifts off the WASD cluster.
        replace(
            "InputBrake = KEY_S,JOY1_ZAXIS_POS",
            "InputBrake = KEY_X,JOY1_ZAXIS_POS",
        ),
        replace(
            "InputGearShiftUp = KEY_Y,JOY1_BUTTON6",
            "InputGearShiftUp = KEY_I,JOY1_BUTTON6",
        ),
        replace(
            "InputGearShiftDown = KEY_H,JOY1_BUTTON5",
            "InputGearShiftDown = KEY_K,JOY1_BUTTON5",
        ),
        replace(
            "InputGearShift1 = KEY_Q,JOY1_BUTTON3",
            "InputGearShift1 = KEY_7,JOY1_BUTTON3",
        ),
        replace(
            "InputGearShift2 = KEY_W,JOY1_BUTTON1",
            "InputGearShift2 = KEY_8,JOY1_BUTTON1",
        ),
        replace(
            "InputGearShift3 = KEY_E,JOY1_BUTTON4",
            "InputGearShift3 = KEY_9,JOY1_BUTTON4",
        ),
        replace(
            "InputGearShift4 = KEY_R,JOY1_BUTTON2",
            "InputGearShift4 = KEY_0,JOY1_BUTTON2",
        ),
        replace("InputGearShiftN = KEY_T", "InputGearShiftN = KEY_6"),
        replace("InputAutoTrigger = 0", "InputAutoTrigger = 1"),
        replace("InputAutoTrigger2 = 0", "InputAutoTrigger2 = 1"),
        // Analog joystick: inverted mouse axes, pedal zone doubles as
        // trigger/event.
        replace(
            "InputAnalogJoyX = JOY_XAXIS,MOUSE_XAXIS",
            "InputAnalogJoyX = JOY_XAXIS,MOUSE_XAXIS_INV",
        ),
        replace(
            "InputAnalogJoyY = JOY_YAXIS,MOUSE_YAXIS",
            "InputAnalogJoyY = JOY_YAXIS,MOUSE_YAXIS_INV",
        ),
        replace(
            "InputAnalogJoyTrigger = KEY_A,JOY_BUTTON1,MOUSE_LEFT_BUTTON",
            "InputAnalogJoyTrigger = KEY_A,KEY_W,JOY1_BUTTON1,MOUSE_LEFT_BUTTON",
        ),
        replace(
            "InputAnalogJoyEvent = KEY_S,JOY_BUTTON2,MOUSE_RIGHT_BUTTON",
            "InputAnalogJoyEvent = KEY_S,KEY_X,JOY1_BUTTON2,MOUSE_RIGHT_BUTTON",
        ),
        // Gun games: right stick and trigger axes join the default mappings.
        replace(
            "InputGunX = MOUSE_XAXIS,JOY1_XAXIS",
            "InputGunX = MOUSE_XAXIS,JOY1_RXAXIS,JOY1_XAXIS",
        ),
        replace(
            "InputGunY = MOUSE_YAXIS,JOY1_YAXIS",
            "InputGunY = MOUSE_YAXIS,JOY1_RYAXIS,JOY1_YAXIS",
        ),
        replace(
            "InputTrigger = KEY_A,JOY1_BUTTON1,MOUSE_LEFT_BUTTON",
            "InputTrigger = KEY_A,JOY1_RZAXIS_POS,JOY1_BUTTON1,MOUSE_LEFT_BUTTON",
        ),
        replace(
            "InputOffscreen = KEY_S,JOY1_BUTTON2,MOUSE_RIGHT_BUTTON",
            "InputOffscreen = KEY_S,JOY1_ZAXIS_POS,JOY1_BUTTON2,MOUSE_RIGHT_BUTTON",
        ),
        // Analog-gun games: same axis additions, plus player-2 defaults where
        // still unmapped.
        replace(
            "InputAnalogGunX = MOUSE_XAXIS,JOY1_XAXIS",
            "InputAnalogGunX = MOUSE_XAXIS,JOY1_RXAXIS,JOY1_XAXIS",
        ),
        replace(
            "InputAnalogGunY = MOUSE_YAXIS,JOY1_YAXIS",
            "InputAnalogGunY = MOUSE_YAXIS,JOY1_RYAXIS,JOY1_YAXIS",
        ),
        replace(
            "InputAnalogTriggerLeft = KEY_A,JOY1_BUTTON1,MOUSE_LEFT_BUTTON",
            "InputAnalogTriggerLeft = KEY_A,JOY1_RZAXIS_POS,JOY1_BUTTON1,MOUSE_LEFT_BUTTON",
        ),
        replace(
            "InputAnalogTriggerRight = KEY_S,JOY1_BUTTON2,MOUSE_RIGHT_BUTTON",
            "InputAnalogTriggerRight = KEY_S,JOY1_ZAXIS_POS,JOY1_BUTTON2,MOUSE_RIGHT_BUTTON",
        ),
        replace(
            "InputAnalogGunX2 = NONE",
            "InputAnalogGunX2 = JOY2_RXAXIS,JOY2_XAXIS",
        ),
        replace(
            "InputAnalogGunY2 = NONE",
            "InputAnalogGunY2 = JOY2_RYAXIS,JOY2_YAXIS",
        ),
        replace(
            "InputAnalogTriggerLeft2 = NONE",
            "InputAnalogTriggerLeft2 = JOY2_RZAXIS_POS,JOY2_BUTTON1",
        ),
        replace(
            "InputAnalogTriggerRight2 = NONE",
            "InputAnalogTriggerRight2 = JOY2_ZAXIS_POS,JOY2_BUTTON2",
        ),
        // Keys dropped from the current renderer.
        DeleteByPrefix {
            prefix: "PingPongFlipLine",
        },
        DeleteByPrefix {
            prefix: "LegacyStatusBit",
        },
        // Newly introduced settings.
        EnsureKey {
            section: "Global",
            key: "LegacyReal3DTiming",
            value: "1",
        },
    ]
}

/// Applies the migration rule table to the settings file on startup.
///
/// Safe to invoke on every launch: a document that already satisfies the
/// whole table produces zero writes.
#[derive(Debug)]
pub struct Migrator {
    rules: Vec<MigrationRule>,
}

impl Migrator {
    /// Migrator with the built-in rule table.
    pub fn new() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }

    /// Migrator with a custom rule table.
    pub fn with_rules(rules: Vec<MigrationRule>) -> Self {
        Self { rules }
    }

    /// Apply the rule table to the document in place.
    pub fn apply(&self, doc: &mut ConfigDocument) {
        for rule in &self.rules {
            rule.apply(doc);
        }
    }

    /// Migrate the settings file at `path`.
    ///
    /// Returns true when the file was rewritten. An absent file is nothing
    /// to migrate; a write failure is logged and leaves the file as it was.
    pub fn migrate(&self, path: &Path) -> bool {
        if !path.exists() {
            return false;
        }

        let mut doc = ConfigDocument::load(path);
        self.apply(&mut doc);
        if !doc.is_modified() {
            return false;
        }

        match doc.save(path) {
            Ok(()) => {
                debug!(path = %path.display(), "settings file migrated");
                true
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to write migrated settings");
                false
            }
        }
    }
}

impl Default for Migrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rule_table_orders_replacements_before_deletions_and_ensures() {
        let rules = builtin_rules();

        let first_delete = rules
            .iter()
            .position(|r| matches!(r, MigrationRule::DeleteByPrefix { .. }))
            .unwrap();
        let first_ensure = rules
            .iter()
            .position(|r| matches!(r, MigrationRule::EnsureKey { .. }))
            .unwrap();
        let last_replace = rules
            .iter()
            .rposition(|r| matches!(r, MigrationRule::ReplaceLine { .. }))
            .unwrap();

        assert!(last_replace < first_delete);
        assert!(first_delete < first_ensure);
    }

    #[test]
    fn apply_is_idempotent_on_document() {
        let migrator = Migrator::new();
        let mut doc = ConfigDocument::from_lines(
            [
                "[ Global ]",
                "InputBrake = KEY_S,JOY1_ZAXIS_POS",
                "PingPongFlipLine = 1",
            ]
            .map(String::from),
        );

        migrator.apply(&mut doc);
        let after_first: Vec<String> = doc.lines().to_vec();
        assert!(doc.is_modified());

        let mut doc = ConfigDocument::from_lines(after_first.clone());
        migrator.apply(&mut doc);

        assert!(!doc.is_modified());
        assert_eq!(doc.lines(), after_first.as_slice());
    }
}
