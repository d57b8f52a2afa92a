//! Video settings applied into the `[ Global ]` section

use std::io;
use std::path::Path;

use crate::document::ConfigDocument;

/// Section holding the launcher-managed settings keys.
const SETTINGS_SECTION: &str = "Global";

/// The user-adjustable video settings the launcher writes through to the
/// emulator's settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoSettings {
    pub x_resolution: u32,
    pub y_resolution: u32,
    pub wide_screen: bool,
    pub wide_background: bool,
}

impl Default for VideoSettings {
    /// Native panel resolution, 4:3.
    fn default() -> Self {
        Self {
            x_resolution: 496,
            y_resolution: 384,
            wide_screen: false,
            wide_background: false,
        }
    }
}

impl VideoSettings {
    /// Read the settings back out of the file at `path`.
    ///
    /// Missing keys, comments, and unparsable values fall back to the
    /// defaults, so a hand-edited or absent file is never an error.
    pub fn read(path: &Path) -> Self {
        let doc = ConfigDocument::load(path);
        let defaults = Self::default();
        Self {
            x_resolution: read_u32(&doc, "XResolution").unwrap_or(defaults.x_resolution),
            y_resolution: read_u32(&doc, "YResolution").unwrap_or(defaults.y_resolution),
            wide_screen: read_bool(&doc, "WideScreen").unwrap_or(defaults.wide_screen),
            wide_background: read_bool(&doc, "WideBackground").unwrap_or(defaults.wide_background),
        }
    }

    /// Upsert the four settings keys into `[ Global ]` at `path`.
    ///
    /// Synthesizes the file (and its section header) from scratch when it
    /// does not exist yet; writes nothing when every key already carries the
    /// requested value.
    pub fn apply(&self, path: &Path) -> io::Result<()> {
        let mut doc = ConfigDocument::load(path);

        doc.upsert_in_section(
            SETTINGS_SECTION,
            "XResolution",
            &self.x_resolution.to_string(),
        );
        doc.upsert_in_section(
            SETTINGS_SECTION,
            "YResolution",
            &self.y_resolution.to_string(),
        );
        doc.upsert_in_section(SETTINGS_SECTION, "WideScreen", bool_value(self.wide_screen));
        doc.upsert_in_section(
            SETTINGS_SECTION,
            "WideBackground",
            bool_value(self.wide_background),
        );

        if doc.is_modified() {
            doc.save(path)?;
        }
        Ok(())
    }
}

fn bool_value(v: bool) -> &'static str {
    if v { "1" } else { "0" }
}

fn read_u32(doc: &ConfigDocument, key: &str) -> Option<u32> {
    doc.get_in_section(SETTINGS_SECTION, key)?.parse().ok()
}

fn read_bool(doc: &ConfigDocument, key: &str) -> Option<bool> {
    match doc
        .get_in_section(SETTINGS_SECTION, key)?
        .to_ascii_lowercase()
        .as_str()
    {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
