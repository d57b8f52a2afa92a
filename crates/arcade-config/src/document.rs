//! Line-oriented INI document model

use std::fs;
use std::io;
use std::ops::Range;
use std::path::Path;

use tracing::warn;

/// Line separator used when saving.
#[cfg(windows)]
const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
const LINE_SEPARATOR: &str = "\n";

/// A located section: the header line index and the body line range.
///
/// The body runs from the line after the header up to (not including) the
/// next section header, or the end of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub header: usize,
    pub body: Range<usize>,
}

/// An INI-like configuration file held as an ordered sequence of raw lines.
///
/// Lines are never reformatted wholesale: an unmodified document saves back
/// to the same line set in the same order. Mutations are tracked so callers
/// can skip the write entirely when nothing changed.
#[derive(Debug, Clone, Default)]
pub struct ConfigDocument {
    lines: Vec<String>,
    modified: bool,
}

impl ConfigDocument {
    /// Load a document from `path`.
    ///
    /// An absent or unreadable file yields an empty document; the unreadable
    /// case is logged and otherwise treated as "nothing on disk".
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => Self::from_lines(content.lines().map(String::from)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "settings file unreadable, treating as empty");
                Self::default()
            }
        }
    }

    /// Build a document from raw lines.
    pub fn from_lines(lines: impl IntoIterator<Item = String>) -> Self {
        Self {
            lines: lines.into_iter().collect(),
            modified: false,
        }
    }

    /// The raw lines, in document order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether any mutation actually changed the document.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Find a section by name, case-insensitive, ignoring whitespace around
    /// the bracketed name.
    pub fn find_section(&self, name: &str) -> Option<Section> {
        let header = self
            .lines
            .iter()
            .position(|line| section_name(line).is_some_and(|n| n.eq_ignore_ascii_case(name)))?;
        let end = self.lines[header + 1..]
            .iter()
            .position(|line| is_section_header(line))
            .map(|offset| header + 1 + offset)
            .unwrap_or(self.lines.len());
        Some(Section {
            header,
            body: header + 1..end,
        })
    }

    /// Read the value of `key` within `section`, skipping comment lines.
    pub fn get_in_section(&self, section: &str, key: &str) -> Option<&str> {
        let section = self.find_section(section)?;
        self.lines[section.body]
            .iter()
            .filter(|line| !line.trim_start().starts_with(';'))
            .find_map(|line| key_value(line, key))
    }

    /// Set `key = value` within `section`.
    ///
    /// The first line in the section whose leading token matches `key`
    /// (case-insensitive) is replaced in place; if none matches, the pair is
    /// appended at the section's end. A missing section is created at the end
    /// of the document, preceded by a blank separator line when the document
    /// is non-empty and does not already end blank.
    pub fn upsert_in_section(&mut self, section: &str, key: &str, value: &str) {
        let new_line = format!("{key} = {value}");

        let Some(range) = self.find_section(section).map(|s| s.body) else {
            self.append_section(section);
            self.push_line(new_line);
            return;
        };

        for idx in range.clone() {
            if key_value(&self.lines[idx], key).is_some() {
                if self.lines[idx] != new_line {
                    self.lines[idx] = new_line;
                    self.modified = true;
                }
                return;
            }
        }

        self.lines.insert(range.end, new_line);
        self.modified = true;
    }

    /// Insert `key = value` into `section` only when no line in that section
    /// already starts with `key` (trimmed, case-insensitive). Creates the
    /// section when absent.
    pub fn ensure_key(&mut self, section: &str, key: &str, value: &str) {
        let Some(range) = self.find_section(section).map(|s| s.body) else {
            self.append_section(section);
            self.push_line(format!("{key} = {value}"));
            return;
        };

        let present = self.lines[range.clone()]
            .iter()
            .any(|line| starts_with_ignore_case(line.trim(), key));
        if present {
            return;
        }

        self.lines.insert(range.end, format!("{key} = {value}"));
        self.modified = true;
    }

    /// Replace every line whose trimmed content equals `old_trimmed`.
    pub fn replace_exact(&mut self, old_trimmed: &str, new_line: &str) {
        for line in &mut self.lines {
            if line.trim() == old_trimmed && line != new_line {
                *line = new_line.to_string();
                self.modified = true;
            }
        }
    }

    /// Drop every line whose trimmed form starts with `prefix`,
    /// case-insensitive.
    pub fn delete_by_prefix(&mut self, prefix: &str) {
        let before = self.lines.len();
        self.lines
            .retain(|line| !starts_with_ignore_case(line.trim(), prefix));
        if self.lines.len() != before {
            self.modified = true;
        }
    }

    /// Save the document to `path`, joining lines with the platform line
    /// separator and creating parent directories as needed.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.lines.join(LINE_SEPARATOR))
    }

    /// Append a canonical `[ Name ]` header at the end of the document, with
    /// a blank separator line when the last line is non-blank.
    fn append_section(&mut self, name: &str) {
        if let Some(last) = self.lines.last() {
            if !last.trim().is_empty() {
                self.lines.push(String::new());
            }
        }
        self.lines.push(format!("[ {name} ]"));
        self.modified = true;
    }

    fn push_line(&mut self, line: String) {
        self.lines.push(line);
        self.modified = true;
    }
}

fn is_section_header(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('[') && trimmed.ends_with(']')
}

/// The trimmed name inside a `[ Name ]` header, or None for ordinary lines.
fn section_name(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('[')?.strip_suffix(']')?;
    Some(inner.trim())
}

fn starts_with_ignore_case(line: &str, prefix: &str) -> bool {
    line.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Parse `key = value` when the line's leading token matches `key`
/// (case-insensitive), returning the trimmed value.
fn key_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let trimmed = line.trim_start();
    if !starts_with_ignore_case(trimmed, key) {
        return None;
    }
    let rest = trimmed[key.len()..].trim_start();
    let value = rest.strip_prefix('=')?;
    Some(value.trim())
}
