//! Sectioned key/value data files
//!
//! The format feeding every content subsystem:
//!
//! ```text
//! # comment
//! [NPC:seraphine]
//! name = Seraphine
//! archetype = mentor
//! dialogue_state = initial, after_ritual
//! ```
//!
//! Parsing is deliberately lenient: files are authored by hand alongside
//! the narrative, so unknown section types, malformed lines, and missing
//! properties are warnings with defaults, never hard failures. Only an
//! unreadable file aborts the load.

use std::fs;
use std::path::Path;

use crate::error::{DataError, ParseWarning};
use crate::value::{truncate_to_boundary, Value};

/// Longest line examined; bytes past this are dropped
pub const MAX_LINE_LEN: usize = 1024;
/// Longest section type, section id, or property key
pub const MAX_NAME_LEN: usize = 63;
/// Longest raw property value
pub const MAX_VALUE_LEN: usize = 511;

/// One `[TYPE:ID]` section with its properties in file order
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    kind: String,
    id: String,
    properties: Vec<(String, Value)>,
}

impl Section {
    fn new(kind: String, id: String) -> Self {
        Self {
            kind,
            id,
            properties: Vec::with_capacity(32),
        }
    }

    /// Section type, e.g. `NPC`
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Section identifier, e.g. `seraphine`
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Look up a property value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Properties in insertion order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Insert a property. A duplicate key overwrites the earlier value
    /// (last write wins - the format's only leniency about duplication).
    fn insert(&mut self, key: String, value: Value) {
        if let Some(slot) = self.properties.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.properties.push((key, value));
        }
    }

    // Typed accessors with default fallback; missing keys and shape
    // mismatches both yield the default.

    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).map_or(default, |v| v.as_str_or(default))
    }

    pub fn int_or(&self, key: &str, default: i64) -> i64 {
        self.get(key).map_or(default, |v| v.as_int_or(default))
    }

    pub fn float_or(&self, key: &str, default: f64) -> f64 {
        self.get(key).map_or(default, |v| v.as_float_or(default))
    }

    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.get(key).map_or(default, |v| v.as_bool_or(default))
    }

    pub fn array(&self, key: &str) -> &[String] {
        self.get(key).map_or(&[], |v| v.as_array())
    }
}

/// A parsed data file: ordered sections plus accumulated warnings
#[derive(Debug, Clone, Default)]
pub struct DataFile {
    sections: Vec<Section>,
    warnings: Vec<ParseWarning>,
}

impl DataFile {
    /// Load and parse a data file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<DataFile, DataError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| DataError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;

        let file = Self::parse(&String::from_utf8_lossy(&bytes));
        tracing::info!(
            path = %path.display(),
            sections = file.section_count(),
            warnings = file.warnings.len(),
            "data file loaded"
        );
        Ok(file)
    }

    /// Parse data-file text. Never fails; problems become warnings.
    pub fn parse(text: &str) -> DataFile {
        let mut file = DataFile {
            sections: Vec::with_capacity(16),
            warnings: Vec::new(),
        };

        for (index, raw_line) in text.split('\n').enumerate() {
            let line_number = index + 1;

            let mut line = raw_line;
            if line.len() > MAX_LINE_LEN {
                file.warn(line_number, format!("line exceeds {MAX_LINE_LEN} bytes, truncated"));
                let cut = truncate_to_boundary(line, MAX_LINE_LEN);
                line = &raw_line[..cut.len()];
            }
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some((kind, id)) = parse_section_header(line) {
                file.sections.push(Section::new(kind, id));
                continue;
            }

            if let Some((key, value)) = parse_key_value(line) {
                match file.sections.last_mut() {
                    Some(section) => section.insert(key, Value::infer(&value)),
                    None => {
                        file.warn(
                            line_number,
                            "key-value pair found before any section".to_owned(),
                        );
                    }
                }
                continue;
            }

            file.warn(line_number, format!("invalid syntax: '{line}'"));
        }

        file
    }

    /// All sections in file order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// All sections of one type, in file order.
    pub fn sections_of<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Section> {
        self.sections.iter().filter(move |s| s.kind == kind)
    }

    /// Exact `(type, id)` lookup.
    pub fn section(&self, kind: &str, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind && s.id == id)
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Non-fatal problems noticed during the parse.
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    fn warn(&mut self, line: usize, message: String) {
        tracing::warn!(line, "{message}");
        self.warnings.push(ParseWarning { line, message });
    }
}

/// `[TYPE:ID]` with both parts trimmed, non-empty, and capped at
/// [`MAX_NAME_LEN`] bytes.
fn parse_section_header(line: &str) -> Option<(String, String)> {
    let inner = line.strip_prefix('[')?;
    let end = inner.find(']')?;
    let (kind, id) = inner[..end].split_once(':')?;

    let kind = truncate_to_boundary(kind.trim(), MAX_NAME_LEN);
    let id = truncate_to_boundary(id.trim(), MAX_NAME_LEN);

    if kind.is_empty() || id.is_empty() {
        return None;
    }
    Some((kind, id))
}

/// `KEY = VALUE` with the key capped at [`MAX_NAME_LEN`] and the value at
/// [`MAX_VALUE_LEN`] bytes. Both must be non-empty after trimming.
fn parse_key_value(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once('=')?;

    let key = key.trim();
    if key.is_empty() || key.len() > MAX_NAME_LEN {
        return None;
    }

    let value = truncate_to_boundary(value, MAX_VALUE_LEN);
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    Some((key.to_owned(), value.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# Necroshell world data
; alternate comment marker

[NPC:seraphine]
name = Seraphine
archetype = mentor
hidden = false
dialogue_state = initial, after_ritual

[NPC:vex]
name = Vex
trust = 40

[LOCATION:tower]
name = The Bone Tower
danger = 2.5
";

    #[test]
    fn test_sections_in_file_order() {
        let file = DataFile::parse(SAMPLE);
        assert_eq!(file.section_count(), 3);

        let npcs: Vec<_> = file.sections_of("NPC").map(Section::id).collect();
        assert_eq!(npcs, vec!["seraphine", "vex"]);
    }

    #[test]
    fn test_exact_section_lookup() {
        let file = DataFile::parse(SAMPLE);
        let tower = file.section("LOCATION", "tower").expect("section exists");
        assert_eq!(tower.str_or("name", ""), "The Bone Tower");
        assert_eq!(tower.float_or("danger", 0.0), 2.5);
        assert!(file.section("LOCATION", "crypt").is_none());
    }

    #[test]
    fn test_typed_values() {
        let file = DataFile::parse(SAMPLE);
        let seraphine = file.section("NPC", "seraphine").expect("section exists");

        assert_eq!(seraphine.str_or("archetype", "neutral"), "mentor");
        assert!(!seraphine.bool_or("hidden", true));
        assert_eq!(
            seraphine.array("dialogue_state"),
            ["initial".to_owned(), "after_ritual".to_owned()]
        );
    }

    #[test]
    fn test_properties_keep_insertion_order() {
        let file = DataFile::parse(SAMPLE);
        let seraphine = file.section("NPC", "seraphine").expect("section exists");
        let keys: Vec<_> = seraphine.properties().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["name", "archetype", "hidden", "dialogue_state"]);
    }

    #[test]
    fn test_duplicate_key_last_write_wins() {
        let file = DataFile::parse("[NPC:a]\nname = First\nname = Second\n");
        let section = file.section("NPC", "a").expect("section exists");
        assert_eq!(section.str_or("name", ""), "Second");
        assert_eq!(section.property_count(), 1);
    }

    #[test]
    fn test_orphan_property_warns() {
        let file = DataFile::parse("name = Nobody\n[NPC:a]\nname = Somebody\n");
        assert_eq!(file.warnings().len(), 1);
        assert_eq!(file.warnings()[0].line, 1);
        // The file itself stays usable
        assert_eq!(file.section_count(), 1);
    }

    #[test]
    fn test_garbage_line_warns_but_does_not_abort() {
        let file = DataFile::parse("[NPC:a]\nthis is not a property\nname = A\n");
        assert_eq!(file.warnings().len(), 1);
        let section = file.section("NPC", "a").expect("section exists");
        assert_eq!(section.str_or("name", ""), "A");
    }

    #[test]
    fn test_malformed_headers_are_garbage() {
        let file = DataFile::parse("[NPC]\n[:id]\n[TYPE:]\n");
        assert_eq!(file.section_count(), 0);
        assert_eq!(file.warnings().len(), 3);
    }

    #[test]
    fn test_crlf_lines() {
        let file = DataFile::parse("[NPC:a]\r\nname = A\r\n");
        let section = file.section("NPC", "a").expect("section exists");
        assert_eq!(section.str_or("name", ""), "A");
    }

    #[test]
    fn test_header_trims_whitespace() {
        let file = DataFile::parse("  [ NPC : seraphine ]  \nname = S\n");
        assert!(file.section("NPC", "seraphine").is_some());
    }

    #[test]
    fn test_missing_key_returns_default() {
        let file = DataFile::parse("[NPC:a]\nname = A\n");
        let section = file.section("NPC", "a").expect("section exists");
        assert_eq!(section.int_or("age", 30), 30);
        assert!(section.bool_or("hostile", true));
        assert!(section.array("dialogue_state").is_empty());
    }
}
