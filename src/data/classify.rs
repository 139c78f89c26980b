use std::collections::{HashMap, HashSet};

use serde::{Serialize, Serializer};

use super::model::{CellValue, Table};
use crate::error::{DataError, Result};

// ---------------------------------------------------------------------------
// ClassificationCode – how a column's values vary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassificationCode {
    /// At least two distinct values.
    NotConstant,
    /// One distinct value, equal to numeric zero.
    ConstantZero,
    /// One distinct value, anything but zero.
    ConstantNonzero,
}

// ---------------------------------------------------------------------------
// ClassificationConfig – per-call header structure
// ---------------------------------------------------------------------------

/// How headers are cleaned and split before grouping.
///
/// Empty strings behave exactly like `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationConfig {
    /// Column skipped during classification, usually the time column.
    pub exclude_index: usize,
    pub first_prefix: Option<String>,
    pub first_postfix: Option<String>,
    pub second_prefix: Option<String>,
    pub second_postfix: Option<String>,
    /// Splits a cleaned header into group and leaf.
    pub separator: Option<String>,
    /// With a separator: `true` puts the group before the separator.
    pub order: bool,
}

impl ClassificationConfig {
    fn separator(&self) -> Option<&str> {
        non_empty(&self.separator)
    }

    /// Prefix and postfix bounding the text the classifier keeps.
    ///
    /// With a separator the header spans both halves, so the first prefix
    /// and the second postfix bound it. Without one, the first pair is used
    /// when any part of it is set, otherwise the second pair.
    fn bounds(&self) -> (Option<&str>, Option<&str>) {
        let first = (non_empty(&self.first_prefix), non_empty(&self.first_postfix));
        let second = (non_empty(&self.second_prefix), non_empty(&self.second_postfix));
        if self.separator().is_some() {
            (first.0, second.1)
        } else if first.0.is_some() || first.1.is_some() {
            first
        } else {
            second
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// ClassificationResult – insertion-ordered groups of entries
// ---------------------------------------------------------------------------

/// One classified column as it appears inside its group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderEntry {
    /// No separator configured: the group key is the whole header.
    Code(ClassificationCode),
    /// Separator configured: the leaf half of the header and its code.
    Leaf {
        label: String,
        code: ClassificationCode,
    },
}

impl HeaderEntry {
    pub fn code(&self) -> ClassificationCode {
        match self {
            HeaderEntry::Code(code) | HeaderEntry::Leaf { code, .. } => *code,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            HeaderEntry::Code(_) => None,
            HeaderEntry::Leaf { label, .. } => Some(label),
        }
    }
}

impl Serialize for HeaderEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            HeaderEntry::Code(code) => code.serialize(serializer),
            HeaderEntry::Leaf { label, code } => (label, code).serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderGroup {
    pub key: String,
    pub entries: Vec<HeaderEntry>,
}

/// Group key → entries, iterated in first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct ClassificationResult {
    groups: Vec<HeaderGroup>,
    index: HashMap<String, usize>,
}

impl ClassificationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry` to the group `key`, creating the group at the end on
    /// first use.
    pub fn insert_or_append(&mut self, key: &str, entry: HeaderEntry) {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                self.groups.push(HeaderGroup {
                    key: key.to_string(),
                    entries: Vec::new(),
                });
                self.index.insert(key.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[slot].entries.push(entry);
    }

    pub fn get(&self, key: &str) -> Option<&[HeaderEntry]> {
        self.index
            .get(key)
            .map(|&slot| self.groups[slot].entries.as_slice())
    }

    pub fn groups(&self) -> &[HeaderGroup] {
        &self.groups
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.key.as_str())
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of classified columns across all groups.
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }
}

// The index is derived from `groups`, so equality only looks at the groups.
impl PartialEq for ClassificationResult {
    fn eq(&self, other: &Self) -> bool {
        self.groups == other.groups
    }
}

impl Eq for ClassificationResult {}

impl Serialize for ClassificationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.key, &group.entries)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Substring extraction
// ---------------------------------------------------------------------------

/// Cut the part of `header` bounded by literal `prefix` / `postfix` text.
///
/// Tried in order: text between the first `prefix` and the nearest `postfix`
/// after it, text after the first `prefix`, text before the first `postfix`.
/// Falls back to the whole header. Empty bounds count as absent. Matching
/// is plain text, so a quoted header containing a line break is searched
/// across it.
pub fn search_substring<'h>(header: &'h str, prefix: Option<&str>, postfix: Option<&str>) -> &'h str {
    let prefix = prefix.filter(|p| !p.is_empty());
    let postfix = postfix.filter(|p| !p.is_empty());

    if let (Some(pre), Some(post)) = (prefix, postfix) {
        if let Some(start) = header.find(pre).map(|i| i + pre.len()) {
            if let Some(len) = header[start..].find(post) {
                return &header[start..start + len];
            }
        }
    }

    if let Some(pre) = prefix {
        if let Some(i) = header.find(pre) {
            return &header[i + pre.len()..];
        }
    }

    if let Some(post) = postfix {
        if let Some(i) = header.find(post) {
            return &header[..i];
        }
    }

    header
}

// ---------------------------------------------------------------------------
// Header classification
// ---------------------------------------------------------------------------

/// Classify every column except `config.exclude_index` and group the
/// cleaned headers.
///
/// An out-of-range `exclude_index` skips nothing.
pub fn classify(table: &Table, config: &ClassificationConfig) -> Result<ClassificationResult> {
    let separator = config.separator();
    let (prefix, postfix) = config.bounds();
    let mut result = ClassificationResult::new();

    for (idx, (header, values)) in table.iter_columns().enumerate() {
        if idx == config.exclude_index {
            continue;
        }

        let code = classify_values(header, values)?;
        let name = search_substring(header, prefix, postfix);

        match separator {
            Some(sep) => {
                let (first, second) = name.split_once(sep).ok_or_else(|| DataError::MalformedHeader {
                    header: name.to_string(),
                    separator: sep.to_string(),
                })?;
                let (group, leaf) = if config.order {
                    (first, second)
                } else {
                    (second, first)
                };
                result.insert_or_append(
                    group.trim(),
                    HeaderEntry::Leaf {
                        label: leaf.trim().to_string(),
                        code,
                    },
                );
            }
            None => result.insert_or_append(name, HeaderEntry::Code(code)),
        }
    }

    log::debug!(
        "Classified {} columns into {} groups",
        result.entry_count(),
        result.len()
    );
    Ok(result)
}

/// Three-way constancy check over the distinct values of one column.
pub fn classify_values(column: &str, values: &[CellValue]) -> Result<ClassificationCode> {
    let first = values.first().ok_or_else(|| DataError::EmptyColumn {
        column: column.to_string(),
    })?;

    let mut distinct = HashSet::new();
    for value in values {
        distinct.insert(value.distinct_key());
        if distinct.len() > 1 {
            return Ok(ClassificationCode::NotConstant);
        }
    }

    Ok(if first.is_zero() {
        ClassificationCode::ConstantZero
    } else {
        ClassificationCode::ConstantNonzero
    })
}
