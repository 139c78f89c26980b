use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::classify::ClassificationConfig;
use crate::error::Result;

/// Default number of remembered files.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

// ---------------------------------------------------------------------------
// Header structure settings
// ---------------------------------------------------------------------------

/// Role of one half of a composite header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaderOption {
    #[serde(rename = "Sub-Header")]
    SubHeader,
    #[serde(rename = "Header")]
    Header,
    #[default]
    #[serde(rename = "N/A")]
    NotApplicable,
}

/// How the headers of a measurement file are composed, as the user
/// configured it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderStructureSettings {
    pub first_header_prefix: Option<String>,
    pub first_header_option: HeaderOption,
    pub first_header_postfix: Option<String>,
    pub second_header_prefix: Option<String>,
    pub second_header_option: HeaderOption,
    pub second_header_postfix: Option<String>,
}

impl HeaderStructureSettings {
    /// Translate the settings into a classifier configuration.
    ///
    /// With both halves in use, the first postfix followed by the second
    /// prefix forms the separator, and the first half is the group unless
    /// it is marked as sub-header. The header then spans from the first
    /// prefix to the second postfix, split or not. With one half in use the
    /// headers are not split and only that half's pair bounds them. Column
    /// 0 (time) is always excluded.
    pub fn to_classification_config(&self) -> ClassificationConfig {
        use HeaderOption::NotApplicable;

        match (self.first_header_option, self.second_header_option) {
            (first, second) if first != NotApplicable && second != NotApplicable => {
                let separator = format!(
                    "{}{}",
                    self.first_header_postfix.as_deref().unwrap_or_default(),
                    self.second_header_prefix.as_deref().unwrap_or_default()
                );
                if separator.is_empty() {
                    return ClassificationConfig {
                        exclude_index: 0,
                        first_prefix: self.first_header_prefix.clone(),
                        first_postfix: self.second_header_postfix.clone(),
                        ..Default::default()
                    };
                }
                ClassificationConfig {
                    exclude_index: 0,
                    first_prefix: self.first_header_prefix.clone(),
                    second_postfix: self.second_header_postfix.clone(),
                    separator: Some(separator),
                    order: first != HeaderOption::SubHeader,
                    ..Default::default()
                }
            }
            (first, _) if first != NotApplicable => ClassificationConfig {
                exclude_index: 0,
                first_prefix: self.first_header_prefix.clone(),
                first_postfix: self.first_header_postfix.clone(),
                ..Default::default()
            },
            _ => ClassificationConfig {
                exclude_index: 0,
                first_prefix: self.second_header_prefix.clone(),
                first_postfix: self.second_header_postfix.clone(),
                ..Default::default()
            },
        }
    }
}

// ---------------------------------------------------------------------------
// User settings file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    #[serde(rename = "Header structure")]
    pub header_structure: HeaderStructureSettings,
}

/// Persisted user settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    #[serde(rename = "General")]
    pub general: GeneralSettings,
}

impl UserSettings {
    /// Read settings from `path`, falling back to defaults when the file
    /// does not exist yet.
    pub fn load(path: &Path) -> Result<Self> {
        match read_json(path)? {
            Some(settings) => Ok(settings),
            None => {
                log::info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(path, self)
    }
}

// ---------------------------------------------------------------------------
// Recently opened files
// ---------------------------------------------------------------------------

/// Most-recently opened files, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentFiles {
    /// Maximum number of entries; `0` keeps everything.
    pub limit: usize,
    paths: Vec<PathBuf>,
}

impl Default for RecentFiles {
    fn default() -> Self {
        Self::with_limit(DEFAULT_RECENT_LIMIT)
    }
}

impl RecentFiles {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            paths: Vec::new(),
        }
    }

    /// Record `path` as the most recent file.
    ///
    /// A known path moves to the end. A new path evicts the oldest entry
    /// when the list is full.
    pub fn push(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if let Some(pos) = self.paths.iter().position(|p| *p == path) {
            self.paths.remove(pos);
        } else if self.limit != 0 && self.paths.len() >= self.limit {
            let evicted = self.paths.remove(0);
            log::debug!("Dropping {} from recent files", evicted.display());
        }
        self.paths.push(path);
    }

    /// Entries, oldest first.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn latest(&self) -> Option<&Path> {
        self.paths.last().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Read the list from `path`; a missing file gives an empty list with
    /// the given limit. The stored list is cut down to `limit`.
    pub fn load(path: &Path, limit: usize) -> Result<Self> {
        let mut recent: Self = read_json(path)?.unwrap_or_else(|| Self::with_limit(limit));
        recent.limit = limit;
        if limit != 0 && recent.paths.len() > limit {
            let excess = recent.paths.len() - limit;
            recent.paths.drain(..excess);
        }
        Ok(recent)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(path, self)
    }
}

// ---------------------------------------------------------------------------
// JSON helpers
// ---------------------------------------------------------------------------

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Option<T>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    if text.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(&text)?))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text)?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}
