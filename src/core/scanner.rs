//! Template discovery.
//!
//! Walks the views directory and extracts the translation keys of every
//! template matching the configured patterns.

use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
};

use glob::Pattern;
use walkdir::WalkDir;

use super::extract::extract_keys;
use super::{KeySet, SyncError};

/// A template that was scanned, but not as plain UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanWarning {
    pub path: PathBuf,
    pub error: String,
}

/// Result of scanning templates.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub keys: KeySet,
    pub files_scanned: usize,
    pub warnings: Vec<ScanWarning>,
}

/// Scan every file under `views_dir` whose path relative to it matches one
/// of `patterns`. Files are visited in sorted order.
///
/// Templates that are not valid UTF-8 are read as Latin-1 and reported as
/// warnings. Any entry that cannot be walked or read fails the whole scan, so the key set is never partial.
/// Symbolic links are followed.
pub fn scan_templates(views_dir: &Path, patterns: &[Pattern]) -> Result<ScanResult, SyncError> {
    let mut result = ScanResult::default();

    let walker = WalkDir::new(views_dir).follow_links(true).sort_by_file_name();
    for entry in walker {
        let entry = entry.map_err(|e| SyncError::PathUnusable {
            path: e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| views_dir.to_path_buf()),
            reason: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(views_dir).unwrap_or(path);
        if !patterns.iter().any(|p| p.matches_path(relative)) {
            continue;
        }

        let bytes = fs::read(path).map_err(|e| SyncError::PathUnusable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let content = match std::str::from_utf8(&bytes) {
            Ok(content) => Cow::Borrowed(content),
            Err(e) => {
                result.warnings.push(ScanWarning {
                    path: path.to_path_buf(),
                    error: format!("{}, read as Latin-1", e),
                });
                Cow::Owned(decode_latin1(&bytes))
            }
        };
        result.keys.extend(extract_keys(&content));
        result.files_scanned += 1;
    }

    Ok(result)
}

// Every byte maps to the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
