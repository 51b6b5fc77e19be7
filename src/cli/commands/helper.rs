use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use anyhow::Result;

use super::Output;
use crate::config::{Config, load_config};
use crate::core::{Changes, DocumentHandle, SyncError};

/// Extensions tried, in order, when a document name is given without one.
pub const DOCUMENT_EXTENSIONS: [&str; 2] = [".xlf", ".xliff"];

/// The web application being worked on, with its configuration.
pub struct Project {
    pub root: PathBuf,
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub config_from_file: bool,
}

impl Project {
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(SyncError::PathUnusable {
                path: root.to_path_buf(),
                reason: "not a directory".to_string(),
            }
            .into());
        }
        let loaded = load_config(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            config: loaded.config,
            config_from_file: loaded.from_file,
        })
    }

    /// Resolve a project directory from a command-line override or the
    /// configured default. The directory must exist.
    pub fn directory(&self, overridden: Option<&Path>, configured: &str) -> Result<PathBuf> {
        let dir = match overridden {
            Some(dir) => self.root.join(dir),
            None => self.root.join(configured),
        };
        if !dir.is_dir() {
            return Err(SyncError::PathUnusable {
                path: dir,
                reason: "directory does not exist".to_string(),
            }
            .into());
        }
        Ok(dir)
    }
}

/// Find an existing XLIFF file named `name` in `locales_dir`, trying the
/// name as given first and then each of [`DOCUMENT_EXTENSIONS`].
pub fn resolve_document(locales_dir: &Path, name: &Path) -> Option<PathBuf> {
    let bare = locales_dir.join(name);
    if bare.is_file() {
        return Some(bare);
    }
    DOCUMENT_EXTENSIONS
        .iter()
        .map(|extension| {
            let mut candidate: OsString = bare.clone().into_os_string();
            candidate.push(extension);
            PathBuf::from(candidate)
        })
        .find(|candidate| candidate.is_file())
}

/// Persist a reconciled document, unless there is nothing to change.
pub fn write_back(doc: &DocumentHandle, changes: &Changes, dry: bool) -> Result<Output> {
    if changes.is_empty() {
        return Ok(Output::Unchanged);
    }
    if dry {
        return Ok(Output::Dry(doc.to_xml()));
    }
    doc.save()?;
    Ok(Output::Saved)
}
