use std::path::PathBuf;

use crate::core::{Changes, SyncEvent, scanner::ScanWarning};

/// What happened to the XLIFF file at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Nothing to add or remove; the file was not touched.
    Unchanged,
    /// The file was written.
    Saved,
    /// Dry run: the document that would have been written.
    Dry(String),
}

#[derive(Debug)]
pub struct SyncSummary {
    pub document: PathBuf,
    /// The document did not exist and was built from scratch.
    pub created: bool,
    /// Settings came from a configuration file rather than defaults.
    pub config_from_file: bool,
    /// Keys stored in the document before the run.
    pub stored_count: usize,
    /// Keys discovered in views or in the source list.
    pub discovered_count: usize,
    /// Number of templates scanned. `None` when keys came from a list.
    pub files_scanned: Option<usize>,
    pub changes: Changes,
    pub events: Vec<SyncEvent>,
    pub warnings: Vec<ScanWarning>,
    pub output: Output,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
}

#[derive(Debug)]
pub enum CommandSummary {
    Sync(SyncSummary),
    Append(SyncSummary),
    Init(InitSummary),
}

/// Result of running an xlfsync command
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        Self { summary }
    }
}
