use std::{io, path::PathBuf};

use thiserror::Error;

/// Everything that can stop a synchronization run.
///
/// All variants are fatal: the run aborts before the target document is
/// written, so a failed run never leaves a half-updated file behind.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Project root or a required directory/file cannot be used.
    #[error("{} does not seem to be workable: {reason}", path.display())]
    PathUnusable { path: PathBuf, reason: String },

    #[error("source file {} is empty, add some translation keys to it first", path.display())]
    SourceListEmpty { path: PathBuf },

    #[error("could not process {} as XLIFF: {reason}", path.display())]
    MalformedDocument { path: PathBuf, reason: String },

    #[error("{} has no <body> element to hold translation units", path.display())]
    MissingContainer { path: PathBuf },

    #[error("could not write back to {}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document no longer holds a unit the run decided to remove.
    #[error("no trans-unit with id \"{id}\" to remove")]
    EntryNotFound { id: String },
}
