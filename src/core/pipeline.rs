//! One reconciliation pass over a loaded document.

use super::events::{Reporter, SyncEvent};
use super::reconcile::{Changes, KeySet, SyncMode, reconcile};
use super::{DocumentHandle, SyncError};

/// Reconcile `doc` with the `discovered` keys and apply the result.
///
/// Events are reported in order: skipped keys, removed keys, added keys,
/// each group sorted. When there is nothing to add or remove the document is
/// left untouched, and the caller should not write it back.
pub fn synchronize(
    doc: &mut DocumentHandle,
    discovered: &KeySet,
    mode: SyncMode,
    reporter: &mut dyn Reporter,
) -> Result<Changes, SyncError> {
    let existing = doc.keys();
    let changes = reconcile(&existing, discovered, mode);

    for key in &changes.skipped {
        reporter.report(SyncEvent::Skipped(key.clone()));
    }
    if changes.is_empty() {
        return Ok(changes);
    }

    doc.apply(&changes.to_add, &changes.to_remove)?;

    for key in &changes.to_remove {
        reporter.report(SyncEvent::Removed(key.clone()));
    }
    for key in &changes.to_add {
        reporter.report(SyncEvent::Added(key.clone()));
    }
    Ok(changes)
}
