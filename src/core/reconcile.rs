//! Delta between the keys stored in a document and the keys discovered in a
//! project.

use std::collections::BTreeSet;

/// A set of translation keys. Ordered, so everything derived from it
/// (reports, appended units) comes out in a stable order.
pub type KeySet = BTreeSet<String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Only add discovered keys; stored keys are never removed.
    AppendOnly,
    /// Make the document mirror the discovered keys exactly.
    Synchronize,
}

/// Result of reconciling stored keys with discovered keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changes {
    pub to_add: KeySet,
    pub to_remove: KeySet,
    /// Discovered keys that are already stored.
    pub skipped: KeySet,
}

impl Changes {
    /// True when applying these changes would not alter the document.
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Compute which keys to add and remove.
///
/// Keys are compared with exact string equality; case and whitespace are
/// significant.
pub fn reconcile(existing: &KeySet, discovered: &KeySet, mode: SyncMode) -> Changes {
    let to_add = discovered.difference(existing).cloned().collect();
    let to_remove = match mode {
        SyncMode::AppendOnly => KeySet::new(),
        SyncMode::Synchronize => existing.difference(discovered).cloned().collect(),
    };
    let skipped = discovered.intersection(existing).cloned().collect();

    Changes {
        to_add,
        to_remove,
        skipped,
    }
}
