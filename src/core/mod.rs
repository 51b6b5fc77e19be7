//! Reconciliation engine.
//!
//! ```text
//! views/  ──scanner──▶ discovered keys ─┐
//! keys.txt ─extract──▶ discovered keys ─┤
//!                                       ├─ reconcile ─▶ Changes ─▶ apply ─▶ XML
//! messages.xlf ─load─▶ stored keys ─────┘
//! ```
//!
//! Nothing in here prints; callers observe a run through [`Reporter`].

pub mod document;
mod error;
mod events;
pub mod extract;
mod pipeline;
mod reconcile;
pub mod scanner;

pub use document::{DocumentHandle, LanguagePair, Namespace};
pub use error::SyncError;
pub use events::{Reporter, SyncEvent};
pub use pipeline::synchronize;
pub use reconcile::{Changes, KeySet, SyncMode, reconcile};
