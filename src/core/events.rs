/// Something that happened to a key during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// A new unit was created for the key.
    Added(String),
    /// The unit stored under the key was removed.
    Removed(String),
    /// The key was discovered but is already stored.
    Skipped(String),
}

impl SyncEvent {
    pub fn key(&self) -> &str {
        match self {
            SyncEvent::Added(key) | SyncEvent::Removed(key) | SyncEvent::Skipped(key) => key,
        }
    }
}

/// Receives the events of a run. The core never prints; presentation is up
/// to the implementor.
pub trait Reporter {
    fn report(&mut self, event: SyncEvent);
}

/// Collects events in order.
impl Reporter for Vec<SyncEvent> {
    fn report(&mut self, event: SyncEvent) {
        self.push(event);
    }
}
