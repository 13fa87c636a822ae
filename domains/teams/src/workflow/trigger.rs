//! Refresh notification between writers and roster readers

use std::sync::Arc;

use tokio::sync::watch;

/// Generation counter bumped after every committed roster write.
///
/// Readers keep a [`watch::Receiver`] and re-pull when the generation moves.
#[derive(Debug, Clone)]
pub struct RefreshTrigger {
    tx: Arc<watch::Sender<u64>>,
}

impl RefreshTrigger {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    /// Signal that the stored roster changed
    pub fn notify(&self) {
        self.tx.send_modify(|generation| *generation += 1);
        tracing::debug!(generation = self.generation(), "Roster refresh requested");
    }

    /// Current generation
    pub fn generation(&self) -> u64 {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

impl Default for RefreshTrigger {
    fn default() -> Self {
        Self::new()
    }
}
