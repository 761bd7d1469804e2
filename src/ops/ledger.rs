//! Cluster-wide background operation tracking

use std::sync::Arc;
use tokio::sync::watch;

/// Count of in-flight background operations across the cluster.
///
/// Written by the external operation tracker; the orchestration engine
/// reads it and observes changes. Observers always see the latest count,
/// so an update can never be missed.
#[derive(Debug, Clone)]
pub struct OperationLedger {
    tx: Arc<watch::Sender<usize>>,
}

impl OperationLedger {
    /// Create a ledger with no in-flight operations
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    /// Current in-flight operation count
    pub fn in_flight(&self) -> usize {
        *self.tx.borrow()
    }

    /// Record the current in-flight operation count
    pub fn set_in_flight(&self, count: usize) {
        self.tx.send_replace(count);
    }

    /// Subscribe to count changes
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.tx.subscribe()
    }
}

impl Default for OperationLedger {
    fn default() -> Self {
        Self::new()
    }
}
