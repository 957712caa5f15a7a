//! Incident recorder for assertions in tests.

use std::sync::{Arc, Mutex};

use crate::todo::ports::{SyncIncident, SyncObserver};

/// Observer that keeps every recorded incident in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSyncObserver {
    incidents: Arc<Mutex<Vec<SyncIncident>>>,
}

impl RecordingSyncObserver {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the incidents recorded so far, oldest first.
    #[must_use]
    pub fn incidents(&self) -> Vec<SyncIncident> {
        self.incidents
            .lock()
            .map(|incidents| incidents.clone())
            .unwrap_or_default()
    }
}

impl SyncObserver for RecordingSyncObserver {
    fn record(&self, incident: &SyncIncident) {
        if let Ok(mut incidents) = self.incidents.lock() {
            incidents.push(incident.clone());
        }
    }
}
