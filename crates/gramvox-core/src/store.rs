//! Observable in-process cache of live alerts.
//!
//! One `AlertStore` instance is shared by every consumer in the process.
//! The four mutating operations (`replace`, `add`, `dismiss`, `clear`) are
//! the only writers; reads return snapshots, never live views. Subscribers
//! are notified through the injected [`MonitorEventEmitter`] after each
//! mutation, outside the internal lock.

use std::sync::{Arc, RwLock};

use thiserror::Error;
use tracing::debug;

use crate::domain::{AlertRecord, Severity};
use crate::events::MonitorEvent;
use crate::ports::{MonitorEventEmitter, NoopEmitter};

/// Errors produced by store mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No live alert carries the given id. Non-fatal; callers log and
    /// continue.
    #[error("no live alert with id {id}")]
    NotFound {
        /// The id that was requested.
        id: String,
    },
}

/// Process-wide cache of live alerts.
///
/// Ordering is insertion order, newest first: `replace` trusts the
/// backend's ordering (it sorts newest first), `add` prepends. The derived
/// count always equals the length of the live set.
pub struct AlertStore {
    alerts: RwLock<Vec<AlertRecord>>,
    emitter: Arc<dyn MonitorEventEmitter>,
}

impl AlertStore {
    /// Create a store that notifies the given emitter on every mutation.
    pub fn new(emitter: Arc<dyn MonitorEventEmitter>) -> Self {
        Self {
            alerts: RwLock::new(Vec::new()),
            emitter,
        }
    }

    // ── Mutations ────────────────────────────────────────────────────────

    /// Swap the entire live set atomically.
    ///
    /// This is the poll-merge path: consumers observe either the old set or
    /// the new set, never a partial mix.
    pub fn replace(&self, records: Vec<AlertRecord>) {
        let count = records.len();
        {
            let mut alerts = self.alerts.write().unwrap();
            *alerts = records;
        }
        debug!(count, "live alert set replaced");
        self.emitter.emit(MonitorEvent::alerts_replaced(count));
    }

    /// Prepend a single record.
    ///
    /// No existence check is made: callers echoing a simulation response may
    /// insert a record the next poll also returns, and `replace` reconciles.
    pub fn add(&self, record: AlertRecord) {
        let event = MonitorEvent::alert_added(record.clone());
        {
            let mut alerts = self.alerts.write().unwrap();
            alerts.insert(0, record);
        }
        self.emitter.emit(event);
    }

    /// Remove the record with the given id.
    ///
    /// Returns [`StoreError::NotFound`] if no live record matches; the set
    /// is untouched in that case.
    pub fn dismiss(&self, id: &str) -> Result<(), StoreError> {
        let removed = {
            let mut alerts = self.alerts.write().unwrap();
            alerts
                .iter()
                .position(|alert| alert.id == id)
                .map(|index| alerts.remove(index))
        };

        match removed {
            Some(_) => {
                debug!(alert_id = %id, "alert dismissed");
                self.emitter.emit(MonitorEvent::alert_dismissed(id));
                Ok(())
            }
            None => Err(StoreError::NotFound { id: id.to_string() }),
        }
    }

    /// Empty the live set.
    pub fn clear(&self) {
        {
            let mut alerts = self.alerts.write().unwrap();
            alerts.clear();
        }
        self.emitter.emit(MonitorEvent::AlertsCleared);
    }

    // ── Reads ────────────────────────────────────────────────────────────

    /// Snapshot of the full live set, newest first.
    pub fn alerts(&self) -> Vec<AlertRecord> {
        self.alerts.read().unwrap().clone()
    }

    /// Snapshot of records matching exactly the given severity.
    ///
    /// Reflects the state at call time; later mutations do not affect the
    /// returned vector.
    pub fn by_severity(&self, level: Severity) -> Vec<AlertRecord> {
        self.alerts
            .read()
            .unwrap()
            .iter()
            .filter(|alert| alert.severity == level)
            .cloned()
            .collect()
    }

    /// Snapshot of records for the given village, newest first.
    pub fn by_village(&self, village_id: &str) -> Vec<AlertRecord> {
        self.alerts
            .read()
            .unwrap()
            .iter()
            .filter(|alert| alert.village_id == village_id)
            .cloned()
            .collect()
    }

    /// Number of live records. Always equal to `alerts().len()`.
    pub fn count(&self) -> usize {
        self.alerts.read().unwrap().len()
    }

    /// Whether the live set is empty.
    pub fn is_empty(&self) -> bool {
        self.alerts.read().unwrap().is_empty()
    }
}

impl Default for AlertStore {
    /// Store with no subscribers (events are discarded).
    fn default() -> Self {
        Self::new(Arc::new(NoopEmitter::new()))
    }
}
