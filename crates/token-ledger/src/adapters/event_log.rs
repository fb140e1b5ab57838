//! Event Log Adapter
//!
//! Keeps every published record in memory, in publication order.

use crate::domain::value_objects::Address;
use crate::events::{LedgerEvent, LedgerEventRecord};
use crate::ports::outbound::EventSink;
use parking_lot::RwLock;
use tracing::debug;

/// Append-only in-memory event log. May be shared by several ledgers.
#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    records: RwLock<Vec<LedgerEventRecord>>,
}

impl InMemoryEventLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every record so far.
    pub fn records(&self) -> Vec<LedgerEventRecord> {
        self.records.read().clone()
    }

    /// Events emitted by `ledger`, in order.
    pub fn events_for(&self, ledger: Address) -> Vec<LedgerEvent> {
        self.records
            .read()
            .iter()
            .filter(|record| record.ledger == ledger)
            .map(|record| record.event.clone())
            .collect()
    }

    /// Most recent record.
    pub fn last(&self) -> Option<LedgerEventRecord> {
        self.records.read().last().cloned()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// True when nothing was published.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Remove and return every record.
    pub fn drain(&self) -> Vec<LedgerEventRecord> {
        std::mem::take(&mut *self.records.write())
    }
}

impl EventSink for InMemoryEventLog {
    fn publish(&self, record: LedgerEventRecord) {
        debug!(
            "[ledger] event #{} from {}: {}",
            record.sequence,
            record.ledger,
            record.event.kind()
        );
        self.records.write().push(record);
    }
}
