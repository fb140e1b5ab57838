//! Structured logging of ledger events.
//!
//! `TracingEventSink` turns every published `LedgerEventRecord` into a
//! `tracing` event with consistent fields, so log shipping picks up ledger
//! activity without a separate export path:
//! - `ledger`: emitting ledger address
//! - `sequence`: position in that ledger's event stream
//! - `kind`: event kind
//! - `payload`: the full event as JSON

use token_ledger::events::LedgerEventRecord;
use token_ledger::ports::outbound::EventSink;

/// Event sink that writes records to the tracing subscriber.
#[derive(Debug, Clone)]
pub struct TracingEventSink {
    service: String,
}

impl TracingEventSink {
    /// Sink tagging every record with `service`.
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// Service tag.
    pub fn service(&self) -> &str {
        &self.service
    }
}

impl Default for TracingEventSink {
    fn default() -> Self {
        Self::new("token-ledger")
    }
}

impl EventSink for TracingEventSink {
    fn publish(&self, record: LedgerEventRecord) {
        let payload = serde_json::to_string(&record.event)
            .unwrap_or_else(|e| format!("<unserializable: {e}>"));

        crate::log_ledger_event!(
            info,
            record.ledger,
            "[ledger] event",
            service = %self.service,
            sequence = record.sequence,
            kind = record.event.kind(),
            payload = %payload
        );
    }
}

/// Log a ledger-scoped message with the standard `ledger` field.
#[macro_export]
macro_rules! log_ledger_event {
    ($level:ident, $ledger:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            ledger = %$ledger,
            $($($field)*,)?
            $msg
        )
    };
}
