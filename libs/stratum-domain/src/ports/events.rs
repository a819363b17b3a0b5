//! Port for the run's event log
//!
//! The domain does not know how log records are formatted or where they end
//! up. It appends leveled messages to an `EventSink`; the binary wires a
//! tracing-backed sink, tests use [`MemoryEventSink`].

use std::fmt;
use std::sync::{Arc, Mutex};

/// Severity of an event record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for EventLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// Append-only sink for leveled records
pub trait EventSink: Send + Sync {
    fn record(&self, level: EventLevel, message: &str);

    /// Append an informational record
    fn info(&self, message: &str) {
        self.record(EventLevel::Info, message);
    }
}

/// One record captured by [`MemoryEventSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub level: EventLevel,
    pub message: String,
}

/// Event sink that keeps records in memory
///
/// Clones share the same buffer, so a test can hand one clone to the
/// service and inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryEventSink {
    records: Arc<Mutex<Vec<EventRecord>>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every record appended so far
    pub fn records(&self) -> Vec<EventRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Messages only, in append order
    pub fn messages(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.message).collect()
    }
}

impl EventSink for MemoryEventSink {
    fn record(&self, level: EventLevel, message: &str) {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(EventRecord {
                level,
                message: message.to_string(),
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_keeps_order() {
        let sink = MemoryEventSink::new();

        sink.info("first");
        sink.record(EventLevel::Warn, "second");

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].level, EventLevel::Info);
        assert_eq!(records[1].level, EventLevel::Warn);
        assert_eq!(sink.messages(), vec!["first", "second"]);
    }

    #[test]
    fn test_memory_sink_clones_share_buffer() {
        let sink = MemoryEventSink::new();
        let handle = sink.clone();

        handle.info("from clone");

        assert_eq!(sink.messages(), vec!["from clone"]);
    }
}
