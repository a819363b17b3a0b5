//! EventSink backed by `tracing`

use stratum_domain::ports::{EventLevel, EventSink};
use tracing::{debug, error, info, warn};

/// Forwards domain events to whatever `tracing` subscriber the process installed
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl TracingEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for TracingEventSink {
    fn record(&self, level: EventLevel, message: &str) {
        match level {
            EventLevel::Debug => debug!(target: "stratum::ingestion", "{}", message),
            EventLevel::Info => info!(target: "stratum::ingestion", "{}", message),
            EventLevel::Warn => warn!(target: "stratum::ingestion", "{}", message),
            EventLevel::Error => error!(target: "stratum::ingestion", "{}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_without_subscriber() {
        let sink = TracingEventSink::new();

        sink.info("no subscriber installed");
        sink.record(EventLevel::Error, "still fine");
    }
}
