//! Ports (trait definitions) for external dependencies
//!
//! This module defines the contracts (ports) that external adapters must implement.
//! Following hexagonal architecture, the domain defines what it needs, and the
//! infrastructure provides implementations.
//!
//! Ingestion is a single blocking run, so the ports are plain synchronous
//! traits. The service is generic over them and dispatches statically.

mod events;
mod storage;

pub use events::{EventLevel, EventRecord, EventSink, MemoryEventSink};
pub use storage::{DirStatus, TableStore};

#[cfg(test)]
pub use storage::MockTableStore;
