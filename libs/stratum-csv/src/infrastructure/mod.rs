//! Adapters implementing the domain ports

mod csv_store;
mod tracing_sink;

pub use csv_store::CsvTableStore;
pub use tracing_sink::TracingEventSink;
