//! # Stratum CSV Adapter
//!
//! Filesystem adapters for the Stratum domain ports:
//!
//! - [`CsvTableStore`] reads and writes delimited files with a header row
//! - [`TracingEventSink`] forwards ingestion events to `tracing`
//!
//! ```rust,no_run
//! use stratum_csv::{CsvTableStore, TracingEventSink};
//! use stratum_domain::Ingestor;
//!
//! let ingestor = Ingestor::with_defaults(CsvTableStore::new(), TracingEventSink::new());
//! let paths = ingestor.run()?;
//! # Ok::<(), stratum_domain::IngestionFailure>(())
//! ```

pub mod infrastructure;

pub use infrastructure::{CsvTableStore, TracingEventSink};
