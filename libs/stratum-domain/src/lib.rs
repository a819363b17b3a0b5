//! # Stratum Domain Layer
//!
//! This crate contains the pure business logic and domain models for the
//! Stratum dataset ingestion stage. It follows hexagonal architecture
//! principles:
//!
//! - **Entities**: Core domain models (Dataset, ArtifactPaths, RunReport)
//! - **Ports**: Trait definitions for external dependencies (TableStore, EventSink)
//! - **Services**: Business logic orchestration (Ingestor, TrainTestSplit)
//!
//! ## Architecture
//!
//! This layer has NO dependencies on infrastructure concerns (CSV parsing,
//! filesystem access, log formatting). All external dependencies are
//! expressed as traits (ports) that are implemented by adapter layers.
//!
//! ## Example
//!
//! ```rust
//! use stratum_domain::ingestion::Ingestor;
//! use stratum_domain::ports::{EventSink, TableStore};
//!
//! // The service is generic over any TableStore and EventSink implementation
//! fn example<S: TableStore, E: EventSink>(ingestor: Ingestor<S, E>) {
//!     let paths = ingestor.run().unwrap();
//!     println!("Train split: {}", paths.train().display());
//! }
//! ```

pub mod ingestion;
pub mod ports;

// Re-export commonly used types
pub use ingestion::{
    ArtifactPaths, Dataset, IngestionConfig, IngestionFailure, Ingestor, RunReport,
};
pub use ports::{EventSink, TableStore};
