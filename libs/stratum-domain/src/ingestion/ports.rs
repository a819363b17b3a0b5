//! Port trait for the Ingestion Service
//!
//! This module defines the trait that abstracts an ingestion run, so the
//! application layer can drive any runner (the concrete [`Ingestor`] or a
//! stub) through the same entry point.

use super::{ArtifactPaths, IngestionFailure, Ingestor, RunReport};
use crate::ports::{EventSink, TableStore};

/// Port trait for ingestion runs
pub trait IngestionPort {
    /// Run one ingestion and return the `(train, test)` artifact paths
    ///
    /// # Errors
    ///
    /// Returns the wrapped [`IngestionFailure`] of the first failing step
    fn run(&self) -> Result<ArtifactPaths, IngestionFailure>;

    /// Run one ingestion and return the full run report
    fn run_with_report(&self) -> Result<RunReport, IngestionFailure>;
}

impl<S, E> IngestionPort for Ingestor<S, E>
where
    S: TableStore,
    E: EventSink,
{
    fn run(&self) -> Result<ArtifactPaths, IngestionFailure> {
        Ingestor::run(self)
    }

    fn run_with_report(&self) -> Result<RunReport, IngestionFailure> {
        Ingestor::run_with_report(self)
    }
}
