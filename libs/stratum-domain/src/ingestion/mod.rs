//! Ingestion domain module
//!
//! This module contains the core business logic and entities for dataset
//! ingestion: the tabular model, the error taxonomy, the seeded splitter and
//! the service that runs one ingestion end to end.

mod entity;
mod error;
mod ids;
mod ports;
mod service;
mod split;

pub use entity::{ArtifactPaths, Dataset, Row, RunReport};
pub use error::{FailureContext, FailureKind, IngestionError, IngestionFailure, Result, Stage};
pub use ids::RunId;
pub use ports::IngestionPort;
pub use service::{
    IngestionConfig, Ingestor, DEFAULT_ARTIFACTS_DIR, DEFAULT_SOURCE_PATH, RAW_FILE_NAME,
    TEST_FILE_NAME, TRAIN_FILE_NAME,
};
pub use split::{TrainTestSplit, DEFAULT_SEED, DEFAULT_TEST_FRACTION};
