//! Domain errors for ingestion operations
//!
//! Two layers live here. [`IngestionError`] is the taxonomy individual steps
//! and adapters speak. [`IngestionFailure`] is the single uniform error an
//! ingestion run hands back: the original cause wrapped with the run id, the
//! stage that failed and the source being ingested.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ingestion::ids::RunId;

/// Errors that can occur while ingesting a dataset
///
/// These are independent of the storage backend: adapters convert their own
/// I/O and parser errors into one of these variants.
#[derive(Error, Debug)]
pub enum IngestionError {
    /// The source dataset is not where it was expected
    #[error("Dataset not found at: {}", .path.display())]
    MissingInput { path: PathBuf },

    /// The source exists but is not a well-formed delimited table
    #[error("Failed to parse '{}': {reason}", .path.display())]
    ParseFailure { path: PathBuf, reason: String },

    /// The output directory could not be created or verified
    #[error("Failed to set up directory '{}': {reason}", .path.display())]
    DirectorySetup { path: PathBuf, reason: String },

    /// An artifact could not be written
    #[error("Failed to write '{}': {reason}", .path.display())]
    WriteFailure { path: PathBuf, reason: String },

    /// The dataset cannot be partitioned with the configured ratio
    #[error("Partition failed: {0}")]
    Partition(String),

    /// The tabular data violates a structural invariant
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl IngestionError {
    /// Create a missing input error for the expected source path
    pub fn missing_input(path: impl Into<PathBuf>) -> Self {
        Self::MissingInput { path: path.into() }
    }

    /// Create a parse failure error
    pub fn parse_failure(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::ParseFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a directory setup error
    pub fn directory_setup(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::DirectorySetup {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a write failure error
    pub fn write_failure(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        Self::WriteFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a partition error with a message
    pub fn partition(msg: impl Into<String>) -> Self {
        Self::Partition(msg.into())
    }

    /// Create an invalid data error with a message
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create a config error with a message
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// The failure category this error is reported under
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::MissingInput { .. } => FailureKind::MissingInput,
            Self::ParseFailure { .. } | Self::InvalidData(_) => FailureKind::Parse,
            Self::DirectorySetup { .. } => FailureKind::DirectorySetup,
            Self::WriteFailure { .. } => FailureKind::Write,
            Self::Partition(_) => FailureKind::Partition,
            Self::ConfigError(_) => FailureKind::Config,
        }
    }
}

/// Result type alias for ingestion operations
pub type Result<T> = std::result::Result<T, IngestionError>;

/// Category of an ingestion failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    MissingInput,
    Parse,
    DirectorySetup,
    Write,
    Partition,
    Config,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MissingInput => "missing input",
            Self::Parse => "parse",
            Self::DirectorySetup => "directory setup",
            Self::Write => "write",
            Self::Partition => "partition",
            Self::Config => "config",
        };
        f.write_str(name)
    }
}

/// Step of an ingestion run, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    LocateSource,
    Load,
    PrepareDirectory,
    PersistRaw,
    Partition,
    PersistTrain,
    PersistTest,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LocateSource => "locate-source",
            Self::Load => "load",
            Self::PrepareDirectory => "prepare-directory",
            Self::PersistRaw => "persist-raw",
            Self::Partition => "partition",
            Self::PersistTrain => "persist-train",
            Self::PersistTest => "persist-test",
        };
        f.write_str(name)
    }
}

/// Where in an invocation a failure happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureContext {
    pub run_id: RunId,
    pub stage: Stage,
    pub source_path: PathBuf,
}

/// The uniform failure returned by an ingestion run
///
/// Callers that only need a diagnostic print it; callers that need to branch
/// use [`IngestionFailure::kind`]. The wrapped cause stays reachable through
/// [`std::error::Error::source`].
#[derive(Error, Debug)]
#[error(
    "ingestion run {} failed during {} (source: {}): {source}",
    .context.run_id,
    .context.stage,
    .context.source_path.display()
)]
pub struct IngestionFailure {
    kind: FailureKind,
    context: FailureContext,
    #[source]
    source: IngestionError,
}

impl IngestionFailure {
    /// Wrap a step error with the context of the run it aborted
    pub fn wrap(source: IngestionError, context: FailureContext) -> Self {
        Self {
            kind: source.kind(),
            context,
            source,
        }
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn stage(&self) -> Stage {
        self.context.stage
    }

    pub fn run_id(&self) -> RunId {
        self.context.run_id
    }

    pub fn source_path(&self) -> &Path {
        &self.context.source_path
    }

    pub fn into_cause(self) -> IngestionError {
        self.source
    }
}
