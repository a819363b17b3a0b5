//! Port for tabular storage operations
//!
//! This trait abstracts away where datasets are read from and written to
//! (local CSV files, an in-memory fake, a mock in tests). Implementations
//! must convert their own I/O and parser errors into `IngestionError`.

use std::path::Path;

use crate::ingestion::{Dataset, IngestionError};

/// Outcome of preparing an output directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirStatus {
    /// The directory (and possibly missing ancestors) was created
    Created,
    /// The directory was already present
    AlreadyExists,
}

/// Port for dataset storage
///
/// The domain calls these in a fixed order during a run: `exists` on the
/// source, `load`, `ensure_dir` + `dir_exists` on the output directory, then
/// one `write` per artifact.
#[cfg_attr(test, mockall::automock)]
pub trait TableStore: Send + Sync {
    /// Check whether a file is present at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Load a delimited file with a header row into a [`Dataset`]
    ///
    /// # Errors
    ///
    /// Returns `IngestionError::ParseFailure` (or `InvalidData`) when the
    /// file cannot be read or is not a well-formed table
    fn load(&self, path: &Path) -> Result<Dataset, IngestionError>;

    /// Create `path` and any missing ancestors
    ///
    /// An existing directory is not an error.
    ///
    /// # Errors
    ///
    /// Returns `IngestionError::DirectorySetup` if creation fails
    fn ensure_dir(&self, path: &Path) -> Result<DirStatus, IngestionError>;

    /// Check whether a directory is present at `path`
    fn dir_exists(&self, path: &Path) -> bool;

    /// Write `dataset`, header included, to `path`, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns `IngestionError::WriteFailure` if the file cannot be written
    fn write(&self, path: &Path, dataset: &Dataset) -> Result<(), IngestionError>;
}
