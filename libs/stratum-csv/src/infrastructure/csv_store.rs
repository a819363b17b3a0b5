//! CSV Table Store Implementation
//!
//! This module implements the `TableStore` trait on the local filesystem,
//! using the `csv` crate for parsing and writing. It converts `csv` and I/O
//! errors to domain errors.

use std::fs;
use std::path::Path;

use stratum_domain::{
    ingestion::{Dataset, IngestionError, Row},
    ports::{DirStatus, TableStore},
};
use tracing::{debug, error, info, instrument};

/// Filesystem + CSV implementation of the TableStore port
///
/// ## Format
///
/// - The first record is the header and names the columns
/// - Every record must have as many fields as the header (no flexible rows)
/// - Written files always start with the header, even with zero data rows
/// - Fields are written back verbatim; quoting is applied only where the
///   delimiter, quotes or newlines require it
///
/// ## Error Handling
///
/// Read errors become `IngestionError::ParseFailure`, directory errors
/// `IngestionError::DirectorySetup` and write errors
/// `IngestionError::WriteFailure`, each carrying the offending path.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvTableStore;

const DELIMITER: u8 = b',';

impl CsvTableStore {
    pub fn new() -> Self {
        Self
    }
}

impl TableStore for CsvTableStore {
    fn exists(&self, path: &Path) -> bool {
        let exists = path.is_file();
        debug!(path = %path.display(), exists, "Checked source file");
        exists
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    fn load(&self, path: &Path) -> Result<Dataset, IngestionError> {
        let parse_failure = |err: &dyn std::fmt::Display| {
            error!(error = %err, "Failed to read CSV");
            IngestionError::parse_failure(path, err)
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(true)
            .from_path(path)
            .map_err(|err| parse_failure(&err))?;

        let columns: Vec<String> = reader
            .headers()
            .map_err(|err| parse_failure(&err))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|err| parse_failure(&err))?;
            rows.push(record.iter().collect::<Row>());
        }

        let dataset = Dataset::new(columns, rows).map_err(|err| parse_failure(&err))?;
        info!(
            rows = dataset.len(),
            columns = dataset.columns().len(),
            "Loaded CSV dataset"
        );
        Ok(dataset)
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    fn ensure_dir(&self, path: &Path) -> Result<DirStatus, IngestionError> {
        if path.is_dir() {
            debug!("Directory already exists");
            return Ok(DirStatus::AlreadyExists);
        }

        match fs::create_dir_all(path) {
            Ok(()) => {
                info!("Created directory");
                Ok(DirStatus::Created)
            }
            Err(err) => {
                error!(error = %err, "Failed to create directory");
                Err(IngestionError::directory_setup(path, err))
            }
        }
    }

    fn dir_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    #[instrument(skip(self, dataset), fields(path = %path.display(), rows = dataset.len()))]
    fn write(&self, path: &Path, dataset: &Dataset) -> Result<(), IngestionError> {
        let write_failure = |err: &dyn std::fmt::Display| {
            error!(error = %err, "Failed to write CSV");
            IngestionError::write_failure(path, err)
        };

        let mut writer = csv::WriterBuilder::new()
            .delimiter(DELIMITER)
            .from_path(path)
            .map_err(|err| write_failure(&err))?;

        writer
            .write_record(dataset.columns())
            .map_err(|err| write_failure(&err))?;
        for row in dataset.rows() {
            writer
                .write_record(row.values())
                .map_err(|err| write_failure(&err))?;
        }
        writer.flush().map_err(|err| write_failure(&err))?;

        info!("Wrote CSV dataset");
        Ok(())
    }
}
