//! Domain entities for dataset ingestion
//!
//! This module defines the in-memory tabular model that flows through an
//! ingestion run, and the values a run hands back to its caller.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ingestion::error::{IngestionError, Result};
use crate::ingestion::ids::RunId;

/// One data record of a [`Dataset`]
///
/// Cells hold the field values exactly as parsed, so a written row reads back
/// with the same values. Quoting is not preserved: a field that was quoted
/// without needing it comes back unquoted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Row(Vec<String>);

impl Row {
    pub fn values(&self) -> &[String] {
        &self.0
    }

    /// Get the cell at a column position
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Row {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// An in-memory table with a fixed schema
///
/// A Dataset is:
/// - **Ordered**: rows keep the order they were loaded in
/// - **Rectangular**: every row has exactly one cell per column
/// - **Read-only**: partitioning derives new datasets instead of mutating
///
/// # Example
///
/// ```rust
/// use stratum_domain::ingestion::{Dataset, Row};
///
/// let dataset = Dataset::new(
///     vec!["a".to_string(), "b".to_string()],
///     vec![Row::from_iter(["1", "x"]), Row::from_iter(["2", "y"])],
/// )
/// .unwrap();
///
/// assert_eq!(dataset.len(), 2);
/// assert_eq!(dataset.value(1, "b"), Some("y"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Create a Dataset, checking that every row matches the header width
    ///
    /// # Errors
    ///
    /// - `IngestionError::InvalidData` if the header is empty or a row is ragged
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        if columns.is_empty() {
            return Err(IngestionError::invalid_data("dataset has no columns"));
        }

        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(IngestionError::invalid_data(format!(
                "row {} has {} fields, expected {}",
                index,
                row.len(),
                columns.len()
            )));
        }

        Ok(Self { columns, rows })
    }

    /// Column names, in header order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of data rows (the header is not counted)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column in the header
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Look up a cell by row index and column name
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)
    }

    /// Derive a dataset holding the rows at `indices`, in that order
    ///
    /// Indices out of range are skipped; the schema is shared with `self`.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: indices
                .iter()
                .filter_map(|&i| self.rows.get(i).cloned())
                .collect(),
        }
    }
}

/// Locations of the train and test artifacts produced by a successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    train: PathBuf,
    test: PathBuf,
}

impl ArtifactPaths {
    pub fn new(train: impl Into<PathBuf>, test: impl Into<PathBuf>) -> Self {
        Self {
            train: train.into(),
            test: test.into(),
        }
    }

    pub fn train(&self) -> &Path {
        &self.train
    }

    pub fn test(&self) -> &Path {
        &self.test
    }

    /// Split into the `(train, test)` pair
    pub fn into_pair(self) -> (PathBuf, PathBuf) {
        (self.train, self.test)
    }
}

/// Summary of one successful ingestion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: RunId,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub raw_path: PathBuf,
    pub train_path: PathBuf,
    pub test_path: PathBuf,
    pub total_rows: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub columns: usize,
    /// Whether the run had to create the output directory
    pub directory_created: bool,
}

impl RunReport {
    pub fn paths(&self) -> ArtifactPaths {
        ArtifactPaths::new(self.train_path.clone(), self.test_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_dataset_creation() {
        let dataset = Dataset::new(
            columns(&["a", "b", "c"]),
            vec![Row::from_iter(["1", "2", "3"]), Row::from_iter(["4", "5", "6"])],
        )
        .unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.columns(), &["a", "b", "c"]);
        assert_eq!(dataset.value(0, "b"), Some("2"));
        assert_eq!(dataset.value(1, "c"), Some("6"));
        assert_eq!(dataset.value(1, "missing"), None);
        assert_eq!(dataset.value(5, "a"), None);
    }

    #[test]
    fn test_dataset_rejects_ragged_rows() {
        let result = Dataset::new(
            columns(&["a", "b"]),
            vec![Row::from_iter(["1", "2"]), Row::from_iter(["3"])],
        );

        let err = result.unwrap_err();
        assert!(matches!(err, IngestionError::InvalidData(_)));
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_dataset_rejects_empty_header() {
        let result = Dataset::new(Vec::new(), Vec::new());
        assert!(matches!(result, Err(IngestionError::InvalidData(_))));
    }

    #[test]
    fn test_dataset_allows_zero_rows() {
        let dataset = Dataset::new(columns(&["a"]), Vec::new()).unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_select_keeps_schema_and_order() {
        let dataset = Dataset::new(
            columns(&["a"]),
            (0..5).map(|i| Row::from_iter([i.to_string()])).collect(),
        )
        .unwrap();

        let subset = dataset.select(&[3, 0, 9]);

        assert_eq!(subset.columns(), dataset.columns());
        assert_eq!(subset.len(), 2);
        assert_eq!(subset.value(0, "a"), Some("3"));
        assert_eq!(subset.value(1, "a"), Some("0"));
    }

    #[test]
    fn test_artifact_paths_pair() {
        let paths = ArtifactPaths::new("artifacts/train.csv", "artifacts/test.csv");

        assert_eq!(paths.train(), Path::new("artifacts/train.csv"));
        let (train, test) = paths.into_pair();
        assert_eq!(train, PathBuf::from("artifacts/train.csv"));
        assert_eq!(test, PathBuf::from("artifacts/test.csv"));
    }

    #[test]
    fn test_run_report_serializes() {
        let now = Utc::now();
        let report = RunReport {
            run_id: RunId::generate(),
            started_at: now,
            finished_at: now,
            raw_path: "artifacts/data.csv".into(),
            train_path: "artifacts/train.csv".into(),
            test_path: "artifacts/test.csv".into(),
            total_rows: 10,
            train_rows: 8,
            test_rows: 2,
            columns: 3,
            directory_created: true,
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"train_rows\":8"));
        assert_eq!(report.paths().test(), Path::new("artifacts/test.csv"));
    }
}
