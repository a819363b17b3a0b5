//! Ingestion service - Business logic orchestration
//!
//! This module contains the ingestion run itself. The service coordinates the
//! domain entities, the seeded splitter and the two ports (storage and event
//! log), and is the single place where step errors are wrapped into an
//! [`IngestionFailure`].

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::split::{TrainTestSplit, DEFAULT_SEED, DEFAULT_TEST_FRACTION};
use super::{
    ArtifactPaths, FailureContext, IngestionError, IngestionFailure, Result, RunId, RunReport,
    Stage,
};
use crate::ports::{DirStatus, EventLevel, EventSink, TableStore};

/// Source dataset read when no other path is configured
pub const DEFAULT_SOURCE_PATH: &str = "notebook/data/StudentsPerformance.csv";

/// Directory holding the three artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

pub const RAW_FILE_NAME: &str = "data.csv";
pub const TRAIN_FILE_NAME: &str = "train.csv";
pub const TEST_FILE_NAME: &str = "test.csv";

/// Configuration for one ingestion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionConfig {
    /// Delimited file with a header row to ingest
    pub source_path: PathBuf,
    /// Full copy of the source (default: artifacts/data.csv)
    pub raw_data_path: PathBuf,
    /// Train subset (default: artifacts/train.csv)
    pub train_data_path: PathBuf,
    /// Test subset (default: artifacts/test.csv)
    pub test_data_path: PathBuf,
    /// Share of rows held out for testing (default: 0.2)
    pub test_fraction: f64,
    /// Seed for the partition RNG (default: 42)
    pub seed: u64,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: DEFAULT_SEED,
            ..Self::artifact_paths(Path::new(DEFAULT_ARTIFACTS_DIR))
        }
    }
}

impl IngestionConfig {
    fn artifact_paths(dir: &Path) -> Self {
        Self {
            source_path: PathBuf::new(),
            raw_data_path: dir.join(RAW_FILE_NAME),
            train_data_path: dir.join(TRAIN_FILE_NAME),
            test_data_path: dir.join(TEST_FILE_NAME),
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: DEFAULT_SEED,
        }
    }

    /// Replace the source path
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = path.into();
        self
    }

    /// Place the three artifacts under `dir`, keeping their default file names
    pub fn with_artifacts_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let paths = Self::artifact_paths(dir.as_ref());
        self.raw_data_path = paths.raw_data_path;
        self.train_data_path = paths.train_data_path;
        self.test_data_path = paths.test_data_path;
        self
    }

    pub fn with_test_fraction(mut self, test_fraction: f64) -> Self {
        self.test_fraction = test_fraction;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Distinct parent directories of the three output paths
    ///
    /// Bare file names resolve against the working directory and contribute
    /// nothing here.
    pub fn output_dirs(&self) -> Vec<&Path> {
        let mut dirs: Vec<&Path> = Vec::new();
        for path in [
            &self.raw_data_path,
            &self.train_data_path,
            &self.test_data_path,
        ] {
            if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                if !dirs.contains(&dir) {
                    dirs.push(dir);
                }
            }
        }
        dirs
    }

    /// Build the splitter described by this configuration
    ///
    /// # Errors
    ///
    /// Returns `IngestionError::ConfigError` if the test fraction is outside (0, 1)
    pub fn splitter(&self) -> Result<TrainTestSplit> {
        TrainTestSplit::new(self.test_fraction, self.seed)
    }

    /// Check the configuration without touching the filesystem
    pub fn validate(&self) -> Result<()> {
        if self.source_path.as_os_str().is_empty() {
            return Err(IngestionError::config_error("source path is empty"));
        }
        self.splitter().map(|_| ())
    }
}

/// Service that turns one source dataset into raw, train and test artifacts
///
/// The run is strictly linear:
/// locate source → load → prepare output directory → persist raw copy →
/// partition → persist train → persist test.
///
/// ## Static Dispatch
///
/// The service is generic over its storage and event ports. Production wires
/// the CSV adapter and a tracing-backed sink; tests wire in-memory fakes or
/// mocks.
pub struct Ingestor<S, E> {
    store: S,
    events: E,
    config: IngestionConfig,
}

impl<S, E> Ingestor<S, E>
where
    S: TableStore,
    E: EventSink,
{
    /// Create a new Ingestor with the given ports and configuration
    pub fn new(store: S, events: E, config: IngestionConfig) -> Self {
        Self {
            store,
            events,
            config,
        }
    }

    /// Create a new Ingestor with default configuration
    pub fn with_defaults(store: S, events: E) -> Self {
        Self::new(store, events, IngestionConfig::default())
    }

    /// Get the service configuration
    pub fn config(&self) -> &IngestionConfig {
        &self.config
    }

    /// Run one ingestion and return the `(train, test)` artifact paths
    ///
    /// # Errors
    ///
    /// Any step failure aborts the run and is returned as an
    /// [`IngestionFailure`]. Artifacts written before the failure stay on disk.
    pub fn run(&self) -> std::result::Result<ArtifactPaths, IngestionFailure> {
        self.run_with_report().map(|report| report.paths())
    }

    /// Run one ingestion and return the full run report
    pub fn run_with_report(&self) -> std::result::Result<RunReport, IngestionFailure> {
        let run_id = RunId::generate();
        let mut stage = Stage::LocateSource;

        self.ingest(run_id, &mut stage).map_err(|source| {
            self.events.record(
                EventLevel::Error,
                &format!("Ingestion failed during {}: {}", stage, source),
            );
            IngestionFailure::wrap(
                source,
                FailureContext {
                    run_id,
                    stage,
                    source_path: self.config.source_path.clone(),
                },
            )
        })
    }

    fn ingest(&self, run_id: RunId, stage: &mut Stage) -> Result<RunReport> {
        let started_at = Utc::now();
        let config = &self.config;
        self.events.info("Entered the data ingestion method or component");

        // Nothing on disk is touched until the source is known to exist.
        *stage = Stage::LocateSource;
        config.validate()?;
        let splitter = config.splitter()?;
        if !self.store.exists(&config.source_path) {
            return Err(IngestionError::missing_input(&config.source_path));
        }

        *stage = Stage::Load;
        let dataset = self.store.load(&config.source_path)?;
        self.events.info(&format!(
            "Read the dataset from {} ({} rows, {} columns)",
            config.source_path.display(),
            dataset.len(),
            dataset.columns().len()
        ));

        *stage = Stage::PrepareDirectory;
        let directory_created = self.prepare_output_dirs()?;

        *stage = Stage::PersistRaw;
        self.store.write(&config.raw_data_path, &dataset)?;
        self.events.info(&format!(
            "Raw data saved at: {}",
            config.raw_data_path.display()
        ));

        *stage = Stage::Partition;
        self.events.info("Train-test split initiated");
        let (train, test) = splitter.split(&dataset)?;
        self.events.info(&format!(
            "Split {} rows into {} train and {} test rows (seed {})",
            dataset.len(),
            train.len(),
            test.len(),
            splitter.seed()
        ));

        *stage = Stage::PersistTrain;
        self.store.write(&config.train_data_path, &train)?;
        self.events.info(&format!(
            "Train data saved at: {}",
            config.train_data_path.display()
        ));

        *stage = Stage::PersistTest;
        self.store.write(&config.test_data_path, &test)?;
        self.events.info(&format!(
            "Test data saved at: {}",
            config.test_data_path.display()
        ));

        self.events.info("Ingestion of the data is completed");

        Ok(RunReport {
            run_id,
            started_at,
            finished_at: Utc::now(),
            raw_path: config.raw_data_path.clone(),
            train_path: config.train_data_path.clone(),
            test_path: config.test_data_path.clone(),
            total_rows: dataset.len(),
            train_rows: train.len(),
            test_rows: test.len(),
            columns: dataset.columns().len(),
            directory_created,
        })
    }

    /// Create missing output directories, then confirm they are present
    ///
    /// Returns whether any directory had to be created.
    fn prepare_output_dirs(&self) -> Result<bool> {
        let mut created = false;

        for dir in self.config.output_dirs() {
            match self.store.ensure_dir(dir)? {
                DirStatus::Created => {
                    created = true;
                    self.events
                        .info(&format!("Created directory: {}", dir.display()));
                }
                DirStatus::AlreadyExists => {
                    self.events
                        .info(&format!("Directory already exists: {}", dir.display()));
                }
            }

            if !self.store.dir_exists(dir) {
                return Err(IngestionError::directory_setup(
                    dir,
                    "directory is not present after creation",
                ));
            }
        }

        Ok(created)
    }
}
