//! Process configuration
//!
//! Every setting has a built-in default; the `STRATUM_*` environment
//! variables (or a `.env` file) override them.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use stratum_domain::IngestionConfig;
use tracing::info;

pub const SOURCE_PATH_VAR: &str = "STRATUM_SOURCE_PATH";
pub const ARTIFACTS_DIR_VAR: &str = "STRATUM_ARTIFACTS_DIR";
pub const LOG_DIR_VAR: &str = "STRATUM_LOG_DIR";
pub const TEST_FRACTION_VAR: &str = "STRATUM_TEST_FRACTION";
pub const SEED_VAR: &str = "STRATUM_SEED";

const DEFAULT_LOG_DIR: &str = "logs";

/// Settings for one process run
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ingestion: IngestionConfig,
    /// Directory receiving the timestamped log file
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Build the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut ingestion = IngestionConfig::default();

        if let Some(source) = lookup(SOURCE_PATH_VAR) {
            ingestion = ingestion.with_source_path(source);
        }
        if let Some(dir) = lookup(ARTIFACTS_DIR_VAR) {
            ingestion = ingestion.with_artifacts_dir(dir);
        }
        if let Some(fraction) = parse_var::<f64>(&lookup, TEST_FRACTION_VAR)? {
            ingestion = ingestion.with_test_fraction(fraction);
        }
        if let Some(seed) = parse_var::<u64>(&lookup, SEED_VAR)? {
            ingestion = ingestion.with_seed(seed);
        }

        ingestion
            .validate()
            .context("invalid ingestion configuration")?;

        let log_dir = lookup(LOG_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));

        Ok(Self { ingestion, log_dir })
    }

    /// Log the effective settings
    pub fn log_summary(&self) {
        info!(
            source = %self.ingestion.source_path.display(),
            raw = %self.ingestion.raw_data_path.display(),
            train = %self.ingestion.train_data_path.display(),
            test = %self.ingestion.test_data_path.display(),
            test_fraction = self.ingestion.test_fraction,
            seed = self.ingestion.seed,
            "Loaded ingestion configuration"
        );
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("{} has an invalid value: '{}'", key, raw))
        })
        .transpose()
}
