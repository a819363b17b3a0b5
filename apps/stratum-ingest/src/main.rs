//! Stratum Ingest - One-shot ingestion job
//!
//! Reads the configured source dataset, writes a raw copy and an 80/20
//! train/test split as CSV artifacts, then exits. Progress goes to a
//! timestamped file under the log directory; failures end the process with a
//! non-zero status and the wrapped error.

mod config;
mod telemetry;

use anyhow::Result;
use stratum_csv::{CsvTableStore, TracingEventSink};
use stratum_domain::ingestion::{IngestionPort, Ingestor, RunReport};
use tracing::{error, info};

use crate::config::AppConfig;

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    // Held until exit so buffered log lines reach the file
    let (_guard, log_file) = telemetry::init(&config.log_dir)?;

    info!(log_file = %log_file.display(), "Starting Stratum ingestion");
    config.log_summary();

    let ingestor = Ingestor::new(
        CsvTableStore::new(),
        TracingEventSink::new(),
        config.ingestion,
    );

    execute(&ingestor)?;

    Ok(())
}

/// Perform exactly one run and log its outcome
fn execute(job: &impl IngestionPort) -> Result<RunReport> {
    match job.run_with_report() {
        Ok(report) => {
            info!(
                run_id = %report.run_id,
                report = %serde_json::to_string(&report)?,
                "Ingestion run finished"
            );
            Ok(report)
        }
        Err(failure) => {
            error!(
                run_id = %failure.run_id(),
                kind = %failure.kind(),
                stage = %failure.stage(),
                error = %failure,
                "Ingestion run failed"
            );
            Err(failure.into())
        }
    }
}
