//! Process-wide log sink
//!
//! Installed once, before the ingestion run: every record goes to a fresh
//! `<%m_%d_%Y_%H_%M_%S>.log` file in the log directory. `RUST_LOG` overrides
//! the default `info` filter.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

const LOG_FILE_TIMESTAMP: &str = "%m_%d_%Y_%H_%M_%S";

/// Name of the log file opened at `now`, without the `.log` extension
pub fn log_file_stem(now: DateTime<Local>) -> String {
    now.format(LOG_FILE_TIMESTAMP).to_string()
}

/// Install the global subscriber writing to a timestamped file under `log_dir`
///
/// Returns the writer guard, which must be held until the process exits so
/// buffered records are flushed, and the path of the log file.
pub fn init(log_dir: &Path) -> Result<(WorkerGuard, PathBuf)> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let stem = log_file_stem(Local::now());
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(&stem)
        .filename_suffix("log")
        .build(log_dir)
        .with_context(|| format!("failed to open log file in {}", log_dir.display()))?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .try_init()
        .map_err(|err| anyhow!("failed to install log subscriber: {}", err))?;

    Ok((guard, log_dir.join(format!("{}.log", stem))))
}
