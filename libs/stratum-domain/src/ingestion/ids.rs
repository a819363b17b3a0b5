use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier stamped on one invocation of the ingestor
///
/// Generated when a run starts and carried by both its [`RunReport`] and any
/// [`IngestionFailure`] it ends with, so log lines from the same run can be
/// matched up. Version 7 UUIDs sort by start time.
///
/// [`RunReport`]: crate::ingestion::RunReport
/// [`IngestionFailure`]: crate::ingestion::IngestionFailure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(Uuid);

impl RunId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
