//! Fallback copy of the directory, used when the remote feed is unusable.

use std::path::PathBuf;

use docverse_core::RawRecord;
use tracing::debug;

use crate::SourceError;
use crate::records::parse_records;

/// Snapshot compiled into the binary.
pub const BUNDLED_SNAPSHOT: &str = include_str!("../data/doctors.json");

/// Where the fallback directory comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Snapshot {
    #[default]
    Bundled,
    /// A JSON file with the same shape as the remote feed.
    File(PathBuf),
}

impl Snapshot {
    /// Read and shape-check the snapshot.
    pub async fn read(&self) -> Result<Vec<RawRecord>, SourceError> {
        match self {
            Self::Bundled => {
                debug!("reading bundled snapshot");
                parse_records(BUNDLED_SNAPSHOT)
            }
            Self::File(path) => {
                debug!(path = %path.display(), "reading snapshot file");
                let body = tokio::fs::read_to_string(path).await.map_err(|source| {
                    SourceError::Snapshot {
                        path: path.clone(),
                        source,
                    }
                })?;
                parse_records(&body)
            }
        }
    }
}
