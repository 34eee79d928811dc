//! Directory loading: remote feed first, fallback snapshot on any failure.

use chrono::{DateTime, Utc};
use docverse_core::{Doctor, RawRecord, normalize};
use tracing::{error, info, warn};

use crate::records::records_from_value;
use crate::{Fetch, Snapshot, SourceError};

/// Where a loaded directory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Remote,
    Fallback,
}

impl Origin {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Fallback => "fallback",
        }
    }
}

/// A normalised directory, in feed order.
#[derive(Debug, Clone)]
pub struct Directory {
    pub doctors: Vec<Doctor>,
    pub origin: Origin,
    pub loaded_at: DateTime<Utc>,
}

/// Outcome of resolving a details-view id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(Doctor),
    NotFound(u64),
}

/// Settings for building a [`DataSource`].
#[derive(Debug, Clone, Default)]
pub struct SourceConfig {
    /// Remote feed URL. `None` loads the snapshot only.
    pub endpoint: Option<String>,
    pub snapshot: Snapshot,
}

pub struct DataSource {
    remote: Option<Box<dyn Fetch>>,
    snapshot: Snapshot,
}

impl DataSource {
    pub fn new(remote: impl Fetch + 'static, snapshot: Snapshot) -> Self {
        Self {
            remote: Some(Box::new(remote)),
            snapshot,
        }
    }

    /// A source that never touches the network.
    pub fn offline(snapshot: Snapshot) -> Self {
        Self {
            remote: None,
            snapshot,
        }
    }

    #[cfg(feature = "http")]
    pub fn from_config(config: &SourceConfig) -> Self {
        match &config.endpoint {
            Some(url) => Self::new(crate::HttpFetcher::new(url.as_str()), config.snapshot.clone()),
            None => Self::offline(config.snapshot.clone()),
        }
    }

    /// Load and normalise the directory.
    ///
    /// Any remote failure (transport, status, body shape) falls back to the
    /// snapshot. Only when the snapshot is also unusable does this return
    /// [`SourceError::DataUnavailable`]. No retries are attempted.
    pub async fn load(&self) -> Result<Directory, SourceError> {
        let remote_err = match &self.remote {
            Some(remote) => match remote.fetch().await.and_then(records_from_value) {
                Ok(records) => return Ok(directory(&records, Origin::Remote)),
                Err(e) => {
                    warn!(url = remote.describe(), error = %e, "remote directory unusable, using fallback");
                    e
                }
            },
            None => SourceError::NoRemote,
        };

        match self.snapshot.read().await {
            Ok(records) => Ok(directory(&records, Origin::Fallback)),
            Err(fallback) => {
                error!(error = %fallback, "fallback snapshot unusable");
                Err(SourceError::DataUnavailable {
                    remote: Box::new(remote_err),
                    fallback: Box::new(fallback),
                })
            }
        }
    }

    /// Resolve a details-view id.
    ///
    /// An in-memory doctor with a matching id is used as is; otherwise the
    /// directory is loaded afresh and searched.
    pub async fn resolve(&self, id: u64, in_memory: Option<&Doctor>) -> Result<Lookup, SourceError> {
        if let Some(doctor) = in_memory.filter(|d| d.id == id) {
            return Ok(Lookup::Found(doctor.clone()));
        }
        let directory = self.load().await?;
        Ok(directory
            .doctors
            .into_iter()
            .find(|d| d.id == id)
            .map_or(Lookup::NotFound(id), Lookup::Found))
    }
}

fn directory(records: &[RawRecord], origin: Origin) -> Directory {
    let doctors: Vec<Doctor> = records.iter().map(normalize).collect();
    info!(count = doctors.len(), origin = origin.as_str(), "loaded directory");
    Directory {
        doctors,
        origin,
        loaded_at: Utc::now(),
    }
}
