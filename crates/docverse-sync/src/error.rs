use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected directory shape: {0}")]
    UnexpectedShape(String),

    #[error("no remote endpoint configured")]
    NoRemote,

    #[error("failed to read snapshot {path}: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Neither the remote feed nor the fallback snapshot produced a directory.
    #[error("directory data unavailable (remote: {remote}; fallback: {fallback})")]
    DataUnavailable {
        remote: Box<SourceError>,
        fallback: Box<SourceError>,
    },
}
