//! Data source: remote directory feed with a bundled snapshot fallback.

mod error;
mod fetch;
pub mod records;
pub mod snapshot;
pub mod source;

#[cfg(feature = "http")]
pub mod http;

pub use error::SourceError;
pub use fetch::Fetch;
pub use snapshot::Snapshot;
pub use source::{DataSource, Directory, Lookup, Origin, SourceConfig};

#[cfg(feature = "http")]
pub use http::{DEFAULT_ENDPOINT, HttpFetcher};
