//! HTTP client for the remote directory feed.

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::{Fetch, SourceError};

/// Public mock feed the directory was built against.
pub const DEFAULT_ENDPOINT: &str = "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";

/// GET-only client for a JSON directory endpoint.
pub struct HttpFetcher {
    client: reqwest::Client,
    url: String,
}

impl HttpFetcher {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into().trim().to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self) -> Result<Value, SourceError> {
        info!(url = %self.url, "fetching directory");
        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SourceError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        let value: Value = serde_json::from_str(&body)?;
        Ok(value)
    }

    fn describe(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetcher_trims_whitespace() {
        let fetcher = HttpFetcher::new("  https://example.org/doctors.json\n");
        assert_eq!(fetcher.url(), "https://example.org/doctors.json");
        assert_eq!(fetcher.describe(), fetcher.url());
    }
}
