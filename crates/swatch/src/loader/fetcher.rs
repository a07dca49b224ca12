//! Remote document fetching.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::{Client, Url};
use tracing::debug;

use crate::error::{Result, SwatchError};

/// Capability to read a remote catalog document.
///
/// Implementations make a single attempt per call. Timeouts, retries and
/// fallback across locators are the resolution chain's concern.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch the body at `locator`.
    async fn fetch(&self, locator: &str) -> Result<String>;

    /// Name of this fetcher (for logging/debugging).
    fn name(&self) -> &str;
}

/// HTTP fetcher backed by `reqwest`.
///
/// Relative locators are resolved against an optional base URL, so the
/// same locator list works whatever path the catalog is hosted under.
pub struct HttpFetcher {
    client: Client,
    base: Option<Url>,
}

impl HttpFetcher {
    /// Create a fetcher with a client-level timeout.
    pub fn new(base_url: Option<&str>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SwatchError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let base = base_url
            .map(Url::parse)
            .transpose()
            .map_err(|e| SwatchError::Config(format!("Invalid remote base URL: {}", e)))?
            .map(with_directory_path);

        Ok(Self { client, base })
    }

    /// Resolve a locator to an absolute URL.
    pub fn resolve(&self, locator: &str) -> Result<Url> {
        let resolved = match &self.base {
            Some(base) => base.join(locator),
            None => Url::parse(locator),
        };

        resolved.map_err(|e| SwatchError::Fetch {
            locator: locator.to_string(),
            message: format!("invalid locator: {}", e),
        })
    }
}

/// Treat the last path segment of a base URL as a directory, so relative
/// locators land under it instead of replacing it.
fn with_directory_path(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, locator: &str) -> Result<String> {
        let url = self.resolve(locator)?;
        debug!(%url, "fetching remote catalog");

        let fetch_error = |message: String| SwatchError::Fetch {
            locator: locator.to_string(),
            message,
        };

        let response = self
            .client
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    fetch_error("request timed out".to_string())
                } else if e.is_connect() {
                    fetch_error(format!("connection failed: {}", e))
                } else {
                    fetch_error(format!("request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("HTTP {}", status)));
        }

        response
            .text()
            .await
            .map_err(|e| fetch_error(format!("failed to read body: {}", e)))
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_against_base() {
        let fetcher =
            HttpFetcher::new(Some("https://example.com/app/"), Duration::from_secs(1)).unwrap();

        assert_eq!(
            fetcher.resolve("components.json").unwrap().as_str(),
            "https://example.com/app/components.json"
        );
        assert_eq!(
            fetcher.resolve("/data/components.json").unwrap().as_str(),
            "https://example.com/data/components.json"
        );
        assert_eq!(
            fetcher.resolve("https://cdn.example.com/c.json").unwrap().as_str(),
            "https://cdn.example.com/c.json"
        );
    }

    #[test]
    fn test_base_without_trailing_slash_keeps_its_path() {
        let fetcher =
            HttpFetcher::new(Some("https://example.com/app"), Duration::from_secs(1)).unwrap();

        assert_eq!(
            fetcher.resolve("components.json").unwrap().as_str(),
            "https://example.com/app/components.json"
        );
        assert_eq!(
            fetcher.resolve("data/components.json").unwrap().as_str(),
            "https://example.com/app/data/components.json"
        );
        assert_eq!(
            fetcher.resolve("/data/components.json").unwrap().as_str(),
            "https://example.com/data/components.json"
        );

        let root = HttpFetcher::new(Some("http://localhost:8080"), Duration::from_secs(1)).unwrap();
        assert_eq!(
            root.resolve("components.json").unwrap().as_str(),
            "http://localhost:8080/components.json"
        );
    }

    #[test]
    fn test_resolve_without_base_requires_absolute() {
        let fetcher = HttpFetcher::new(None, Duration::from_secs(1)).unwrap();
        assert!(fetcher.resolve("components.json").is_err());
        assert!(fetcher.resolve("http://localhost/c.json").is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpFetcher::new(Some("not a url"), Duration::from_secs(1)),
            Err(SwatchError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_an_error() {
        let fetcher =
            HttpFetcher::new(Some("http://127.0.0.1:9/"), Duration::from_millis(500)).unwrap();
        let err = fetcher.fetch("components.json").await.unwrap_err();
        assert!(matches!(err, SwatchError::Fetch { .. }));
    }
}
