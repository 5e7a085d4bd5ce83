use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Issues plain GET requests for the signature prober.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// Returns the response body. `Err` means the request itself failed
    /// (connect, TLS, timeout); any HTTP status counts as a response.
    async fn get(&self, uri: &str) -> anyhow::Result<String>;
}

/// `reqwest` client that skips certificate verification.
///
/// Dashboards and API servers on the open internet almost always present
/// self-signed certificates, so HTTPS candidates are accepted unverified.
/// Requests always go straight to the target; proxy variables are ignored.
pub struct InsecureClient {
    client: Client,
}

impl InsecureClient {
    pub fn new(http_timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(http_timeout)
            .danger_accept_invalid_certs(true)
            .pool_max_idle_per_host(0)
            .no_proxy()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetcher for InsecureClient {
    async fn get(&self, uri: &str) -> anyhow::Result<String> {
        let response = self.client.get(uri).send().await?;

        // The transaction succeeded even if the body is cut short.
        let body = match response.bytes().await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                debug!("reading body of {uri} failed: {e}");
                String::new()
            }
        };

        Ok(body)
    }
}
