//! HTTP transport for fetching `OpenAPI` documents from the registry.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::contracts::SpecFetcher;
use crate::error::{BridgeError, Result};

/// Fetches `GET {base_url}/{server}/openapi.json` over a shared client.
#[derive(Debug, Clone)]
pub struct HttpSpecTransport {
    client: Client,
    base_url: Url,
}

impl HttpSpecTransport {
    /// Create a transport rooted at `base_url` with a per-request timeout.
    #[must_use]
    pub fn new(base_url: Url, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client, base_url }
    }

    fn spec_url(&self, server: &str) -> Result<Url> {
        let url = format!(
            "{}/{server}/openapi.json",
            self.base_url.as_str().trim_end_matches('/')
        );
        Url::parse(&url).map_err(|e| BridgeError::TransportFailure {
            server: server.to_string(),
            message: format!("invalid spec URL '{url}': {e}"),
        })
    }
}

#[async_trait]
impl SpecFetcher for HttpSpecTransport {
    async fn fetch_spec(&self, server: &str) -> Result<String> {
        let url = self.spec_url(server)?;
        tracing::debug!(server = %server, url = %url, "fetching OpenAPI document");

        let response =
            self.client
                .get(url)
                .send()
                .await
                .map_err(|e| BridgeError::TransportFailure {
                    server: server.to_string(),
                    message: e.to_string(),
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BridgeError::TransportFailure {
                server: server.to_string(),
                message: format!(
                    "registry returned {} {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            });
        }

        response
            .text()
            .await
            .map_err(|e| BridgeError::TransportFailure {
                server: server.to_string(),
                message: e.to_string(),
            })
    }
}
