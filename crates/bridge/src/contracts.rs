//! Collaborator seams for the aggregator.
//!
//! Discovery and transport are injected as trait objects so tests can swap
//! in doubles without touching the network.

use async_trait::async_trait;

use crate::error::Result;

/// Yields the ordered list of backend server identifiers to query.
///
/// The order returned here fixes the order servers contribute to the
/// aggregated catalog.
#[async_trait]
pub trait ServerDirectory: Send + Sync {
    /// List server identifiers.
    ///
    /// # Errors
    ///
    /// A discovery failure propagates to the aggregate call; there is no
    /// partial catalog without a server list.
    async fn servers(&self) -> Result<Vec<String>>;
}

/// Retrieves one server's `OpenAPI` document.
#[async_trait]
pub trait SpecFetcher: Send + Sync {
    /// Fetch the document for `server`, returned as raw text.
    ///
    /// Text rather than a parsed value: `serde_json::Value` does not keep
    /// object key order, and the document's `paths` order is what fixes the
    /// catalog's descriptor order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::BridgeError::TransportFailure`] if the server
    /// cannot be reached or answers with a non-success status.
    async fn fetch_spec(&self, server: &str) -> Result<String>;
}
