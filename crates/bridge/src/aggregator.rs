//! Catalog aggregation across backend servers.

use futures::future::join_all;
use std::sync::Arc;

use trestle_openapi_tools::config::ExtractOptions;
use trestle_openapi_tools::document::OpenApiDocument;
use trestle_openapi_tools::extract::{ToolDescriptor, extract_tools};

use crate::contracts::{ServerDirectory, SpecFetcher};
use crate::error::{BridgeError, Result};

/// Aggregates tool descriptors from every discovered server.
///
/// Fetches run concurrently, but results are concatenated in discovery
/// order, so the catalog is deterministic regardless of fetch timing.
pub struct ToolCatalog {
    directory: Arc<dyn ServerDirectory>,
    fetcher: Arc<dyn SpecFetcher>,
    options: ExtractOptions,
}

impl ToolCatalog {
    #[must_use]
    pub fn new(
        directory: Arc<dyn ServerDirectory>,
        fetcher: Arc<dyn SpecFetcher>,
        options: ExtractOptions,
    ) -> Self {
        Self {
            directory,
            fetcher,
            options,
        }
    }

    /// Collect the flat, ordered tool catalog.
    ///
    /// A failing server contributes nothing and is reported with a warning;
    /// only discovery failure aborts the call.
    ///
    /// # Errors
    ///
    /// Returns an error if the server directory cannot be listed.
    pub async fn all_tools(&self) -> Result<Vec<ToolDescriptor>> {
        let servers = self.directory.servers().await?;

        let fetches = servers.iter().map(|server| self.server_tools(server));
        let results = join_all(fetches).await;

        let mut catalog = Vec::new();
        for (server, result) in servers.iter().zip(results) {
            match result {
                Ok(tools) => {
                    tracing::debug!(server = %server, count = tools.len(), "server contributed tools");
                    catalog.extend(tools);
                }
                Err(e) => {
                    tracing::warn!(server = %server, error = %e, "skipping server");
                }
            }
        }

        Ok(catalog)
    }

    /// Fetch, parse, and extract one server's tools.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a malformed document, or (under
    /// the `fail` policy) a per-operation extraction error.
    pub async fn server_tools(&self, server: &str) -> Result<Vec<ToolDescriptor>> {
        let text = self.fetcher.fetch_spec(server).await?;

        let document =
            OpenApiDocument::parse(&text).map_err(|e| BridgeError::MalformedDocument {
                server: server.to_string(),
                message: e.to_string(),
            })?;

        Ok(extract_tools(server, &document, &self.options)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use trestle_openapi_tools::config::InvalidOperationPolicy;

    struct FixedDirectory(Vec<String>);

    #[async_trait]
    impl ServerDirectory for FixedDirectory {
        async fn servers(&self) -> Result<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    struct FailingDirectory;

    #[async_trait]
    impl ServerDirectory for FailingDirectory {
        async fn servers(&self) -> Result<Vec<String>> {
            Err(BridgeError::Discovery("registry unreachable".into()))
        }
    }

    struct MapFetcher(HashMap<String, String>);

    #[async_trait]
    impl SpecFetcher for MapFetcher {
        async fn fetch_spec(&self, server: &str) -> Result<String> {
            self.0
                .get(server)
                .cloned()
                .ok_or_else(|| BridgeError::TransportFailure {
                    server: server.to_string(),
                    message: "registry returned 404 Not Found".into(),
                })
        }
    }

    fn single_tool_spec(op_id: &str) -> String {
        format!(
            r#"{{
            "paths": {{
                "/{op_id}": {{
                    "post": {{
                        "operationId": "{op_id}",
                        "summary": "{op_id} op",
                        "requestBody": {{"content": {{"application/json": {{"schema": {{"type": "object"}}}}}}}}
                    }}
                }}
            }}
        }}"#
        )
    }

    fn catalog(
        servers: Vec<&str>,
        specs: HashMap<String, String>,
        options: ExtractOptions,
    ) -> ToolCatalog {
        ToolCatalog::new(
            Arc::new(FixedDirectory(
                servers.into_iter().map(String::from).collect(),
            )),
            Arc::new(MapFetcher(specs)),
            options,
        )
    }

    #[tokio::test]
    async fn test_concatenation_follows_discovery_order() {
        let specs = HashMap::from([
            ("alpha".to_string(), single_tool_spec("alpha_tool")),
            ("beta".to_string(), single_tool_spec("beta_tool")),
        ]);

        // Whatever order fetches complete in, "beta" comes first because
        // discovery says so.
        let catalog = catalog(vec!["beta", "alpha"], specs, ExtractOptions::default());
        let tools = catalog.all_tools().await.unwrap();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["beta_tool", "alpha_tool"]);
    }

    #[tokio::test]
    async fn test_failing_server_degrades_without_aborting() {
        let specs = HashMap::from([
            ("alpha".to_string(), single_tool_spec("alpha_tool")),
            ("broken".to_string(), "{not json".to_string()),
            ("gamma".to_string(), single_tool_spec("gamma_tool")),
        ]);

        let catalog = catalog(
            vec!["alpha", "missing", "broken", "gamma"],
            specs,
            ExtractOptions::default(),
        );
        let tools = catalog.all_tools().await.unwrap();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["alpha_tool", "gamma_tool"]);
    }

    #[tokio::test]
    async fn test_discovery_failure_propagates() {
        let catalog = ToolCatalog::new(
            Arc::new(FailingDirectory),
            Arc::new(MapFetcher(HashMap::new())),
            ExtractOptions::default(),
        );

        let err = catalog.all_tools().await.unwrap_err();
        assert!(matches!(err, BridgeError::Discovery(_)));
    }

    #[tokio::test]
    async fn test_fail_policy_degrades_only_the_offending_server() {
        let bad_spec = r#"{
            "paths": {
                "/anonymous": {"post": {"summary": "no id", "requestBody": {"content": {"application/json": {"schema": {"type": "object"}}}}}}
            }
        }"#;
        let specs = HashMap::from([
            ("bad".to_string(), bad_spec.to_string()),
            ("good".to_string(), single_tool_spec("good_tool")),
        ]);

        let options = ExtractOptions {
            invalid_operations: InvalidOperationPolicy::Fail,
            ..Default::default()
        };
        let catalog = catalog(vec!["bad", "good"], specs, options);
        let tools = catalog.all_tools().await.unwrap();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["good_tool"]);
    }

    #[tokio::test]
    async fn test_server_tools_reports_malformed_document() {
        let specs = HashMap::from([("memory".to_string(), "[1, 2, 3]".to_string())]);
        let catalog = catalog(vec!["memory"], specs, ExtractOptions::default());

        let err = catalog.server_tools("memory").await.unwrap_err();
        assert!(matches!(
            err,
            BridgeError::MalformedDocument { server, .. } if server == "memory"
        ));
    }
}
