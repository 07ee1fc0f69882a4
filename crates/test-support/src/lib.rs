//! Shared test helpers for the trestle workspace.
//!
//! Provides the "memory" server fixture document and an in-process HTTP
//! server that serves `OpenAPI` documents at `/{server}/openapi.json`, the
//! registry layout the bridge transport fetches from.

use anyhow::Context as _;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// The "memory" knowledge-graph server fixture document, as raw JSON text.
#[must_use]
pub fn memory_fixture_text() -> &'static str {
    include_str!("../fixtures/memory_openapi.json")
}

/// The "memory" fixture document, parsed.
///
/// # Panics
///
/// Panics if the bundled fixture is not valid JSON (a build defect, not a
/// runtime condition).
#[must_use]
pub fn memory_fixture() -> Value {
    serde_json::from_str(memory_fixture_text()).expect("memory fixture is valid JSON")
}

/// In-process registry serving `OpenAPI` documents per server name.
///
/// Unknown servers get a 404; a server mapped to a non-JSON body is served
/// verbatim, which lets tests exercise malformed-document handling.
pub struct SpecServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<std::io::Result<()>>>,
}

#[derive(Clone)]
struct SpecMap(Arc<HashMap<String, String>>);

impl SpecServer {
    /// Bind an ephemeral localhost port and serve `documents` (server name ->
    /// response body for `GET /{server}/openapi.json`).
    ///
    /// # Errors
    ///
    /// Returns an error if binding the listener fails.
    pub async fn start(documents: HashMap<String, String>) -> anyhow::Result<Self> {
        let app = Router::new()
            .route("/{server}/openapi.json", get(serve_spec))
            .with_state(SpecMap(Arc::new(documents)));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("bind ephemeral port")?;
        let addr = listener.local_addr().context("read local addr")?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let server = axum::serve(listener, app).with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        });
        let handle = tokio::spawn(async move { server.await });

        Ok(Self {
            addr,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Base URL for the running server, e.g. `http://127.0.0.1:49152`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Shut the server down and wait for it to exit.
    ///
    /// # Errors
    ///
    /// Returns an error if the server task panicked or the listener failed.
    pub async fn shutdown(mut self) -> anyhow::Result<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.await.context("join spec server task")??;
        }
        Ok(())
    }
}

impl Drop for SpecServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

async fn serve_spec(State(specs): State<SpecMap>, Path(server): Path<String>) -> Response {
    match specs.0.get(&server) {
        Some(body) => (
            StatusCode::OK,
            [("content-type", "application/json")],
            body.clone(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "unknown server").into_response(),
    }
}
