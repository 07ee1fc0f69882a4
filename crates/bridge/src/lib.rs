//! Bridge from backend `OpenAPI` registries to a flat tool catalog.
//!
//! The pure extraction lives in `trestle-openapi-tools`; this crate owns the
//! I/O around it: server discovery, document fetching, per-server degradation,
//! and the deterministic concatenation of results.

pub mod aggregator;
pub mod config;
pub mod contracts;
pub mod discovery;
pub mod error;
pub mod transport;
