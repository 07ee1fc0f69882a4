//! `OpenAPI` -> tool descriptor extraction.
//!
//! This crate is intended to be used by:
//! - `trestle-bridge` (catalog aggregation + CLI)
//!
//! It intentionally contains **no** I/O: documents come in already parsed,
//! descriptors come out as plain serde values. Fetching and discovery live in
//! the bridge.

pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod resolver;
