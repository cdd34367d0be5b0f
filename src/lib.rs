//! # Codebase Intel - Code-Aware Repository Ingestion and Chunking
//!
//! Ingests a source repository, splits it into semantically meaningful
//! chunks (functions, classes, whole files), and emits flat, index-safe
//! records ready for an embedding/vector-index service. Exposed as a
//! library, a CLI, and a thin HTTP API.
//!
//! ## Overview
//!
//! The heart of the crate is the ingestion pipeline: a heuristic
//! multi-language parser that decomposes files into logically bounded,
//! metadata-rich units for retrieval. Python is parsed with tree-sitter;
//! the JS/TS and Java families use anchored patterns plus a brace-matching
//! boundary scanner; everything else falls back to whole-file chunks.
//! Malformed input never aborts a walk - it degrades to coarser chunks.
//!
//! ## Architecture
//!
//! ```text
//! filesystem
//!     │ walk + binary filter
//! ┌───▼──────────────┐
//! │ RepositoryLoader │
//! └───┬──────────────┘
//!     │ per file
//! ┌───▼────────┐   ┌──────────────────────────────┐
//! │ CodeParser ├──▶│ extractors (py / js / java)  │
//! └───┬────────┘   └──────────────────────────────┘
//!     │ sanitized ChunkRecords
//! ┌───▼──────────────┐   ┌────────────┐
//! │ SemanticSplitter ├──▶│ ChunkIndex │  (embedding service seam)
//! └──────────────────┘   └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`ingest`]: File walking, per-language chunk extraction, sanitization,
//!   and size-bounded re-chunking
//! - [`index`]: Chunk index seam with a JSONL implementation
//! - [`server`]: HTTP API over the pipeline
//! - [`config`]: Configuration management with TOML file support
//! - [`types`]: HTTP request/response types
//! - [`error`]: Error types and utilities
//! - [`paths`]: Path computation utilities
//!
//! ## Usage Example
//!
//! ```no_run
//! use codebase_intel::ingest::{RepositoryLoader, SemanticSplitter};
//!
//! fn main() -> anyhow::Result<()> {
//!     let records = RepositoryLoader::new("/path/to/repo").load_repository()?;
//!     let records = SemanticSplitter::default_budget().split_records(records);
//!     println!("{} records ready for embedding", records.len());
//!     Ok(())
//! }
//! ```

/// Configuration management with TOML file support
pub mod config;

/// Error types and utilities
pub mod error;

/// Chunk index seam and JSONL implementation
pub mod index;

/// File walking, chunk extraction, and size-bounded re-chunking
pub mod ingest;

/// Path computation utilities
pub mod paths;

/// HTTP API over the ingestion pipeline
pub mod server;

/// HTTP request/response types
pub mod types;
