//! HTTP API request/response types

use serde::{Deserialize, Serialize};

/// Request to ingest a repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRequest {
    /// Path to the repository root to ingest
    pub path: String,
    /// Optional extension allow-list (lowercase, no dot); empty means all
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Apply the size-bounding splitter before indexing (default: true)
    #[serde(default = "default_split")]
    pub split: bool,
}

fn default_split() -> bool {
    true
}

/// Response from an ingestion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    /// Number of files that produced at least one chunk
    pub files_ingested: usize,
    /// Number of chunks produced by the parsers
    pub chunks_created: usize,
    /// Number of records written to the index after splitting
    pub records_written: usize,
    /// Time taken in milliseconds
    pub duration_ms: u64,
}

/// Response for system status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Path of the chunk index
    pub index_path: String,
    /// Total records in the index
    pub total_records: usize,
    /// Record counts per language tag, descending
    pub language_breakdown: Vec<(String, usize)>,
}

/// Response for health checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
