//! Chunk index abstraction
//!
//! The embedding/vector service is an external collaborator; this trait is
//! the seam it plugs into. The shipped [`JsonlIndex`] persists records as
//! JSON lines for local use and testing. Implementations are constructed
//! explicitly and passed in; there is no process-wide registry.

mod jsonl;

pub use jsonl::JsonlIndex;

use crate::error::IndexError;
use crate::ingest::ChunkRecord;

/// Destination for sanitized chunk records
#[async_trait::async_trait]
pub trait ChunkIndex: Send + Sync {
    /// Append records, returning how many were written
    async fn add_records(&self, records: &[ChunkRecord]) -> Result<usize, IndexError>;

    /// Summarize the index contents
    async fn stats(&self) -> Result<IndexStats, IndexError>;

    /// Remove all records
    async fn clear(&self) -> Result<(), IndexError>;
}

/// Index content summary
#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    pub total_records: usize,
    /// Record counts per language tag, descending
    pub language_breakdown: Vec<(String, usize)>,
}
