//! Repository ingestion and code-aware chunking
//!
//! Walks a repository tree, splits each file into logically bounded chunks
//! (functions, classes, or whole files) with heuristic per-language parsers,
//! and emits flat, index-safe records for embedding.

mod brace;
mod chunk;
mod loader;
mod parser;
mod project;
mod python;
mod record;
mod scanner;
mod splitter;

pub use brace::{BraceExtractor, DeclarationExtractor};
pub use chunk::{Chunk, ChunkKind, language_tag};
pub use loader::{RepositoryLoader, distinct_files};
pub use parser::{CodeParser, ExtractorKind};
pub use project::{ProjectContext, resolve_project};
pub use record::{ChunkRecord, sanitize_value};
pub use scanner::find_block_end;
pub use splitter::SemanticSplitter;
