/// Centralized error types for codebase-intel using thiserror
///
/// Provides domain-specific error types for better error handling and user-facing messages.
use thiserror::Error;

/// Main error type for the ingestion system
#[derive(Error, Debug)]
pub enum IntelError {
    #[error("Ingestion error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Chunking error: {0}")]
    Chunking(#[from] ChunkingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors related to repository walking and file loading
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Repository root not found: {0}")]
    RootNotFound(String),

    #[error("Repository root is not a directory: {0}")]
    NotADirectory(String),
}

/// Errors related to chunk splitting
#[derive(Error, Debug)]
pub enum ChunkingError {
    #[error("Invalid chunk size: {0}")]
    InvalidChunkSize(String),

    #[error("Chunk overlap {overlap} must be smaller than chunk size {size}")]
    InvalidOverlap { overlap: usize, size: usize },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
}

/// Errors related to the chunk index
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Failed to open index at '{path}': {reason}")]
    OpenFailed { path: String, reason: String },

    #[error("Failed to write to index: {0}")]
    WriteFailed(String),

    #[error("Failed to read index: {0}")]
    ReadFailed(String),

    #[error("Failed to serialize record: {0}")]
    SerializeFailed(String),

    #[error("Failed to parse index record: {0}")]
    ParseFailed(String),
}

// Conversion from anyhow::Error to IntelError
impl From<anyhow::Error> for IntelError {
    fn from(err: anyhow::Error) -> Self {
        IntelError::Other(format!("{:#}", err))
    }
}

impl IntelError {
    /// Create a new error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        IntelError::Other(msg.into())
    }

    /// Check if this is a user error (bad input) vs system error
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            IntelError::Ingest(IngestError::RootNotFound(_))
                | IntelError::Ingest(IngestError::NotADirectory(_))
                | IntelError::Config(ConfigError::InvalidValue { .. })
                | IntelError::Chunking(ChunkingError::InvalidChunkSize(_))
                | IntelError::Chunking(ChunkingError::InvalidOverlap { .. })
        )
    }
}
