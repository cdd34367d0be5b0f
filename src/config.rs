/// Configuration system for codebase-intel
///
/// Supports loading from multiple sources with priority:
/// CLI args > Config file > Defaults
use crate::error::{ConfigError, IntelError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Repository walking configuration
    #[serde(default)]
    pub ingestion: IngestionConfig,

    /// Secondary size-bounding splitter configuration
    #[serde(default)]
    pub splitter: SplitterConfig,

    /// Chunk index configuration
    #[serde(default)]
    pub index: IndexConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Repository walking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionConfig {
    /// Maximum file size to ingest (in bytes)
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Extension allow-list (lowercase, no dot); empty means all extensions
    #[serde(default)]
    pub include_extensions: Vec<String>,
}

/// Secondary splitter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitterConfig {
    /// Character budget per emitted unit
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Characters of overlap carried across adjacent sub-pieces
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

/// Chunk index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// JSONL index file path
    #[serde(default = "default_index_path")]
    pub jsonl_path: PathBuf,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions
fn default_max_file_size() -> u64 {
    1_048_576 // 1 MB
}

fn default_chunk_size() -> usize {
    2000
}

fn default_chunk_overlap() -> usize {
    200
}

fn default_index_path() -> PathBuf {
    crate::paths::PlatformPaths::default_index_path()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            include_extensions: Vec::new(),
        }
    }
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            jsonl_path: default_index_path(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self, IntelError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseFailed(format!("Invalid TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default location or create default
    pub fn load_or_default() -> Result<Self, IntelError> {
        let config_path = crate::paths::PlatformPaths::default_config_path();

        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            Self::from_file(&config_path)
        } else {
            tracing::info!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<(), IntelError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::SaveFailed(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| ConfigError::SaveFailed(format!("Failed to write config file: {}", e)))?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), IntelError> {
        if self.splitter.chunk_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "splitter.chunk_size".to_string(),
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.splitter.chunk_overlap >= self.splitter.chunk_size {
            return Err(ConfigError::InvalidValue {
                key: "splitter.chunk_overlap".to_string(),
                reason: format!(
                    "must be smaller than chunk_size ({})",
                    self.splitter.chunk_size
                ),
            }
            .into());
        }

        if self.ingestion.max_file_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "ingestion.max_file_size".to_string(),
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                key: "server.port".to_string(),
                reason: "must be a non-zero port".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
