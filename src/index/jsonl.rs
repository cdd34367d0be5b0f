//! JSON-lines chunk index

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use super::{ChunkIndex, IndexStats};
use crate::error::IndexError;
use crate::ingest::ChunkRecord;

/// Append-only index persisting one record per line.
pub struct JsonlIndex {
    path: PathBuf,
}

impl JsonlIndex {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent(&self) -> Result<(), IndexError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| IndexError::OpenFailed {
                    path: self.path.display().to_string(),
                    reason: e.to_string(),
                })?;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ChunkIndex for JsonlIndex {
    async fn add_records(&self, records: &[ChunkRecord]) -> Result<usize, IndexError> {
        if records.is_empty() {
            return Ok(0);
        }
        self.ensure_parent().await?;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| IndexError::OpenFailed {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;

        let mut buffer = String::new();
        for record in records {
            let line = serde_json::to_string(record)
                .map_err(|e| IndexError::SerializeFailed(e.to_string()))?;
            buffer.push_str(&line);
            buffer.push('\n');
        }

        file.write_all(buffer.as_bytes())
            .await
            .map_err(|e| IndexError::WriteFailed(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| IndexError::WriteFailed(e.to_string()))?;

        tracing::info!("Indexed {} records to {}", records.len(), self.path.display());
        Ok(records.len())
    }

    async fn stats(&self) -> Result<IndexStats, IndexError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(IndexStats::default());
            }
            Err(e) => return Err(IndexError::ReadFailed(e.to_string())),
        };

        let mut total = 0usize;
        let mut languages: HashMap<String, usize> = HashMap::new();
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let record: ChunkRecord = serde_json::from_str(line)
                .map_err(|e| IndexError::ParseFailed(e.to_string()))?;
            total += 1;
            let language = record.language().unwrap_or("unknown").to_string();
            *languages.entry(language).or_default() += 1;
        }

        let mut language_breakdown: Vec<(String, usize)> = languages.into_iter().collect();
        language_breakdown.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        Ok(IndexStats {
            total_records: total,
            language_breakdown,
        })
    }

    async fn clear(&self) -> Result<(), IndexError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(IndexError::WriteFailed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value};

    fn record(language: &str, text: &str) -> ChunkRecord {
        let mut metadata = Map::new();
        metadata.insert("language".to_string(), Value::from(language));
        metadata.insert("kind".to_string(), Value::from("file"));
        ChunkRecord {
            text: text.to_string(),
            metadata,
        }
    }

    #[tokio::test]
    async fn test_add_and_stats() {
        let dir = tempfile::tempdir().unwrap();
        let index = JsonlIndex::new(dir.path().join("index.jsonl"));

        let written = index
            .add_records(&[record("py", "a"), record("py", "b"), record("js", "c")])
            .await
            .unwrap();
        assert_eq!(written, 3);

        let stats = index.stats().await.unwrap();
        assert_eq!(stats.total_records, 3);
        assert_eq!(
            stats.language_breakdown,
            vec![("py".to_string(), 2), ("js".to_string(), 1)]
        );
    }

    #[tokio::test]
    async fn test_stats_on_missing_index_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let index = JsonlIndex::new(dir.path().join("missing.jsonl"));

        let stats = index.stats().await.unwrap();
        assert_eq!(stats.total_records, 0);
        assert!(stats.language_breakdown.is_empty());
    }

    #[tokio::test]
    async fn test_clear_removes_records() {
        let dir = tempfile::tempdir().unwrap();
        let index = JsonlIndex::new(dir.path().join("index.jsonl"));

        index.add_records(&[record("py", "a")]).await.unwrap();
        index.clear().await.unwrap();
        // Clearing twice is fine
        index.clear().await.unwrap();

        let stats = index.stats().await.unwrap();
        assert_eq!(stats.total_records, 0);
    }

    #[tokio::test]
    async fn test_append_accumulates() {
        let dir = tempfile::tempdir().unwrap();
        let index = JsonlIndex::new(dir.path().join("index.jsonl"));

        index.add_records(&[record("py", "a")]).await.unwrap();
        index.add_records(&[record("py", "b")]).await.unwrap();

        let stats = index.stats().await.unwrap();
        assert_eq!(stats.total_records, 2);
    }
}
