//! Flat, index-safe chunk records and metadata sanitization

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::chunk::{Chunk, ChunkKind};

/// A chunk flattened for the embedding/index collaborator.
///
/// Every metadata value is a primitive (string, number, boolean, or null)
/// after sanitization, since flat scalar metadata is all the downstream
/// vector index accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    pub text: String,
    pub metadata: Map<String, Value>,
}

impl ChunkRecord {
    /// Derive a record from a chunk, attaching load-time metadata.
    pub fn from_chunk(chunk: &Chunk, repo_root: &Path, load_timestamp: &str) -> Self {
        let mut metadata = Map::new();
        metadata.insert("source_path".into(), Value::from(chunk.source_path.clone()));
        metadata.insert("kind".into(), Value::from(chunk.kind.as_str()));
        metadata.insert("name".into(), Value::from(chunk.name.clone()));
        metadata.insert("start_line".into(), Value::from(chunk.start_line));
        metadata.insert("end_line".into(), Value::from(chunk.end_line));
        metadata.insert("language".into(), Value::from(chunk.language.clone()));

        if chunk.kind == ChunkKind::Class {
            metadata.insert(
                "members".into(),
                Value::Array(chunk.members.iter().map(|m| Value::from(m.clone())).collect()),
            );
        }

        if let (Some(name), Some(rel)) = (&chunk.project_name, &chunk.project_relative_path) {
            metadata.insert("project_name".into(), Value::from(name.clone()));
            metadata.insert("project_relative_path".into(), Value::from(rel.clone()));
        }

        let repo_relative = Path::new(&chunk.source_path)
            .strip_prefix(repo_root)
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|_| chunk.source_path.clone());
        metadata.insert("repo_relative_path".into(), Value::from(repo_relative));
        metadata.insert(
            "repo_root_path".into(),
            Value::from(repo_root.to_string_lossy().to_string()),
        );
        metadata.insert("load_timestamp".into(), Value::from(load_timestamp));
        metadata.insert(
            "character_count".into(),
            Value::from(chunk.text.chars().count()),
        );

        let metadata = metadata
            .into_iter()
            .map(|(k, v)| (k, sanitize_value(v)))
            .collect();

        ChunkRecord {
            text: chunk.text.clone(),
            metadata,
        }
    }

    /// Repo-relative path this record came from, if present.
    pub fn repo_relative_path(&self) -> Option<&str> {
        self.metadata.get("repo_relative_path").and_then(|v| v.as_str())
    }

    /// Language tag, if present.
    pub fn language(&self) -> Option<&str> {
        self.metadata.get("language").and_then(|v| v.as_str())
    }
}

/// Reduce a metadata value to an index-safe primitive.
///
/// Primitives pass through; lists become a comma-joined string; maps become
/// a compact JSON string.
pub fn sanitize_value(value: Value) -> Value {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => value,
        Value::Array(items) => {
            let joined = items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(",");
            Value::String(joined)
        }
        Value::Object(map) => {
            let compact = serde_json::to_string(&Value::Object(map)).unwrap_or_default();
            Value::String(compact)
        }
    }
}
