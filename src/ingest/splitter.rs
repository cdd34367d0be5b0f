//! Size-bounding post-pass over emitted chunk records

use serde_json::Value;

use super::record::ChunkRecord;
use crate::error::ChunkingError;

/// Separators tried in priority order before raw character slicing.
const SEPARATORS: &[&str] = &["\nclass ", "\ndef ", "\n\n", "\n", "\n{\n"];

/// Enforces a maximum unit size for embedding, preferring to cut at
/// declaration keywords and blank lines over raw character positions.
///
/// Records under the budget pass through untouched. Oversized records are
/// subdivided; sub-pieces inherit the parent's metadata (with
/// `character_count` recomputed) and overlap by `chunk_overlap` characters
/// to preserve local context for retrieval.
pub struct SemanticSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl SemanticSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self, ChunkingError> {
        if chunk_size == 0 {
            return Err(ChunkingError::InvalidChunkSize(
                "chunk_size must be greater than 0".to_string(),
            ));
        }
        if chunk_overlap >= chunk_size {
            return Err(ChunkingError::InvalidOverlap {
                overlap: chunk_overlap,
                size: chunk_size,
            });
        }
        Ok(Self {
            chunk_size,
            chunk_overlap,
        })
    }

    /// Splitter with the default 2000-character budget and 200-character
    /// overlap.
    pub fn default_budget() -> Self {
        Self {
            chunk_size: 2000,
            chunk_overlap: 200,
        }
    }

    /// Re-bound a record sequence to the size budget.
    pub fn split_records(&self, records: Vec<ChunkRecord>) -> Vec<ChunkRecord> {
        let total = records.len();
        let mut out = Vec::with_capacity(total);

        for record in records {
            if record.text.chars().count() <= self.chunk_size {
                out.push(record);
                continue;
            }

            for piece in self.split_text(&record.text) {
                let mut metadata = record.metadata.clone();
                metadata.insert(
                    "character_count".to_string(),
                    Value::from(piece.chars().count()),
                );
                out.push(ChunkRecord {
                    text: piece,
                    metadata,
                });
            }
        }

        tracing::debug!("Split {} records into {}", total, out.len());
        out
    }

    /// Split raw text to the budget using the separator priority list.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.split_with(text, SEPARATORS)
    }

    fn split_with(&self, text: &str, separators: &[&str]) -> Vec<String> {
        let Some(position) = separators.iter().position(|sep| text.contains(sep)) else {
            return self.slice_chars(text);
        };
        let separator = separators[position];
        let remaining = &separators[position + 1..];

        let mut out = Vec::new();
        let mut pending: Vec<String> = Vec::new();

        for piece in split_keep_separator(text, separator) {
            if piece.chars().count() <= self.chunk_size {
                pending.push(piece);
            } else {
                // Flush what fits, then descend with lower-priority cuts
                self.merge_pending(&mut out, &mut pending);
                if remaining.is_empty() {
                    out.extend(self.slice_chars(&piece));
                } else {
                    out.extend(self.split_with(&piece, remaining));
                }
            }
        }
        self.merge_pending(&mut out, &mut pending);
        out
    }

    /// Greedily pack small pieces up to the budget, carrying an overlap tail
    /// from each emitted chunk into the next.
    ///
    /// The tail counts against the budget of the chunk it opens; when even
    /// the tail cannot fit beside the next piece it is dropped, so no merged
    /// chunk ever exceeds `chunk_size`.
    fn merge_pending(&self, out: &mut Vec<String>, pending: &mut Vec<String>) {
        let mut current = String::new();
        let mut current_len = 0usize;

        for piece in pending.drain(..) {
            let piece_len = piece.chars().count();
            if current_len > 0 && current_len + piece_len > self.chunk_size {
                let tail = overlap_tail(&current, self.chunk_overlap);
                out.push(std::mem::take(&mut current));
                current_len = tail.chars().count();
                if current_len + piece_len > self.chunk_size {
                    current_len = 0;
                } else {
                    current = tail;
                }
            }
            current.push_str(&piece);
            current_len += piece_len;
        }

        if !current.is_empty() {
            out.push(current);
        }
    }

    /// Raw character slicing with overlap, the last-resort cut.
    fn slice_chars(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() <= self.chunk_size {
            return vec![text.to_string()];
        }

        let step = (self.chunk_size - self.chunk_overlap).max(1);
        let mut out = Vec::new();
        let mut start = 0;
        while start < chars.len() {
            let end = (start + self.chunk_size).min(chars.len());
            out.push(chars[start..end].iter().collect());
            if end >= chars.len() {
                break;
            }
            start += step;
        }
        out
    }
}

/// Last `overlap` characters of `text`, on char boundaries.
fn overlap_tail(text: &str, overlap: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    let start = chars.len().saturating_sub(overlap);
    chars[start..].iter().collect()
}

/// Split on `separator`, keeping the separator attached to the start of the
/// following piece so declaration keywords stay with their block.
fn split_keep_separator(text: &str, separator: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut search = 0;

    while let Some(pos) = text[search..].find(separator) {
        let at = search + pos;
        if at > start {
            pieces.push(text[start..at].to_string());
        }
        start = at;
        search = at + separator.len();
    }
    pieces.push(text[start..].to_string());
    pieces
}
