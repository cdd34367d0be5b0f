//! Chunk data model produced by the parsing subsystem

use std::path::Path;

/// Granularity of a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    /// A single function, method, or arrow-function binding
    Function,
    /// A class/interface/enum declaration including its body
    Class,
    /// Whole-file fallback when no finer boundary was detected
    File,
}

impl ChunkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkKind::Function => "function",
            ChunkKind::Class => "class",
            ChunkKind::File => "file",
        }
    }
}

/// A bounded, typed unit of source text with structural metadata.
///
/// Line numbers are zero-based with an exclusive end. A file-level chunk
/// spans the whole document. Chunks are immutable once created.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub text: String,
    pub kind: ChunkKind,
    /// Identifier of the function/class, or the file stem for file chunks
    pub name: String,
    /// Method names for class chunks, empty otherwise
    pub members: Vec<String>,
    pub start_line: usize,
    pub end_line: usize,
    /// Short language tag ("py", "js", "java", raw extension, or "unknown")
    pub language: String,
    /// Present only when the file resolves under a recognized project root
    pub project_name: Option<String>,
    pub project_relative_path: Option<String>,
    /// Absolute path of the originating source file
    pub source_path: String,
}

impl Chunk {
    /// Build a whole-file fallback chunk for `content`.
    pub fn whole_file(
        path: &Path,
        content: &str,
        language: String,
        project_name: Option<String>,
        project_relative_path: Option<String>,
    ) -> Self {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        Chunk {
            text: content.to_string(),
            kind: ChunkKind::File,
            name,
            members: Vec::new(),
            start_line: 0,
            end_line: content.lines().count(),
            language,
            project_name,
            project_relative_path,
            source_path: path.to_string_lossy().to_string(),
        }
    }
}

/// Language tag for a file extension.
///
/// Family tags are intentionally coarse: the whole JS/TS family maps to "js"
/// and Kotlin shares "java", matching the extractor families.
pub fn language_tag(extension: &str) -> String {
    match extension.to_lowercase().as_str() {
        "py" => "py".to_string(),
        "js" | "jsx" | "ts" | "tsx" => "js".to_string(),
        "java" | "kt" => "java".to_string(),
        "" => "unknown".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_kind_as_str() {
        assert_eq!(ChunkKind::Function.as_str(), "function");
        assert_eq!(ChunkKind::Class.as_str(), "class");
        assert_eq!(ChunkKind::File.as_str(), "file");
    }

    #[test]
    fn test_whole_file_chunk_spans_document() {
        let path = PathBuf::from("/repo/config.json");
        let content = "{\n  \"a\": 1\n}";
        let chunk = Chunk::whole_file(&path, content, "json".to_string(), None, None);

        assert_eq!(chunk.kind, ChunkKind::File);
        assert_eq!(chunk.name, "config");
        assert_eq!(chunk.start_line, 0);
        assert_eq!(chunk.end_line, 3);
        assert!(chunk.members.is_empty());
    }

    #[test]
    fn test_language_tag_families() {
        assert_eq!(language_tag("py"), "py");
        assert_eq!(language_tag("ts"), "js");
        assert_eq!(language_tag("tsx"), "js");
        assert_eq!(language_tag("kt"), "java");
        assert_eq!(language_tag("TOML"), "toml");
        assert_eq!(language_tag(""), "unknown");
    }
}
