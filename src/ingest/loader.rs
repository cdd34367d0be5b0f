//! Repository walking and chunk-record emission

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::parser::CodeParser;
use super::record::ChunkRecord;
use crate::error::IngestError;

/// Directory segments skipped at any depth.
const EXCLUDED_DIRS: &[&str] = &[".git", "__pycache__", "node_modules", ".venv", "dist", "build"];

/// Extensions never treated as text.
const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "exe", "dll", "so", "pyc", "class", "jar", "zip", "tar", "gz",
];

/// Bytes probed for the null-byte binary sniff.
const BINARY_SNIFF_BYTES: usize = 2048;

/// Walks a repository root and emits sanitized [`ChunkRecord`]s for every
/// eligible file.
///
/// All per-file failures are absorbed: an unreadable file is skipped with a
/// warning and the walk continues. Files are visited in filesystem traversal
/// order; only per-file chunk ordering is guaranteed.
pub struct RepositoryLoader {
    repo_path: PathBuf,
    include_extensions: Option<Vec<String>>,
    max_file_size: u64,
    parser: CodeParser,
}

impl RepositoryLoader {
    pub fn new(repo_path: impl AsRef<Path>) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
            include_extensions: None,
            max_file_size: 1_048_576,
            parser: CodeParser::new(),
        }
    }

    /// Restrict the walk to an extension allow-list (lowercase, no dot).
    pub fn with_extensions(mut self, extensions: Option<Vec<String>>) -> Self {
        self.include_extensions =
            extensions.map(|exts| exts.into_iter().map(|e| e.to_lowercase()).collect());
        self
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// Walk the repository and emit chunk records.
    ///
    /// Fails only when the root itself is missing or not a directory; an
    /// empty repository is an empty result, not an error.
    pub fn load_repository(&self) -> Result<Vec<ChunkRecord>, IngestError> {
        if !self.repo_path.exists() {
            return Err(IngestError::RootNotFound(
                self.repo_path.display().to_string(),
            ));
        }
        if !self.repo_path.is_dir() {
            return Err(IngestError::NotADirectory(
                self.repo_path.display().to_string(),
            ));
        }

        tracing::info!("Loading repository from: {}", self.repo_path.display());

        let mut records = Vec::new();
        let walker = WalkDir::new(&self.repo_path)
            .into_iter()
            .filter_entry(|entry| !is_excluded_segment(entry.file_name().to_string_lossy().as_ref()));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();

            if let Ok(metadata) = entry.metadata()
                && metadata.len() > self.max_file_size
            {
                tracing::debug!("Skipping large file: {}", path.display());
                continue;
            }

            let extension = path
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .unwrap_or_default();

            if BINARY_EXTENSIONS.contains(&extension.as_str()) {
                tracing::debug!("Skipping binary extension: {}", path.display());
                continue;
            }

            if let Some(allowed) = &self.include_extensions
                && !allowed.iter().any(|a| a == &extension)
            {
                continue;
            }

            let bytes = match fs::read(path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!("Skipping unreadable file {}: {}", path.display(), e);
                    continue;
                }
            };

            let sniff = &bytes[..bytes.len().min(BINARY_SNIFF_BYTES)];
            if sniff.contains(&0u8) {
                tracing::debug!("Skipping binary file: {}", path.display());
                continue;
            }

            // UTF-8 first, then Latin-1, which maps every byte to a char and
            // cannot fail. The only skip path is the read error above.
            let text = match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!(
                        "File {} is not UTF-8, decoding as Latin-1",
                        path.display()
                    );
                    e.into_bytes().iter().map(|&b| b as char).collect()
                }
            };

            let chunks = self.parser.parse_file(path, &text, Some(&self.repo_path));
            let load_timestamp = chrono::Utc::now().to_rfc3339();

            for chunk in &chunks {
                records.push(ChunkRecord::from_chunk(chunk, &self.repo_path, &load_timestamp));
            }
        }

        tracing::info!("Loaded {} chunks", records.len());
        Ok(records)
    }
}

fn is_excluded_segment(segment: &str) -> bool {
    let lowered = segment.to_lowercase();
    EXCLUDED_DIRS.contains(&lowered.as_str())
}

/// Number of distinct files a record set came from.
pub fn distinct_files(records: &[ChunkRecord]) -> usize {
    let mut paths: Vec<&str> = records
        .iter()
        .filter_map(|r| r.repo_relative_path())
        .collect();
    paths.sort_unstable();
    paths.dedup();
    paths.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(root: &Path, rel: &str, content: &[u8]) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        let mut file = fs::File::create(path).unwrap();
        file.write_all(content).unwrap();
    }

    #[test]
    fn test_walk_skips_excluded_dirs_and_binaries() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        write_file(root, "src/app.py", b"def main():\n    pass\n");
        write_file(root, "node_modules/lib/index.js", b"function hidden() {\n}\n");
        write_file(root, ".git/config", b"[core]\n");
        write_file(root, "logo.png", b"\x89PNG\r\n");
        write_file(root, "blob.dat", b"text\x00binary");

        let loader = RepositoryLoader::new(root);
        let records = loader.load_repository().unwrap();

        let paths: Vec<_> = records
            .iter()
            .filter_map(|r| r.repo_relative_path().map(str::to_string))
            .collect();
        assert!(paths.iter().all(|p| p.contains("app.py")), "got: {paths:?}");
        assert_eq!(distinct_files(&records), 1);
    }

    #[test]
    fn test_extension_allow_list() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        write_file(root, "a.py", b"def f():\n    pass\n");
        write_file(root, "b.js", b"function g() {\n}\n");

        let loader = RepositoryLoader::new(root).with_extensions(Some(vec!["py".to_string()]));
        let records = loader.load_repository().unwrap();

        assert_eq!(distinct_files(&records), 1);
        assert_eq!(records[0].language(), Some("py"));
    }

    #[test]
    fn test_null_byte_sniff_excludes_file() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        // A null byte in the probe window excludes the file regardless of
        // an allow-listed extension.
        write_file(root, "weird.py", b"def f():\x00\n    pass\n");

        let loader = RepositoryLoader::new(root).with_extensions(Some(vec!["py".to_string()]));
        let records = loader.load_repository().unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_latin1_fallback_decodes() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        // 0xE9 is 'é' in Latin-1 and invalid as a UTF-8 start byte here
        write_file(root, "notes.txt", b"caf\xe9\n");

        let loader = RepositoryLoader::new(root);
        let records = loader.load_repository().unwrap();

        assert_eq!(records.len(), 1);
        assert!(records[0].text.contains("caf\u{e9}"));
    }

    #[test]
    fn test_missing_root_errors() {
        let loader = RepositoryLoader::new("/definitely/not/here");
        assert!(matches!(
            loader.load_repository(),
            Err(IngestError::RootNotFound(_))
        ));
    }

    #[test]
    fn test_empty_repository_is_empty_result() {
        let dir = tempfile::tempdir().unwrap();
        let records = RepositoryLoader::new(dir.path()).load_repository().unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_records_carry_load_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write_file(root, "conf.toml", b"[a]\nb = 1\n");

        let records = RepositoryLoader::new(root).load_repository().unwrap();
        assert_eq!(records.len(), 1);

        let meta = &records[0].metadata;
        assert_eq!(meta["repo_relative_path"], serde_json::json!("conf.toml"));
        assert!(meta["load_timestamp"].is_string());
        assert_eq!(
            meta["character_count"],
            serde_json::json!(records[0].text.chars().count())
        );
        assert_eq!(meta["kind"], serde_json::json!("file"));
    }
}
