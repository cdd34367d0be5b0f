//! Extension-keyed dispatch to the per-language extractors

use std::path::Path;

use super::brace::{BraceExtractor, DeclarationExtractor};
use super::chunk::{Chunk, language_tag};
use super::project::resolve_project;
use super::python;

/// Closed set of extraction strategies. Adding a language means adding a
/// variant here and one arm to [`ExtractorKind::for_extension`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorKind {
    /// Parse-tree traversal for indented languages (Python)
    IndentationStructured,
    /// Regex anchors + boundary scanner for the JS/TS family
    BraceStructured,
    /// Type-declaration extraction for Java-family languages
    DeclarationStyle,
    /// Whole-file chunk for everything else
    Generic,
}

impl ExtractorKind {
    /// Route a normalized (lowercase, no dot) extension to its extractor.
    pub fn for_extension(extension: &str) -> Self {
        match extension {
            "py" => ExtractorKind::IndentationStructured,
            "js" | "jsx" | "ts" | "tsx" => ExtractorKind::BraceStructured,
            "java" | "kt" => ExtractorKind::DeclarationStyle,
            _ => ExtractorKind::Generic,
        }
    }
}

/// Single public entry point of the parsing subsystem.
///
/// Holds the compiled regex extractors so repeated calls across a repository
/// walk don't recompile patterns.
pub struct CodeParser {
    brace: BraceExtractor,
    declaration: DeclarationExtractor,
}

impl CodeParser {
    pub fn new() -> Self {
        Self {
            brace: BraceExtractor::new(),
            declaration: DeclarationExtractor::new(),
        }
    }

    /// Split one file into ordered chunks.
    ///
    /// Deterministic for fixed inputs: no clock or randomness feeds chunk
    /// boundaries. Malformed input never fails; it degrades to a whole-file
    /// chunk per extractor policy.
    pub fn parse_file(&self, path: &Path, content: &str, repo_root: Option<&Path>) -> Vec<Chunk> {
        let context = resolve_project(path, repo_root);
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ExtractorKind::for_extension(&extension) {
            ExtractorKind::IndentationStructured => python::extract(path, content, &context),
            ExtractorKind::BraceStructured => self.brace.extract(path, content, &context),
            ExtractorKind::DeclarationStyle => self.declaration.extract(path, content, &context),
            ExtractorKind::Generic => vec![Chunk::whole_file(
                path,
                content,
                language_tag(&extension),
                context.project_name,
                context.project_relative_path,
            )],
        }
    }
}

impl Default for CodeParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::chunk::ChunkKind;
    use std::path::PathBuf;

    #[test]
    fn test_extension_routing() {
        assert_eq!(
            ExtractorKind::for_extension("py"),
            ExtractorKind::IndentationStructured
        );
        for ext in ["js", "jsx", "ts", "tsx"] {
            assert_eq!(ExtractorKind::for_extension(ext), ExtractorKind::BraceStructured);
        }
        for ext in ["java", "kt"] {
            assert_eq!(ExtractorKind::for_extension(ext), ExtractorKind::DeclarationStyle);
        }
        assert_eq!(ExtractorKind::for_extension("json"), ExtractorKind::Generic);
        assert_eq!(ExtractorKind::for_extension(""), ExtractorKind::Generic);
    }

    #[test]
    fn test_generic_file_yields_single_chunk() {
        let parser = CodeParser::new();
        let content = "{\n  \"name\": \"demo\",\n  \"nested\": {\n    \"a\": 1\n  }\n}\n";
        let chunks = parser.parse_file(&PathBuf::from("/repo/package.json"), content, None);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].kind, ChunkKind::File);
        assert_eq!(chunks[0].language, "json");
        assert_eq!(chunks[0].start_line, 0);
        assert_eq!(chunks[0].end_line, content.lines().count());
        assert_eq!(chunks[0].text, content);
    }

    #[test]
    fn test_no_extension_is_unknown() {
        let parser = CodeParser::new();
        let chunks = parser.parse_file(&PathBuf::from("/repo/Makefile"), "all:\n\ttrue\n", None);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].language, "unknown");
    }

    #[test]
    fn test_determinism() {
        let parser = CodeParser::new();
        let path = PathBuf::from("/repo/projects/demo/src/app.ts");
        let content = "export function go() {\n  return 1;\n}\n";

        let first = parser.parse_file(&path, content, None);
        let second = parser.parse_file(&path, content, None);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.text, b.text);
            assert_eq!(a.name, b.name);
            assert_eq!(a.start_line, b.start_line);
            assert_eq!(a.end_line, b.end_line);
        }
    }

    #[test]
    fn test_project_context_flows_to_chunks() {
        let parser = CodeParser::new();
        let path = PathBuf::from("/repo/projects/myapp/src/x.py");
        let chunks = parser.parse_file(&path, "def f():\n    pass\n", None);

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].project_name.as_deref(), Some("myapp"));
        assert_eq!(chunks[0].project_relative_path.as_deref(), Some("src/x.py"));
    }

    #[test]
    fn test_python_class_scenario() {
        // One class with two methods: the class chunk plus one function
        // chunk per method.
        let parser = CodeParser::new();
        let mut source = String::from("class Service:\n");
        source.push_str("    def start(self):\n        pass\n\n");
        source.push_str("    def stop(self):\n        pass\n");

        let chunks = parser.parse_file(&PathBuf::from("/repo/svc.py"), &source, None);

        let functions = chunks.iter().filter(|c| c.kind == ChunkKind::Function).count();
        let classes = chunks.iter().filter(|c| c.kind == ChunkKind::Class).count();
        assert_eq!(functions, 2);
        assert_eq!(classes, 1);
    }
}
