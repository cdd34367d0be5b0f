//! Regex-anchored extractors for brace-structured languages

use std::path::Path;

use regex::Regex;

use super::chunk::{Chunk, ChunkKind};
use super::project::ProjectContext;
use super::scanner::find_block_end;

/// Heuristic extractor for the JS/TS family.
///
/// Matches named function declarations, variable-bound arrow functions, and
/// class declarations, all optionally export-qualified. Block ends come from
/// the boundary scanner; an arrow function without a `{` on its line is
/// treated as a single-line expression body.
pub struct BraceExtractor {
    function_re: Regex,
    arrow_re: Regex,
    class_re: Regex,
    method_re: Regex,
}

impl BraceExtractor {
    pub fn new() -> Self {
        Self {
            function_re: Regex::new(r"^\s*(?:export\s+)?function\s+([A-Za-z0-9_]+)\s*\(").unwrap(),
            arrow_re: Regex::new(
                r"^\s*(?:export\s+)?(?:const|let|var)\s+([A-Za-z0-9_]+)\s*=\s*(?:async\s*)?\(?.*?\)?\s*=>",
            )
            .unwrap(),
            class_re: Regex::new(r"^\s*(?:export\s+)?class\s+([A-Za-z0-9_]+)").unwrap(),
            method_re: Regex::new(r"^\s*(?:async\s+)?([A-Za-z0-9_]+)\s*\(").unwrap(),
        }
    }

    pub fn extract(&self, path: &Path, content: &str, context: &ProjectContext) -> Vec<Chunk> {
        let lines: Vec<&str> = content.split('\n').collect();
        let mut chunks = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            if let Some(caps) = self.function_re.captures(line) {
                let end = find_block_end(&lines, i, '{', '}');
                chunks.push(make_chunk(
                    &lines,
                    i,
                    end,
                    ChunkKind::Function,
                    caps[1].to_string(),
                    Vec::new(),
                    "js",
                    path,
                    context,
                ));
                continue;
            }

            if let Some(caps) = self.arrow_re.captures(line) {
                // Expression-bodied arrows have no block to scan
                let end = if line.contains('{') {
                    find_block_end(&lines, i, '{', '}')
                } else {
                    i + 1
                };
                chunks.push(make_chunk(
                    &lines,
                    i,
                    end,
                    ChunkKind::Function,
                    caps[1].to_string(),
                    Vec::new(),
                    "js",
                    path,
                    context,
                ));
                continue;
            }

            if let Some(caps) = self.class_re.captures(line) {
                let end = find_block_end(&lines, i, '{', '}');
                let members = self.method_names(&lines[i..end]);
                chunks.push(make_chunk(
                    &lines,
                    i,
                    end,
                    ChunkKind::Class,
                    caps[1].to_string(),
                    members,
                    "js",
                    path,
                    context,
                ));
            }
        }

        if chunks.is_empty() {
            chunks.push(Chunk::whole_file(
                path,
                content,
                "js".to_string(),
                context.project_name.clone(),
                context.project_relative_path.clone(),
            ));
        }
        chunks
    }

    fn method_names(&self, class_lines: &[&str]) -> Vec<String> {
        class_lines
            .iter()
            .filter_map(|line| self.method_re.captures(line))
            .map(|caps| caps[1].to_string())
            .collect()
    }
}

impl Default for BraceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Heuristic extractor for declaration-style languages (Java, Kotlin).
///
/// Only type declarations are extracted; methods are recorded as members of
/// their enclosing type rather than as independent chunks. Free functions
/// outside a type declaration are not extracted.
pub struct DeclarationExtractor {
    type_re: Regex,
    method_re: Regex,
}

impl DeclarationExtractor {
    pub fn new() -> Self {
        Self {
            type_re: Regex::new(r"^\s*(?:public\s+)?(?:class|interface|enum)\s+([A-Za-z0-9_]+)")
                .unwrap(),
            method_re: Regex::new(
                r"^\s*(?:public|protected|private|static|final|synchronized|\s)+\s*[A-Za-z0-9_<>\[\]]+\s+([A-Za-z0-9_]+)\s*\(",
            )
            .unwrap(),
        }
    }

    pub fn extract(&self, path: &Path, content: &str, context: &ProjectContext) -> Vec<Chunk> {
        let lines: Vec<&str> = content.split('\n').collect();
        let mut chunks = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            if let Some(caps) = self.type_re.captures(line) {
                let end = find_block_end(&lines, i, '{', '}');
                let members = lines[i..end]
                    .iter()
                    .filter_map(|l| self.method_re.captures(l))
                    .map(|caps| caps[1].to_string())
                    .collect();
                chunks.push(make_chunk(
                    &lines,
                    i,
                    end,
                    ChunkKind::Class,
                    caps[1].to_string(),
                    members,
                    "java",
                    path,
                    context,
                ));
            }
        }

        if chunks.is_empty() {
            chunks.push(Chunk::whole_file(
                path,
                content,
                "java".to_string(),
                context.project_name.clone(),
                context.project_relative_path.clone(),
            ));
        }
        chunks
    }
}

impl Default for DeclarationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::too_many_arguments)]
fn make_chunk(
    lines: &[&str],
    start_line: usize,
    end_line: usize,
    kind: ChunkKind,
    name: String,
    members: Vec<String>,
    language: &str,
    path: &Path,
    context: &ProjectContext,
) -> Chunk {
    Chunk {
        text: lines[start_line..end_line.min(lines.len())].join("\n"),
        kind,
        name,
        members,
        start_line,
        end_line,
        language: language.to_string(),
        project_name: context.project_name.clone(),
        project_relative_path: context.project_relative_path.clone(),
        source_path: path.to_string_lossy().to_string(),
    }
}
