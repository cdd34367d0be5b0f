//! Parse-tree extractor for indentation-structured (Python) sources

use std::path::Path;

use tree_sitter::{Node, Parser};

use super::chunk::{Chunk, ChunkKind};
use super::project::ProjectContext;

/// Extract function and class chunks from Python source.
///
/// Walks the parse tree in pre-order: outer definitions come before nested
/// ones, and nested functions/classes each produce their own chunk, so a
/// method chunk textually overlaps its class chunk. A structural parse
/// failure degrades to a single whole-file chunk rather than propagating.
pub fn extract(path: &Path, content: &str, context: &ProjectContext) -> Vec<Chunk> {
    let mut parser = Parser::new();
    if parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .is_err()
    {
        return vec![fallback(path, content, context)];
    }

    let Some(tree) = parser.parse(content, None) else {
        return vec![fallback(path, content, context)];
    };

    let root = tree.root_node();
    if root.has_error() {
        return vec![fallback(path, content, context)];
    }

    let lines: Vec<&str> = content.split('\n').collect();
    let mut chunks = Vec::new();
    walk(root, content, &lines, path, context, &mut chunks);
    chunks
}

fn fallback(path: &Path, content: &str, context: &ProjectContext) -> Chunk {
    Chunk::whole_file(
        path,
        content,
        "py".to_string(),
        context.project_name.clone(),
        context.project_relative_path.clone(),
    )
}

fn walk(
    node: Node,
    source: &str,
    lines: &[&str],
    path: &Path,
    context: &ProjectContext,
    chunks: &mut Vec<Chunk>,
) {
    match node.kind() {
        "function_definition" => {
            if let Some(chunk) = definition_chunk(node, source, lines, path, context, ChunkKind::Function)
            {
                chunks.push(chunk);
            }
        }
        "class_definition" => {
            if let Some(mut chunk) =
                definition_chunk(node, source, lines, path, context, ChunkKind::Class)
            {
                chunk.members = immediate_methods(node, source);
                chunks.push(chunk);
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(child, source, lines, path, context, chunks);
    }
}

fn definition_chunk(
    node: Node,
    source: &str,
    lines: &[&str],
    path: &Path,
    context: &ProjectContext,
    kind: ChunkKind,
) -> Option<Chunk> {
    let name = node
        .child_by_field_name("name")
        .and_then(|n| source.get(n.byte_range()))
        .unwrap_or_default()
        .to_string();

    let start_line = node.start_position().row;
    let end_line = (node.end_position().row + 1).min(lines.len());
    if end_line <= start_line {
        return None;
    }

    Some(Chunk {
        text: lines[start_line..end_line].join("\n"),
        kind,
        name,
        members: Vec::new(),
        start_line,
        end_line,
        language: "py".to_string(),
        project_name: context.project_name.clone(),
        project_relative_path: context.project_relative_path.clone(),
        source_path: path.to_string_lossy().to_string(),
    })
}

/// Names of function definitions that are immediate children of a class body.
///
/// Decorated methods are unwrapped so the method name is recorded, not the
/// decorator.
fn immediate_methods(class_node: Node, source: &str) -> Vec<String> {
    let Some(body) = class_node.child_by_field_name("body") else {
        return Vec::new();
    };

    let mut methods = Vec::new();
    let mut cursor = body.walk();
    for child in body.named_children(&mut cursor) {
        let def = match child.kind() {
            "function_definition" => Some(child),
            "decorated_definition" => child
                .child_by_field_name("definition")
                .filter(|d| d.kind() == "function_definition"),
            _ => None,
        };
        if let Some(def) = def
            && let Some(name) = def
                .child_by_field_name("name")
                .and_then(|n| source.get(n.byte_range()))
        {
            methods.push(name.to_string());
        }
    }
    methods
}
