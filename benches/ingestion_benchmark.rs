use std::path::Path;
use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use codebase_intel::index::{ChunkIndex, JsonlIndex};
use codebase_intel::ingest::{CodeParser, RepositoryLoader, SemanticSplitter};

fn python_module(functions: usize) -> String {
    let mut source = String::from("\"\"\"Generated module.\"\"\"\n\n");
    for i in 0..functions {
        source.push_str(&format!(
            "def handler_{i}(payload):\n    value = payload.get(\"key_{i}\")\n    return value or {i}\n\n\n"
        ));
    }
    source.push_str("class Registry:\n");
    for i in 0..functions {
        source.push_str(&format!(
            "    def lookup_{i}(self):\n        return handler_{i}(self.payload)\n\n"
        ));
    }
    source
}

fn js_module(functions: usize) -> String {
    let mut source = String::new();
    for i in 0..functions {
        source.push_str(&format!(
            "export function handler{i}(payload) {{\n  const value = payload[\"key{i}\"];\n  return value || {i};\n}}\n\n"
        ));
    }
    source
}

fn bench_parsers(c: &mut Criterion) {
    let parser = CodeParser::new();
    let py = python_module(40);
    let js = js_module(40);

    c.bench_function("parse_python_module", |b| {
        b.iter(|| {
            black_box(parser.parse_file(
                Path::new("/repo/generated.py"),
                black_box(&py),
                None,
            ))
        })
    });

    c.bench_function("parse_js_module", |b| {
        b.iter(|| {
            black_box(parser.parse_file(
                Path::new("/repo/generated.js"),
                black_box(&js),
                None,
            ))
        })
    });
}

fn bench_splitter(c: &mut Criterion) {
    let splitter = SemanticSplitter::default_budget();
    let text = python_module(200);

    c.bench_function("split_large_text", |b| {
        b.iter(|| black_box(splitter.split_text(black_box(&text))))
    });
}

fn bench_repository_walk(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("tempdir");
    for i in 0..20 {
        std::fs::write(dir.path().join(format!("mod_{i}.py")), python_module(10))
            .expect("write fixture");
        std::fs::write(dir.path().join(format!("mod_{i}.js")), js_module(10))
            .expect("write fixture");
    }

    c.bench_function("walk_small_repository", |b| {
        b.iter(|| {
            let loader = RepositoryLoader::new(dir.path());
            black_box(loader.load_repository().expect("walk"))
        })
    });
}

fn bench_index_append(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("runtime");

    let repo = tempfile::tempdir().expect("tempdir");
    std::fs::write(repo.path().join("mod.py"), python_module(20)).expect("write fixture");
    let records = RepositoryLoader::new(repo.path())
        .load_repository()
        .expect("walk");

    let index_dir = tempfile::tempdir().expect("tempdir");
    let index = Arc::new(JsonlIndex::new(index_dir.path().join("bench.jsonl")));

    c.bench_function("index_append_records", |b| {
        b.to_async(&rt).iter(|| {
            let index = index.clone();
            let records = records.clone();
            async move { black_box(index.add_records(&records).await.expect("append")) }
        })
    });
}

criterion_group!(
    benches,
    bench_parsers,
    bench_splitter,
    bench_repository_walk,
    bench_index_append
);
criterion_main!(benches);
