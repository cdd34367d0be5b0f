use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};

use codebase_intel::config::Config;
use codebase_intel::index::{ChunkIndex, JsonlIndex};
use codebase_intel::ingest::{RepositoryLoader, SemanticSplitter, distinct_files};
use codebase_intel::server;

#[derive(Parser)]
#[command(
    name = "codebase-intel",
    version,
    long_version = concat!(
        env!("CARGO_PKG_VERSION"),
        " (",
        env!("GIT_COMMIT_HASH"),
        ", built ",
        env!("BUILD_TIMESTAMP"),
        ")"
    ),
    about = "Code-aware repository ingestion and chunking for RAG pipelines"
)]
struct Cli {
    /// Path to a TOML config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk a repository and write its chunks to the index
    Ingest {
        /// Repository root to ingest
        path: PathBuf,

        /// Restrict to these extensions (lowercase, no dot); repeatable
        #[arg(long = "ext")]
        extensions: Vec<String>,

        /// Skip the size-bounding splitter pass
        #[arg(long)]
        no_split: bool,
    },

    /// Start the HTTP API server
    Serve {
        /// Override the configured bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured bind port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Show index statistics
    Stats,

    /// Remove all records from the index
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_or_default()?,
    };

    let index = Arc::new(JsonlIndex::new(&config.index.jsonl_path));

    match cli.command {
        Commands::Ingest {
            path,
            extensions,
            no_split,
        } => {
            let started = Instant::now();
            let extensions = if extensions.is_empty() {
                None
            } else {
                Some(extensions)
            };

            let loader = RepositoryLoader::new(&path)
                .with_extensions(extensions)
                .with_max_file_size(config.ingestion.max_file_size);
            let records = tokio::task::spawn_blocking(move || loader.load_repository()).await??;

            let files = distinct_files(&records);
            let chunks = records.len();

            let records = if no_split {
                records
            } else {
                let splitter = SemanticSplitter::new(
                    config.splitter.chunk_size,
                    config.splitter.chunk_overlap,
                )?;
                splitter.split_records(records)
            };

            let written = index.add_records(&records).await?;
            println!(
                "Ingested {} files: {} chunks, {} records written in {} ms",
                files,
                chunks,
                written,
                started.elapsed().as_millis()
            );
        }

        Commands::Serve { host, port } => {
            let mut config = config;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;
            server::run_server(config, index).await?;
        }

        Commands::Stats => {
            let stats = index.stats().await?;
            println!("Index: {}", config.index.jsonl_path.display());
            println!("Records: {}", stats.total_records);
            for (language, count) in &stats.language_breakdown {
                println!("  {:<10} {}", language, count);
            }
        }

        Commands::Clear => {
            index.clear().await?;
            println!("Index cleared: {}", config.index.jsonl_path.display());
        }
    }

    Ok(())
}
