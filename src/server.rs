//! HTTP API for the ingestion pipeline
//!
//! Thin pass-through over the library: no business logic lives here.
//!
//! | Method | Path      | Description                              |
//! |--------|-----------|------------------------------------------|
//! | `GET`  | `/health` | Health check (returns version)           |
//! | `GET`  | `/status` | Index statistics                         |
//! | `POST` | `/ingest` | Walk a repository and index its chunks   |

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;

use crate::config::Config;
use crate::index::ChunkIndex;
use crate::ingest::{RepositoryLoader, SemanticSplitter, distinct_files};
use crate::types::{HealthResponse, IngestRequest, IngestResponse, StatusResponse};

/// Shared state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    index: Arc<dyn ChunkIndex>,
}

impl AppState {
    pub fn new(config: Config, index: Arc<dyn ChunkIndex>) -> Self {
        Self {
            config: Arc::new(config),
            index,
        }
    }
}

/// Error contract: `{"error": "..."}` with a matching status code
#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Build the router; exposed separately so tests can drive it in-process.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/status", get(status))
        .route("/ingest", post(ingest))
        .with_state(state)
}

/// Start the HTTP server and serve until the process is terminated.
pub async fn run_server(config: Config, index: Arc<dyn ChunkIndex>) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = router(AppState::new(config, index));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

async fn status(State(state): State<AppState>) -> Result<Json<StatusResponse>, ApiError> {
    let stats = state
        .index
        .stats()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(StatusResponse {
        index_path: state.config.index.jsonl_path.display().to_string(),
        total_records: stats.total_records,
        language_breakdown: stats.language_breakdown,
    }))
}

async fn ingest(
    State(state): State<AppState>,
    Json(request): Json<IngestRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
    if request.path.trim().is_empty() {
        return Err(ApiError::BadRequest("path must not be empty".to_string()));
    }

    let started = Instant::now();
    let config = state.config.clone();
    let extensions = if request.extensions.is_empty() {
        None
    } else {
        Some(request.extensions.clone())
    };
    let path = request.path.clone();

    // The walk is synchronous by design; keep it off the async workers
    let records = tokio::task::spawn_blocking(move || {
        RepositoryLoader::new(&path)
            .with_extensions(extensions)
            .with_max_file_size(config.ingestion.max_file_size)
            .load_repository()
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let chunks_created = records.len();
    let files_ingested = distinct_files(&records);

    let records = if request.split {
        let splitter = SemanticSplitter::new(
            state.config.splitter.chunk_size,
            state.config.splitter.chunk_overlap,
        )
        .map_err(|e| ApiError::Internal(e.to_string()))?;
        splitter.split_records(records)
    } else {
        records
    };

    let records_written = state
        .index
        .add_records(&records)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(IngestResponse {
        files_ingested,
        chunks_created,
        records_written,
        duration_ms: started.elapsed().as_millis() as u64,
    }))
}
