//! HTTP API.
//!
//! Endpoints:
//!   GET  /analyze?algo=&n=&steps=   → time an algorithm and render its curve
//!   POST /save_analysis             → persist a report verbatim
//!   GET  /retrieve_analysis?id=     → one stored record
//!   GET  /all_analyses              → every stored record, oldest first
//!   GET  /health                    → liveness check
//!   GET  /metrics                   → Prometheus text exposition

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};

use bigo_algo::Registry;
use bigo_plot::CurveRenderer;
use bigo_table::{AnalysisRecord, AnalysisStore};

use crate::analysis::{self, AnalysisReport};
use crate::error::ApiError;
use crate::metrics::OperationMetrics;
use crate::validation::{self, AnalyzeQuery};

// ── Shared state ──────────────────────────────────────────────────────────────

/// Everything a handler needs. Cheap to clone; all heavy parts are shared.
#[derive(Clone)]
pub struct AppState {
    pub registry:  Arc<Registry>,
    pub store:     Arc<dyn AnalysisStore>,
    pub renderer:  CurveRenderer,
    pub metrics:   Arc<OperationMetrics>,
    /// Largest `n` accepted by `/analyze` (0 = unbounded).
    pub max_items: usize,
}

impl AppState {
    pub fn new(registry: Registry, store: Arc<dyn AnalysisStore>, renderer: CurveRenderer) -> Self {
        Self {
            registry:  Arc::new(registry),
            store,
            renderer,
            metrics:   Arc::new(OperationMetrics::new()),
            max_items: 0,
        }
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/analyze", get(analyze))
        .route("/save_analysis", post(save_analysis))
        .route("/retrieve_analysis", get(retrieve_analysis))
        .route("/all_analyses", get(all_analyses))
        .route("/health", get(health))
        .route("/metrics", get(prometheus_metrics))
        .layer(middleware::from_fn_with_state(state.clone(), count_errors))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `addr` and serves until SIGINT.
pub async fn serve(state: AppState, addr: SocketAddr, max_body_bytes: usize) -> anyhow::Result<()> {
    let app = router(state, max_body_bytes);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, "bigo HTTP API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("received SIGINT, shutting down gracefully");
            }
        })
        .await?;
    Ok(())
}

async fn count_errors(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    let status = response.status();
    if status.is_client_error() {
        state.metrics.inc(&state.metrics.client_error_count);
    } else if status.is_server_error() {
        state.metrics.inc(&state.metrics.server_error_count);
    }
    response
}

/// Runs synchronous work (SQLite behind a mutex, plotting) on the blocking
/// pool so it never holds an async worker.
async fn blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ApiError::Internal(format!("blocking task failed: {e}")))?
}

// ── Handlers ──────────────────────────────────────────────────────────────────

// GET /analyze
async fn analyze(
    State(state): State<AppState>,
    Query(query): Query<AnalyzeQuery>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let started = Instant::now();

    let params = validation::analyze_params(&query, state.max_items)?;
    let algorithm = *state.registry.get(&params.algo)?;
    let renderer = state.renderer;

    let report = blocking(move || {
        Ok(analysis::run(&algorithm, params.items, params.steps, &renderer)?)
    })
    .await?
    .report;

    let elapsed_us = started.elapsed().as_micros() as u64;
    state.metrics.record(&state.metrics.analyze_count, &state.metrics.analyze_latency_us, elapsed_us);
    debug!(
        algo          = %report.algo,
        items         = report.items,
        total_time_ms = report.total_time_ms,
        elapsed_us,
        "analyze served"
    );

    Ok(Json(report))
}

// POST /save_analysis
async fn save_analysis(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let started = Instant::now();

    let new = validation::save_body(&body)?;
    let algorithm = new.algorithm.clone();
    let store = Arc::clone(&state.store);
    let id = blocking(move || Ok(store.insert(&new)?)).await?;

    let elapsed_us = started.elapsed().as_micros() as u64;
    state.metrics.record(&state.metrics.save_count, &state.metrics.save_latency_us, elapsed_us);
    debug!(id, algorithm = %algorithm, "analysis saved");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status":  "success",
            "message": "Analysis saved successfully",
            "id":      id,
        })),
    ))
}

// GET /retrieve_analysis
#[derive(Debug, Deserialize)]
struct RetrieveQuery {
    id: Option<String>,
}

async fn retrieve_analysis(
    State(state): State<AppState>,
    Query(query): Query<RetrieveQuery>,
) -> Result<Json<AnalysisRecord>, ApiError> {
    let id = validation::record_id(query.id.as_deref())?;

    let store = Arc::clone(&state.store);
    match blocking(move || Ok(store.get(id)?)).await? {
        Some(record) => {
            state.metrics.inc(&state.metrics.retrieve_count);
            Ok(Json(record))
        }
        None => Err(ApiError::NotFound(format!("No analysis found with id {id}"))),
    }
}

// GET /all_analyses
async fn all_analyses(State(state): State<AppState>) -> Result<Json<Vec<AnalysisRecord>>, ApiError> {
    let store = Arc::clone(&state.store);
    let records = blocking(move || Ok(store.list()?)).await?;
    state.metrics.inc(&state.metrics.list_count);
    debug!(count = records.len(), "listing analyses");
    Ok(Json(records))
}

// GET /health
async fn health(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let analyses = stored_count(&state).await?;
    Ok(Json(serde_json::json!({
        "status":   "ok",
        "version":  env!("CARGO_PKG_VERSION"),
        "analyses": analyses,
    })))
}

// GET /metrics
async fn prometheus_metrics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let body = state.metrics.to_prometheus(stored_count(&state).await?);
    Ok((
        [(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    ))
}

async fn stored_count(state: &AppState) -> Result<usize, ApiError> {
    let store = Arc::clone(&state.store);
    blocking(move || Ok(store.count()?)).await
}
