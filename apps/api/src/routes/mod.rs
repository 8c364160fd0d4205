pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::analysis::handlers;
use crate::state::AppState;

/// Multipart uploads carry whole PDFs; axum's 2 MB default is too small.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/analyze-resume", post(handlers::handle_analyze_resume))
        .route("/health", get(health::health_handler))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Endpoint not found" })),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// End-to-end tests: real router, mock collaborators
// ────────────────────────────────────────────────────────────────────────────
