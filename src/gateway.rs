use crate::analyzer::Analyzer;
use crate::error::ModeratorError;
use crate::model::AnalyzeRequest;
use axum::{
    extract::{Json, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

const API_KEY_HEADER: &str = "X-API-Key";

pub struct AppState {
    pub analyzer: Analyzer,
    /// Expected `X-API-Key` value; `None` disables auth.
    pub api_key: Option<String>,
}

pub fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/analyze", post(handle_analyze))
        .route("/api/v1/health", get(handle_health))
        .with_state(state)
}

pub async fn handle_analyze(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<AnalyzeRequest>,
) -> Response {
    if let Some(expected) = &state.api_key {
        let provided = headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok());
        if provided != Some(expected.as_str()) {
            return ModeratorError::InvalidApiKey.into_response();
        }
    }

    let start = Instant::now();
    match state.analyzer.analyze(&req.text).await {
        Ok(result) => {
            info!(
                elapsed = ?start.elapsed(),
                sentiment = ?result.sentiment,
                toxic = result.is_toxic,
                "text analyzed"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

pub async fn handle_health() -> Response {
    (StatusCode::OK, Json(json!({ "status": "healthy" }))).into_response()
}
