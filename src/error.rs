use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub type Result<T> = std::result::Result<T, ModeratorError>;

#[derive(Error, Debug)]
pub enum ModeratorError {
    #[error("invalid API key")]
    InvalidApiKey,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("model load failed: {0}")]
    ModelLoad(String),

    #[error("download failed: {0}")]
    Download(String),

    #[error("tokenization failed: {0}")]
    Tokenization(String),

    #[error("inference failed: {0}")]
    Inference(String),

    // Pass-through from dependencies
    #[error(transparent)]
    Candle(#[from] candle_core::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl IntoResponse for ModeratorError {
    fn into_response(self) -> Response {
        match self {
            ModeratorError::InvalidApiKey => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "detail": "Invalid API key" })),
            )
                .into_response(),
            err => {
                // Full cause stays in the logs; the client gets a generic message.
                error!("analysis failed: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Analysis failed" })),
                )
                    .into_response()
            }
        }
    }
}
