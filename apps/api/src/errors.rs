#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::llm_client::ModelCallError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The response bodies here are contractual: clients key off `error` on 400s
/// and `success: false` on 500s.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Model call error: {0}")]
    Model(#[from] ModelCallError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            AppError::Extraction(ExtractionError::EmptyText) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Could not extract text from PDF" })),
            )
                .into_response(),
            AppError::Extraction(e) => {
                tracing::error!("extraction failed: {e}");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": format!("PDF processing error: {e}") })),
                )
                    .into_response()
            }
            AppError::Model(e) => {
                tracing::error!("analysis stage failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": format!("Analysis error: {e}"),
                        "success": false
                    })),
                )
                    .into_response()
            }
            AppError::Internal(e) => {
                tracing::error!("internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Internal server error",
                        "success": false
                    })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_maps_to_400_with_error_body() {
        let response = AppError::Validation("No resume file provided".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body, json!({ "error": "No resume file provided" }));
    }

    #[tokio::test]
    async fn empty_text_maps_to_contractual_message() {
        let response = AppError::Extraction(ExtractionError::EmptyText).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Could not extract text from PDF");
    }

    #[tokio::test]
    async fn model_error_maps_to_500_with_success_false() {
        let response = AppError::Model(ModelCallError::EmptyReply).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["success"], json!(false));
        assert!(body["error"].as_str().unwrap().starts_with("Analysis error:"));
        assert!(body.get("data").is_none());
    }
}
