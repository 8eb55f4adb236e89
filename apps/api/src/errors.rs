use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::real_estate::analysis::AnalysisError;
use crate::real_estate::metrics::MetricsError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Invalid investment inputs: {0}")]
    Metrics(#[from] MetricsError),

    /// Upstream text-generation failure. `user_message` is shown to the
    /// client; `detail` is only logged.
    #[error("LLM error: {detail}")]
    Llm {
        user_message: &'static str,
        detail: String,
    },

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn llm(user_message: &'static str, detail: impl ToString) -> Self {
        AppError::Llm {
            user_message,
            detail: detail.to_string(),
        }
    }
}

impl From<AnalysisError> for AppError {
    fn from(e: AnalysisError) -> Self {
        match e {
            AnalysisError::EmptyQuery => AppError::Validation("query cannot be empty".to_string()),
            other => AppError::llm("AI analysis failed. Please try again shortly.", other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Metrics(e) => (StatusCode::BAD_REQUEST, e.code(), e.to_string()),
            AppError::Llm {
                user_message,
                detail,
            } => {
                tracing::error!("LLM error: {detail}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    user_message.to_string(),
                )
            }
            AppError::Store(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::body_json;

    #[tokio::test]
    async fn test_metrics_error_maps_to_bad_request_with_code() {
        let resp = AppError::from(MetricsError::NonPositivePrice).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["error"]["code"], "NON_POSITIVE_PRICE");
        assert_eq!(body["error"]["message"], "price must be greater than zero");
    }

    #[tokio::test]
    async fn test_llm_error_hides_detail() {
        let resp = AppError::llm("Failed to summarize content.", "status 500: boom").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(resp).await;
        assert_eq!(body["error"]["code"], "LLM_ERROR");
        assert_eq!(body["error"]["message"], "Failed to summarize content.");
    }

    #[tokio::test]
    async fn test_empty_analysis_query_is_validation_error() {
        let resp = AppError::from(AnalysisError::EmptyQuery).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
