use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders as `500 {"error": "<message>"}`. Caller mistakes
/// (bad JSON, unknown task type) deliberately share that status for now.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request body: {0}")]
    InvalidBody(#[source] serde_json::Error),

    #[error("Invalid task type specified.")]
    InvalidTaskType(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid conversation history: {0}")]
    InvalidHistory(String),

    #[error("GEMINI_API_KEY not found in environment variables.")]
    MissingApiKey,

    #[error("Failed to load knowledge base: {0}")]
    KnowledgeBase(String),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Generated theme does not match the color schema: {0}")]
    UpstreamSchemaViolation(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match &self {
            AppError::InvalidTaskType(value) => {
                tracing::error!(task_type = %value, "Request failed: {message}");
            }
            _ => tracing::error!("Request failed: {message}"),
        }

        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_upstream_message_is_passed_through_verbatim() {
        let err = AppError::from(LlmError::Api {
            status: 429,
            message: "Resource has been exhausted".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Resource has been exhausted" })
        );
    }

    #[tokio::test]
    async fn test_invalid_task_type_is_500() {
        let response = AppError::InvalidTaskType("poem".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Invalid task type specified." })
        );
    }

    #[test]
    fn test_missing_field_names_the_field() {
        assert_eq!(
            AppError::MissingField("jobDescription").to_string(),
            "Missing required field: jobDescription"
        );
    }
}
