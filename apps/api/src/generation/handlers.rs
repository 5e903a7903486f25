//! Axum route handler for the generate-message endpoint.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use tracing::{field, info_span, warn, Instrument, Span};
use uuid::Uuid;

use crate::context::KnowledgeBase;
use crate::errors::AppError;
use crate::generation::generator::run_task;
use crate::generation::models::{GenerateRequest, GenerationResult};
use crate::state::AppState;

/// POST /api/generate-message
///
/// Body is taken as raw bytes so a malformed payload maps to the same
/// `{"error": ...}` 500 as every other failure, not axum's JSON rejection.
/// Other methods never reach this handler; the router answers them with 405.
///
/// The span opens before the body is parsed and the response (including the
/// error log in `AppError::into_response`) is built inside it, so every line
/// for a request carries its `request_id`.
pub async fn handle_generate_message(State(state): State<AppState>, body: Bytes) -> Response {
    let span = info_span!(
        "generate_message",
        request_id = %Uuid::new_v4(),
        task_type = field::Empty,
    );

    async move { generate(&state, &body).await.map(Json).into_response() }
        .instrument(span)
        .await
}

async fn generate(state: &AppState, body: &[u8]) -> Result<GenerationResult, AppError> {
    let request: GenerateRequest = serde_json::from_slice(body).map_err(AppError::InvalidBody)?;
    Span::current().record(
        "task_type",
        request.task_type.as_deref().unwrap_or("<missing>"),
    );

    let knowledge = KnowledgeBase::assemble(
        state.resume.as_ref(),
        request.bio.as_deref(),
        request.skills.as_deref(),
    )
    .await?;

    if !state.llm.has_api_key() {
        warn!("Rejecting request: no Gemini API key configured");
        return Err(AppError::MissingApiKey);
    }

    let task = request.task_type()?;
    run_task(
        &state.llm,
        task,
        &request,
        &knowledge,
        &state.config.portfolio_owner,
    )
    .await
}
