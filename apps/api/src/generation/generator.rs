//! Task dispatch: builds the outbound payload for a task, calls the model,
//! and reshapes the reply.

use tracing::info;

use crate::context::KnowledgeBase;
use crate::errors::AppError;
use crate::generation::conversation::resolve_history;
use crate::generation::models::{required, GenerateRequest, GenerationResult, TaskType};
use crate::generation::prompts::{
    MATCH_PROMPT_TEMPLATE, QA_FALLBACK, QA_SYSTEM_TEMPLATE, THEME_PROMPT_TEMPLATE,
};
use crate::generation::theme::{
    self, BALL_PALETTE_KEY, BALL_PALETTE_LEN, COLOR_KEYS, HEX_COLOR_FORMAT,
};
use crate::llm_client::prompts::{render, INJECTION_GUARD};
use crate::llm_client::{Content, GenerateContentRequest, GenerationConfig, LlmClient};

/// Builds the `generateContent` payload for `task`. No I/O.
pub fn build_request(
    task: TaskType,
    request: &GenerateRequest,
    knowledge: &KnowledgeBase,
    owner: &str,
) -> Result<GenerateContentRequest, AppError> {
    match task {
        TaskType::Match => {
            let job_description =
                required(request.job_description.as_deref(), "jobDescription")?;
            let context = knowledge.render();
            let prompt = render(
                MATCH_PROMPT_TEMPLATE,
                &[
                    ("owner", owner),
                    ("context", context.as_str()),
                    ("job_description", job_description),
                    ("injection_guard", INJECTION_GUARD),
                ],
            );
            Ok(GenerateContentRequest::single_turn(prompt))
        }
        TaskType::Qa => {
            let contents = resolve_history(request.history.as_ref(), request.question.as_deref())?;
            let context = knowledge.render();
            let system = render(
                QA_SYSTEM_TEMPLATE,
                &[
                    ("owner", owner),
                    ("context", context.as_str()),
                    ("fallback", QA_FALLBACK),
                    ("injection_guard", INJECTION_GUARD),
                ],
            );
            Ok(GenerateContentRequest {
                contents,
                system_instruction: Some(Content::instruction(system)),
                generation_config: None,
            })
        }
        TaskType::Theme => {
            let description = required(request.description.as_deref(), "description")?;
            let color_keys = COLOR_KEYS
                .iter()
                .map(|k| format!("- \"{k}\""))
                .collect::<Vec<_>>()
                .join("\n");
            let palette_len = BALL_PALETTE_LEN.to_string();
            let prompt = render(
                THEME_PROMPT_TEMPLATE,
                &[
                    ("description", description),
                    ("color_keys", color_keys.as_str()),
                    ("color_format", HEX_COLOR_FORMAT),
                    ("palette_key", BALL_PALETTE_KEY),
                    ("palette_len", palette_len.as_str()),
                    ("injection_guard", INJECTION_GUARD),
                ],
            );
            Ok(GenerateContentRequest {
                generation_config: Some(GenerationConfig::json(theme::response_schema())),
                ..GenerateContentRequest::single_turn(prompt)
            })
        }
    }
}

/// Runs one task end to end: one upstream call, no retries.
pub async fn run_task(
    llm: &LlmClient,
    task: TaskType,
    request: &GenerateRequest,
    knowledge: &KnowledgeBase,
    owner: &str,
) -> Result<GenerationResult, AppError> {
    let payload = build_request(task, request, knowledge, owner)?;
    let text = llm.generate(&payload).await?;

    let result = match task {
        TaskType::Theme => GenerationResult::Theme {
            colors: theme::decode_palette(&text)?,
        },
        TaskType::Match | TaskType::Qa => GenerationResult::Message { message: text },
    };
    info!(task_type = %task, "Generation succeeded");
    Ok(result)
}
