use std::sync::Arc;

use crate::config::Config;
use crate::context::ResumeLoader;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; nothing request-specific is ever stored here.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Pluggable resume source. Default: `FileResumeLoader` over `RESUME_PATH`.
    pub resume: Arc<dyn ResumeLoader>,
    pub config: Arc<Config>,
}
