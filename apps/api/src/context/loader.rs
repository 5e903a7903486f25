//! Resume artifact loading.
//!
//! `AppState` holds an `Arc<dyn ResumeLoader>`; production uses
//! `FileResumeLoader`, tests swap in an in-memory loader.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Source of the resume text. Failures are fatal to the request.
#[async_trait]
pub trait ResumeLoader: Send + Sync {
    async fn load(&self) -> Result<String, AppError>;
}

/// Reads the resume from disk on every call.
/// PDFs (detected by magic bytes) go through text extraction; anything else must be UTF-8.
pub struct FileResumeLoader {
    path: PathBuf,
}

impl FileResumeLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ResumeLoader for FileResumeLoader {
    async fn load(&self) -> Result<String, AppError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| AppError::KnowledgeBase(format!("{}: {e}", self.path.display())))?;

        let text = if bytes.starts_with(PDF_MAGIC) {
            extract_pdf_text(bytes).await?
        } else {
            String::from_utf8(bytes).map_err(|_| {
                AppError::KnowledgeBase(format!("{} is not valid UTF-8", self.path.display()))
            })?
        };

        if text.trim().is_empty() {
            warn!(path = %self.path.display(), "Resume artifact contains no text");
        }
        debug!(path = %self.path.display(), chars = text.len(), "Resume loaded");
        Ok(text)
    }
}

/// PDF extraction is CPU-bound; keep it off the async workers.
/// The extractor can panic on malformed input, so a failed join counts as a corrupt artifact.
async fn extract_pdf_text(bytes: Vec<u8>) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| AppError::KnowledgeBase(format!("PDF text extraction aborted: {e}")))?
        .map_err(|e| AppError::KnowledgeBase(format!("could not extract text from PDF: {e}")))
}
