//! Request / response shapes for the generate-message endpoint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::theme::ThemePalette;

/// Which prompt template and response shape a request uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskType {
    /// First-person fit summary against a job description.
    Match,
    /// Multi-turn question answering about the portfolio owner.
    Qa,
    /// Structured color palette from a free-text aesthetic description.
    Theme,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Match => "match",
            TaskType::Qa => "qa",
            TaskType::Theme => "theme",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "match" => Ok(TaskType::Match),
            "qa" => Ok(TaskType::Qa),
            "theme" => Ok(TaskType::Theme),
            other => Err(AppError::InvalidTaskType(other.to_string())),
        }
    }
}

/// Body posted by the portfolio site. Only the fields relevant to
/// `taskType` are read; the rest are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub task_type: Option<String>,
    pub job_description: Option<String>,
    pub question: Option<String>,
    pub description: Option<String>,
    /// Kept raw: shape problems are decided in `conversation::resolve_history`.
    pub history: Option<serde_json::Value>,
    pub bio: Option<String>,
    pub skills: Option<String>,
}

impl GenerateRequest {
    /// A missing discriminator is reported the same way as an unknown one.
    pub fn task_type(&self) -> Result<TaskType, AppError> {
        self.task_type.as_deref().unwrap_or_default().parse()
    }
}

/// Returns a required text field untouched, or `MissingField` when absent or blank.
pub fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str, AppError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(AppError::MissingField(name))
}

/// Successful response body: `{"message": ...}` or `{"colors": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GenerationResult {
    Message { message: String },
    Theme { colors: ThemePalette },
}
