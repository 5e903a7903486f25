use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Bundled with the crate, so the default does not depend on the working directory.
/// Deployments that ship the binary without the source tree set `RESUME_PATH`.
const DEFAULT_RESUME_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/resume.txt");
const DEFAULT_PORTFOLIO_OWNER: &str = "John Everett";

/// Application configuration loaded from environment variables.
/// Read once at startup and treated as immutable afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Missing key is not a startup failure: every generation request fails instead.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub gemini_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub resume_path: PathBuf,
    pub portfolio_owner: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_model: optional_env("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: optional_env("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            gemini_timeout_secs: parse_env("GEMINI_TIMEOUT_SECS", 60)?,
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 90)?,
            resume_path: resume_path(optional_env("RESUME_PATH")),
            portfolio_owner: optional_env("PORTFOLIO_OWNER")
                .unwrap_or_else(|| DEFAULT_PORTFOLIO_OWNER.to_string()),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn resume_path(configured: Option<String>) -> PathBuf {
    configured
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_RESUME_PATH))
}

/// Returns the variable's value, treating an empty or whitespace-only value as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable names; env vars are process-global.

    #[test]
    fn test_optional_env_treats_blank_as_unset() {
        std::env::set_var("FOLIO_TEST_BLANK", "   ");
        assert_eq!(optional_env("FOLIO_TEST_BLANK"), None);
    }

    #[test]
    fn test_optional_env_trims_value() {
        std::env::set_var("FOLIO_TEST_TRIMMED", "  secret  ");
        assert_eq!(optional_env("FOLIO_TEST_TRIMMED").as_deref(), Some("secret"));
    }

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u64 = parse_env("FOLIO_TEST_UNSET_NUMBER", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_default_resume_path_is_anchored_to_the_crate() {
        let path = resume_path(None);
        assert!(path.is_absolute());
        assert!(path.ends_with("assets/resume.txt"));
        assert!(path.is_file(), "{} is missing", path.display());
    }

    #[test]
    fn test_configured_resume_path_is_used_as_given() {
        assert_eq!(
            resume_path(Some("/srv/folio/resume.pdf".to_string())),
            PathBuf::from("/srv/folio/resume.pdf")
        );
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("FOLIO_TEST_BAD_PORT", "eighty");
        let err = parse_env::<u16>("FOLIO_TEST_BAD_PORT", 8080).unwrap_err();
        assert!(err.to_string().contains("FOLIO_TEST_BAD_PORT"));
    }
}
