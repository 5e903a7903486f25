//! Knowledge base: the grounding text every prompt is built from.
//!
//! Composed per request from the bundled resume artifact plus the bio and
//! skills strings the website sends along. Nothing here is cached.

pub mod loader;

pub use loader::{FileResumeLoader, ResumeLoader};

const KNOWLEDGE_BASE_TEMPLATE: &str = "\
My Resume:
---
{resume}
---
My Bio from my website:
---
{bio}
---
My skills from my website:
---
{skills}
---";

/// Resume, bio and skills for a single request.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    resume: String,
    bio: String,
    skills: String,
}

impl KnowledgeBase {
    /// Absent bio/skills render as empty sections.
    pub fn new(resume: String, bio: Option<&str>, skills: Option<&str>) -> Self {
        Self {
            resume: resume.trim().to_string(),
            bio: bio.unwrap_or_default().trim().to_string(),
            skills: skills.unwrap_or_default().trim().to_string(),
        }
    }

    /// Loads the resume through `loader` and combines it with the request fields.
    pub async fn assemble(
        loader: &dyn ResumeLoader,
        bio: Option<&str>,
        skills: Option<&str>,
    ) -> Result<Self, crate::errors::AppError> {
        let resume = loader.load().await?;
        Ok(Self::new(resume, bio, skills))
    }

    /// The single context block embedded in prompts.
    pub fn render(&self) -> String {
        crate::llm_client::prompts::render(
            KNOWLEDGE_BASE_TEMPLATE,
            &[
                ("resume", self.resume.as_str()),
                ("bio", self.bio.as_str()),
                ("skills", self.skills.as_str()),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_all_sections_in_order() {
        let kb = KnowledgeBase::new(
            "BYU, B.S. Computer Science, expected 2026".to_string(),
            Some("I build things."),
            Some("Rust, TypeScript"),
        );
        let text = kb.render();
        let resume_at = text.find("BYU, B.S. Computer Science").unwrap();
        let bio_at = text.find("I build things.").unwrap();
        let skills_at = text.find("Rust, TypeScript").unwrap();
        assert!(resume_at < bio_at && bio_at < skills_at);
        assert!(text.starts_with("My Resume:"));
    }

    #[test]
    fn test_missing_bio_and_skills_render_empty() {
        let text = KnowledgeBase::new("resume".to_string(), None, None).render();
        assert!(!text.contains("undefined"));
        assert!(text.contains("My Bio from my website:\n---\n\n---"));
        assert!(text.contains("My skills from my website:\n---\n\n---"));
    }
}
