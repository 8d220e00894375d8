//! Generation pipeline: the two entry points the UI layer calls.
//!
//! Resume:       build prompt → structured completion → ResumeDocument → resume Markdown
//! Cover letter: build prompt → Markdown completion (returned verbatim)
//!
//! Each call is independent. Nothing is stored between calls; a cover letter
//! that should reference a resume receives it explicitly as `ResumeHighlights`.

use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{build_cover_letter_prompt, build_resume_prompt};
use crate::llm_client::LlmClient;
use crate::models::candidate::GenerationRequest;
use crate::models::resume::ResumeDocument;
use crate::render::markdown::render_resume_markdown;

/// How much of a previously generated resume is carried into a cover letter.
pub const HIGHLIGHTS_MAX_CHARS: usize = 2000;

/// Explicit hand-off from a generated resume to cover-letter generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeHighlights(String);

impl ResumeHighlights {
    /// Takes the first `HIGHLIGHTS_MAX_CHARS` characters of a resume.
    /// Returns `None` for blank input.
    pub fn from_resume_markdown(markdown: &str) -> Option<Self> {
        if markdown.trim().is_empty() {
            return None;
        }
        Some(Self(markdown.chars().take(HIGHLIGHTS_MAX_CHARS).collect()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeGeneration {
    pub markdown: String,
    pub resume: ResumeDocument,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverLetterGeneration {
    pub markdown: String,
}

/// generate-resume(candidate, job, style, existing_resume?)
///
/// `request.prior_context` is the existing resume text, if any.
pub async fn generate_resume(
    llm: &LlmClient,
    request: &GenerationRequest,
) -> Result<ResumeGeneration, AppError> {
    let prompt = build_resume_prompt(
        &request.candidate,
        &request.job,
        &request.style,
        request.prior_context.as_deref(),
    )?;
    info!(
        "Generating resume with {} (prompt {} chars)",
        llm.model(),
        prompt.len()
    );

    let resume: ResumeDocument = llm.complete_structured(&prompt).await?;
    info!(
        "Resume reply parsed: {} experience sections",
        resume.experience_sections.len()
    );

    let markdown = render_resume_markdown(&resume, &request.candidate)?;
    Ok(ResumeGeneration { markdown, resume })
}

/// generate-cover-letter(candidate, job, style, resume_highlights?)
///
/// `request.prior_context` is the resume highlights, if any.
pub async fn generate_cover_letter(
    llm: &LlmClient,
    request: &GenerationRequest,
    temperature: f32,
) -> Result<CoverLetterGeneration, AppError> {
    let prompt = build_cover_letter_prompt(
        &request.candidate,
        &request.job,
        &request.style,
        request.prior_context.as_deref(),
    )?;
    info!(
        "Generating cover letter with {} at temperature {temperature}",
        llm.model()
    );

    let markdown = llm.complete_markdown(&prompt, temperature).await?;
    Ok(CoverLetterGeneration { markdown })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::prompts::RESUME_JSON_KEYS;
    use crate::generation::style::{Layout, Seniority, StyleConfig};
    use crate::llm_client::testing::{client_with, ScriptedBackend};
    use crate::llm_client::LlmError;
    use crate::models::candidate::{CandidateProfile, JobTarget};

    fn jane_request(prior_context: Option<&str>) -> GenerationRequest {
        GenerationRequest {
            candidate: CandidateProfile {
                name: Some("Jane Doe".to_string()),
                title: Some("Data Analyst".to_string()),
                ..Default::default()
            },
            job: JobTarget {
                title: Some("Analyst".to_string()),
                company: Some("Acme".to_string()),
                ..Default::default()
            },
            style: StyleConfig::new("professional", Seniority::Mid, Layout::Modern),
            prior_context: prior_context.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_end_to_end_resume_scenario() {
        let backend = ScriptedBackend::replying(
            r#"{"summary":"x","skills":["SQL"],"experience_sections":[],"education":"","extras":""}"#,
        );
        let llm = client_with(backend.clone());

        let generated = generate_resume(&llm, &jane_request(None)).await.unwrap();
        assert_eq!(generated.resume.summary, "x");
        assert!(generated.markdown.starts_with("# Jane Doe\nData Analyst\n"));
        assert!(generated.markdown.contains("## Skills\n- SQL\n"));

        let prompt = &backend.requests()[0].messages[1].content;
        for needle in ["Jane Doe", "Data Analyst", "Acme"] {
            assert!(prompt.contains(needle));
        }
        for key in RESUME_JSON_KEYS {
            assert!(prompt.contains(key.name));
        }
    }

    #[tokio::test]
    async fn test_resume_with_existing_resume_context() {
        let backend = ScriptedBackend::replying(r#"{"summary":"x"}"#);
        let llm = client_with(backend.clone());

        generate_resume(&llm, &jane_request(Some("Prior resume body")))
            .await
            .unwrap();
        let prompt = &backend.requests()[0].messages[1].content;
        assert!(prompt.contains("Prior resume body"));
    }

    #[tokio::test]
    async fn test_resume_garbage_reply_is_parse_error() {
        let backend = ScriptedBackend::replying("I'm sorry, I can't produce that.");
        let llm = client_with(backend);

        let err = generate_resume(&llm, &jane_request(None)).await.unwrap_err();
        match err {
            AppError::Parse(message) => assert!(message.contains("I'm sorry")),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cover_letter_returns_markdown_verbatim() {
        let letter = "Dear Hiring Manager,\n\nI am excited...\n";
        let backend = ScriptedBackend::replying(letter);
        let llm = client_with(backend.clone());

        let highlights = ResumeHighlights::from_resume_markdown("# Jane Doe\n- Cut costs 20%").unwrap();
        let mut request = jane_request(None);
        request.prior_context = Some(highlights.as_str().to_string());

        let generated = generate_cover_letter(&llm, &request, 0.7).await.unwrap();
        assert_eq!(generated.markdown, letter);

        let sent = &backend.requests()[0];
        assert!((sent.temperature - 0.7).abs() < f32::EPSILON);
        assert!(sent.messages[1].content.contains("- Cut costs 20%"));
    }

    #[tokio::test]
    async fn test_cover_letter_service_failure_propagates() {
        let backend = ScriptedBackend::failing(LlmError::Api {
            status: 500,
            message: "upstream down".to_string(),
        });
        let llm = client_with(backend);

        let err = generate_cover_letter(&llm, &jane_request(None), 0.6)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Service(ref m) if m.contains("upstream down")));
    }

    #[test]
    fn test_highlights_truncate_on_char_boundary() {
        let resume = "é".repeat(HIGHLIGHTS_MAX_CHARS + 10);
        let highlights = ResumeHighlights::from_resume_markdown(&resume).unwrap();
        assert_eq!(highlights.as_str().chars().count(), HIGHLIGHTS_MAX_CHARS);
        assert!(ResumeHighlights::from_resume_markdown("  \n").is_none());
    }
}
