//! Export: Markdown and .docx downloads named after the candidate.

pub mod filename;
pub mod handlers;

use serde::Deserialize;

/// What is being exported; drives file names and document titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Resume,
    CoverLetter,
}

impl DocumentKind {
    /// Appended to the sanitized display name: `Jane_Doe_resume.md`.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            DocumentKind::Resume => "resume",
            DocumentKind::CoverLetter => "cover_letter",
        }
    }

    /// Used in place of a missing display name.
    pub fn fallback_name(&self) -> &'static str {
        match self {
            DocumentKind::Resume => "resume",
            DocumentKind::CoverLetter => "candidate",
        }
    }

    pub fn title_label(&self) -> &'static str {
        match self {
            DocumentKind::Resume => "Resume",
            DocumentKind::CoverLetter => "Cover Letter",
        }
    }
}
