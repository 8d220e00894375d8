use serde::{Deserialize, Serialize};

use crate::generation::style::StyleConfig;

/// Candidate fields as collected by the form. No validation beyond presence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateProfile {
    pub name: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
}

impl CandidateProfile {
    /// The candidate's name when it is present and not blank.
    pub fn display_name(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }

    /// Location, email, phone and profile links joined into a single contact line.
    pub fn contact_line(&self) -> String {
        [
            &self.location,
            &self.email,
            &self.phone,
            &self.linkedin,
            &self.portfolio,
        ]
        .into_iter()
        .filter_map(|field| non_blank(field.as_deref()))
        .collect::<Vec<_>>()
        .join(" | ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobTarget {
    pub title: Option<String>,
    pub company: Option<String>,
    pub summary: Option<String>,
    pub requirements: Option<String>,
}

/// Everything one generation call needs. Built per request, never persisted.
///
/// `prior_context` is the existing resume text for resume generation, or the
/// resume highlights for cover-letter generation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerationRequest {
    #[serde(default)]
    pub candidate: CandidateProfile,
    #[serde(default)]
    pub job: JobTarget,
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub prior_context: Option<String>,
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_candidate_deserializes_with_missing_fields() {
        let cand: CandidateProfile =
            serde_json::from_str(r#"{"name": "Jane Doe", "title": "Data Analyst"}"#).unwrap();
        assert_eq!(cand.name.as_deref(), Some("Jane Doe"));
        assert!(cand.email.is_none());
        assert!(cand.skills.is_none());
    }

    #[test]
    fn test_contact_line_skips_blank_fields() {
        let cand = CandidateProfile {
            location: Some("Aurora, IL".to_string()),
            email: Some("  ".to_string()),
            phone: Some("+1 555 123 4567".to_string()),
            ..Default::default()
        };
        assert_eq!(cand.contact_line(), "Aurora, IL | +1 555 123 4567");
    }

    #[test]
    fn test_display_name_ignores_whitespace() {
        let cand = CandidateProfile {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(cand.display_name(), None);
    }
}
