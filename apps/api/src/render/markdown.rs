//! Renders a parsed `ResumeDocument` into Markdown through the resume template.
//!
//! Only `#`, `##` and `- ` markers are used so the output maps cleanly onto
//! the document renderer's rule set.

use serde::Serialize;

use crate::models::candidate::{non_blank, CandidateProfile};
use crate::models::resume::{value_lines, ResumeDocument};
use crate::render::template::{render_template, TemplateError};

pub const RESUME_MARKDOWN_TEMPLATE: &str = r#"# {{ name }}
{% if title %}{{ title }}
{% endif %}{% if contact %}{{ contact }}
{% endif %}{% if summary %}
## Summary
{{ summary }}
{% endif %}{% if skills %}
## Skills
{% for skill in skills %}- {{ skill }}
{% endfor %}{% endif %}{% if experience %}
## Experience
{% for section in experience %}{{ section.heading }}
{% for bullet in section.bullets %}- {{ bullet }}
{% endfor %}{% endfor %}{% endif %}{% if projects %}
## Projects
{% for project in projects %}- {{ project }}
{% endfor %}{% endif %}{% if education %}
## Education
{% for line in education %}- {{ line }}
{% endfor %}{% endif %}{% if extras %}
## Additional
{% for line in extras %}- {{ line }}
{% endfor %}{% endif %}"#;

#[derive(Serialize)]
struct ResumeMarkdownContext<'a> {
    name: &'a str,
    title: Option<&'a str>,
    contact: String,
    summary: &'a str,
    skills: Vec<String>,
    experience: Vec<SectionView>,
    projects: Vec<String>,
    education: Vec<String>,
    extras: Vec<String>,
}

#[derive(Serialize)]
struct SectionView {
    heading: String,
    bullets: Vec<String>,
}

/// Renders the resume Markdown for `candidate` from the model's structured reply.
pub fn render_resume_markdown(
    resume: &ResumeDocument,
    candidate: &CandidateProfile,
) -> Result<String, TemplateError> {
    let experience = resume
        .experience_sections
        .iter()
        .map(|section| SectionView {
            heading: [&section.role, &section.company, &section.dates]
                .into_iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" | "),
            bullets: section.bullets.items(),
        })
        .filter(|section| !section.heading.is_empty() || !section.bullets.is_empty())
        .collect();

    let context = ResumeMarkdownContext {
        name: candidate.display_name().unwrap_or("Candidate"),
        title: non_blank(candidate.title.as_deref()),
        contact: candidate.contact_line(),
        summary: resume.summary.trim(),
        skills: resume.skills.items(),
        experience,
        projects: value_lines(resume.projects.as_ref()),
        education: value_lines(resume.education.as_ref()),
        extras: value_lines(resume.extras.as_ref()),
    };

    render_template(RESUME_MARKDOWN_TEMPLATE, &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{ExperienceSection, TextOrList};
    use serde_json::json;

    fn candidate() -> CandidateProfile {
        CandidateProfile {
            name: Some("Jane Doe".to_string()),
            title: Some("Data Analyst".to_string()),
            email: Some("jane@example.com".to_string()),
            location: Some("Aurora, IL".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_full_resume_markdown() {
        let resume = ResumeDocument {
            summary: "Analyst with 5 years in healthcare data.".to_string(),
            skills: TextOrList::List(vec!["SQL".to_string(), "Python".to_string()]),
            experience_sections: vec![ExperienceSection {
                company: "Acme".to_string(),
                role: "Analyst".to_string(),
                dates: "2020 – Present".to_string(),
                bullets: TextOrList::List(vec!["Cut reporting time 30%".to_string()]),
            }],
            projects: None,
            education: Some(json!("MBA, Healthcare Informatics")),
            extras: Some(json!(["CPC (A)"])),
        };

        let md = render_resume_markdown(&resume, &candidate()).unwrap();
        let expected = "# Jane Doe
Data Analyst
Aurora, IL | jane@example.com

## Summary
Analyst with 5 years in healthcare data.

## Skills
- SQL
- Python

## Experience
Analyst | Acme | 2020 – Present
- Cut reporting time 30%

## Education
- MBA, Healthcare Informatics

## Additional
- CPC (A)
";
        assert_eq!(md, expected);
    }

    #[test]
    fn test_empty_resume_renders_name_only() {
        let md = render_resume_markdown(&ResumeDocument::default(), &CandidateProfile::default())
            .unwrap();
        assert_eq!(md, "# Candidate\n");
    }

    #[test]
    fn test_sparse_reply_skips_empty_sections() {
        let resume: ResumeDocument = serde_json::from_value(json!({
            "summary": "x",
            "skills": ["SQL"],
            "experience_sections": [{}],
            "education": "",
            "extras": ""
        }))
        .unwrap();
        let md = render_resume_markdown(&resume, &candidate()).unwrap();
        assert!(md.contains("## Summary\nx\n"));
        assert!(md.contains("## Skills\n- SQL\n"));
        assert!(!md.contains("## Experience"));
        assert!(!md.contains("## Education"));
        assert!(!md.contains("## Additional"));
    }
}
