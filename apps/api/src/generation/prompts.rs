// Prompt text and builders for resume and cover-letter generation.
// Templates are rendered by render::template with typed context structs.

use serde::Serialize;

use crate::generation::style::StyleConfig;
use crate::models::candidate::{CandidateProfile, JobTarget};
use crate::render::template::{render_template, TemplateError};

/// Persona preamble shared by both prompts.
pub const BASE_SYSTEM_PROMPT: &str = "You are a seasoned resume & cover-letter writing assistant.
Follow best practices, quantify impact, and ensure ATS-friendly formatting.
Prioritize clarity, brevity, and relevance to the target role and industry.
";

pub const RESUME_INSTRUCTIONS: &str = "
Write in concise bullet points starting with strong action verbs.
Use present tense for current role and past tense for previous roles.
Quantify impact with metrics where possible (%, $, time).
Ensure keyword alignment with the given job description.
Use inclusive, professional tone. Avoid fluff and claims without evidence.
";

pub const COVER_LETTER_INSTRUCTIONS: &str = "
One page max. Professional tone with warmth.
Hook in first paragraph (relevance to role & company).
Middle: 2–3 achievement paragraphs tailored to JD.
Close: enthusiasm + next-step call-to-action + availability.
";

/// Final self-check list embedded in the resume prompt.
pub const RESUME_CHECKLIST: [&str; 6] = [
    "Match the target job title and domain terminology",
    "Prioritize most relevant experiences first",
    "Include top skills from the JD (without keyword stuffing)",
    "Quantify with metrics where plausible",
    "Ensure consistent tense and formatting",
    "Be ATS-friendly (plain characters, simple symbols)",
];

/// A key the model must return for a structured resume, with an optional hint.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct JsonKey {
    pub name: &'static str,
    pub note: &'static str,
}

/// Keys the model must return for a structured resume, in prompt order.
pub const RESUME_JSON_KEYS: [JsonKey; 6] = [
    JsonKey {
        name: "summary",
        note: "",
    },
    JsonKey {
        name: "skills",
        note: "",
    },
    JsonKey {
        name: "experience_sections",
        note: "list of sections, each with company, role, dates, bullets",
    },
    JsonKey {
        name: "projects",
        note: "optional",
    },
    JsonKey {
        name: "education",
        note: "",
    },
    JsonKey {
        name: "extras",
        note: "certs/awards/tools, etc.",
    },
];

pub const RESUME_PROMPT_TEMPLATE: &str = r#"{{ system_prompt }}
---
You will generate **a role-targeted resume** using the following inputs.

[Candidate]
Name: {{ cand.name }}
Title: {{ cand.title }}
Location: {{ cand.location }}
Email: {{ cand.email }}
Phone: {{ cand.phone }}
LinkedIn: {{ cand.linkedin }}
Portfolio: {{ cand.portfolio }}

[Core Skills]
{{ cand.skills }}

[Experience (freeform summary provided by user)]
{{ cand.experience }}

[Education & Certifications]
{{ cand.education }}

[Job Description]
Role: {{ job.title }}
Company: {{ job.company }}
Summary: {{ job.summary }}
Requirements: {{ job.requirements }}

[Style]
Tone: {{ style.tone }} | Seniority: {{ style.seniority }} | Layout: {{ style.layout }}
Constraints:
{{ resume_instructions }}
{% if existing_resume %}
[Existing Resume (for context)]
{{ existing_resume }}
{% endif %}
Check these before finalizing:
{% for item in checklist %}- {{ item }}
{% endfor %}
Return JSON with keys:
{% for key in json_keys %}- "{{ key.name }}"{% if key.note %} ({{ key.note }}){% endif %}
{% endfor %}"#;

pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"{{ system_prompt }}
---
Create a concise, tailored cover letter using the inputs below.

[Candidate]
Name: {{ cand.name }} | Title: {{ cand.title }} | Location: {{ cand.location }}
Email: {{ cand.email }} | Phone: {{ cand.phone }} | LinkedIn: {{ cand.linkedin }}

[Job]
Role: {{ job.title }}
Company: {{ job.company }}
JD Summary: {{ job.summary }}
Top Requirements: {{ job.requirements }}

[Style]
Tone: {{ style.tone }} | Seniority: {{ style.seniority }}

Constraints:
{{ cover_letter_instructions }}

Focus on alignment to the JD. If company mission is known, weave in a sentence.

Return plain Markdown (no JSON). Keep it to ~250–350 words.
{% if resume_highlights %}
Incorporate these highlights where fitting:
{{ resume_highlights }}
{% endif %}"#;

#[derive(Serialize)]
struct ResumePromptContext<'a> {
    system_prompt: &'a str,
    cand: &'a CandidateProfile,
    job: &'a JobTarget,
    style: &'a StyleConfig,
    resume_instructions: &'a str,
    checklist: &'a [&'a str],
    existing_resume: Option<&'a str>,
    json_keys: &'a [JsonKey],
}

#[derive(Serialize)]
struct CoverLetterPromptContext<'a> {
    system_prompt: &'a str,
    cand: &'a CandidateProfile,
    job: &'a JobTarget,
    style: &'a StyleConfig,
    cover_letter_instructions: &'a str,
    resume_highlights: Option<&'a str>,
}

/// Builds the resume prompt. Pure: identical inputs give identical output.
pub fn build_resume_prompt(
    candidate: &CandidateProfile,
    job: &JobTarget,
    style: &StyleConfig,
    existing_resume: Option<&str>,
) -> Result<String, TemplateError> {
    render_template(
        RESUME_PROMPT_TEMPLATE,
        &ResumePromptContext {
            system_prompt: BASE_SYSTEM_PROMPT,
            cand: candidate,
            job,
            style,
            resume_instructions: RESUME_INSTRUCTIONS,
            checklist: &RESUME_CHECKLIST,
            existing_resume: existing_resume.filter(|s| !s.trim().is_empty()),
            json_keys: &RESUME_JSON_KEYS,
        },
    )
}

/// Builds the cover-letter prompt. Pure: identical inputs give identical output.
pub fn build_cover_letter_prompt(
    candidate: &CandidateProfile,
    job: &JobTarget,
    style: &StyleConfig,
    resume_highlights: Option<&str>,
) -> Result<String, TemplateError> {
    render_template(
        COVER_LETTER_PROMPT_TEMPLATE,
        &CoverLetterPromptContext {
            system_prompt: BASE_SYSTEM_PROMPT,
            cand: candidate,
            job,
            style,
            cover_letter_instructions: COVER_LETTER_INSTRUCTIONS,
            resume_highlights: resume_highlights.filter(|s| !s.trim().is_empty()),
        },
    )
}
