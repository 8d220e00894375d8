//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::generator::{
    generate_cover_letter, generate_resume, CoverLetterGeneration, ResumeGeneration,
    ResumeHighlights,
};
use crate::generation::style::{Layout, Seniority, StyleConfig, TonePreset};
use crate::models::candidate::{CandidateProfile, GenerationRequest, JobTarget};
use crate::state::AppState;

/// Accepted cover-letter temperature range.
pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=1.2;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateResumeRequest {
    #[serde(default)]
    pub candidate: CandidateProfile,
    #[serde(default)]
    pub job: JobTarget,
    #[serde(default)]
    pub style: StyleConfig,
    /// Overrides `style.tone` when set.
    pub preset: Option<TonePreset>,
    pub existing_resume: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateCoverLetterRequest {
    #[serde(default)]
    pub candidate: CandidateProfile,
    #[serde(default)]
    pub job: JobTarget,
    #[serde(default)]
    pub style: StyleConfig,
    pub preset: Option<TonePreset>,
    /// A previously generated resume; its opening is used as highlights.
    pub resume_markdown: Option<String>,
    pub temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct OptionEntry {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PresetEntry {
    pub preset: TonePreset,
    pub label: &'static str,
    pub tone: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StyleOptionsResponse {
    pub defaults: StyleConfig,
    pub seniorities: Vec<&'static str>,
    pub layouts: Vec<OptionEntry>,
    pub presets: Vec<PresetEntry>,
    pub temperature: TemperatureBounds,
}

#[derive(Debug, Serialize)]
pub struct TemperatureBounds {
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

fn apply_preset(style: StyleConfig, preset: Option<TonePreset>) -> StyleConfig {
    match preset {
        Some(preset) => style.with_preset(preset),
        None => style,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/styles
///
/// Options for the style pickers: seniority levels, layouts and tone presets.
pub async fn handle_style_options(State(state): State<AppState>) -> Json<StyleOptionsResponse> {
    Json(StyleOptionsResponse {
        defaults: StyleConfig::default(),
        seniorities: Seniority::ALL.iter().map(Seniority::as_str).collect(),
        layouts: Layout::ALL
            .iter()
            .map(|layout| OptionEntry {
                value: layout.as_str(),
                label: layout.label(),
            })
            .collect(),
        presets: TonePreset::ALL
            .iter()
            .map(|preset| PresetEntry {
                preset: *preset,
                label: preset.label(),
                tone: preset.tone(),
            })
            .collect(),
        temperature: TemperatureBounds {
            min: *TEMPERATURE_RANGE.start(),
            max: *TEMPERATURE_RANGE.end(),
            default: state.config.default_temperature,
        },
    })
}

/// POST /api/v1/resumes/generate
///
/// Builds the resume prompt, asks the model for structured JSON and renders it to Markdown.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    Json(request): Json<GenerateResumeRequest>,
) -> Result<Json<ResumeGeneration>, AppError> {
    let generation = GenerationRequest {
        candidate: request.candidate,
        job: request.job,
        style: apply_preset(request.style, request.preset),
        prior_context: request.existing_resume,
    };

    let response = generate_resume(&state.llm, &generation).await?;
    Ok(Json(response))
}

/// POST /api/v1/cover-letters/generate
///
/// Builds the cover-letter prompt and returns the model's Markdown verbatim.
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    Json(request): Json<GenerateCoverLetterRequest>,
) -> Result<Json<CoverLetterGeneration>, AppError> {
    let temperature = request
        .temperature
        .unwrap_or(state.config.default_temperature);
    if !TEMPERATURE_RANGE.contains(&temperature) {
        return Err(AppError::Validation(format!(
            "temperature must be between {} and {}, got {temperature}",
            TEMPERATURE_RANGE.start(),
            TEMPERATURE_RANGE.end()
        )));
    }

    let highlights = request
        .resume_markdown
        .as_deref()
        .and_then(ResumeHighlights::from_resume_markdown);

    let generation = GenerationRequest {
        candidate: request.candidate,
        job: request.job,
        style: apply_preset(request.style, request.preset),
        prior_context: highlights.map(|h| h.as_str().to_string()),
    };

    let response = generate_cover_letter(&state.llm, &generation, temperature).await?;
    Ok(Json(response))
}
