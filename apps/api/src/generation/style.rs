//! Style configuration: tone, seniority and layout applied to every generation.
//!
//! Tone is free text; presets are shortcuts that map to a fixed tone string.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_TONE: &str = "professional, confident";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Seniority {
    Entry,
    Junior,
    Mid,
    #[default]
    MidSenior,
    Senior,
    Lead,
}

impl Seniority {
    pub const ALL: [Seniority; 6] = [
        Seniority::Entry,
        Seniority::Junior,
        Seniority::Mid,
        Seniority::MidSenior,
        Seniority::Senior,
        Seniority::Lead,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Seniority::Entry => "entry",
            Seniority::Junior => "junior",
            Seniority::Mid => "mid",
            Seniority::MidSenior => "mid-senior",
            Seniority::Senior => "senior",
            Seniority::Lead => "lead",
        }
    }
}

impl fmt::Display for Seniority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    #[default]
    #[serde(rename = "modern", alias = "modern ATS-friendly")]
    Modern,
    #[serde(rename = "classic")]
    Classic,
    #[serde(rename = "two-column", alias = "two-column (ATS-safe)")]
    TwoColumn,
}

impl Layout {
    pub const ALL: [Layout; 3] = [Layout::Modern, Layout::Classic, Layout::TwoColumn];

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Modern => "modern",
            Layout::Classic => "classic",
            Layout::TwoColumn => "two-column",
        }
    }

    /// Human-facing label shown in layout pickers.
    pub fn label(&self) -> &'static str {
        match self {
            Layout::Modern => "modern ATS-friendly",
            Layout::Classic => "classic",
            Layout::TwoColumn => "two-column (ATS-safe)",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable style value object. Identity is its field values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub tone: String,
    pub seniority: Seniority,
    pub layout: Layout,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TONE, Seniority::default(), Layout::default())
    }
}

impl StyleConfig {
    pub fn new(tone: impl Into<String>, seniority: Seniority, layout: Layout) -> Self {
        Self {
            tone: tone.into(),
            seniority,
            layout,
        }
    }

    /// Returns a copy with the tone replaced by the preset's tone string.
    pub fn with_preset(&self, preset: TonePreset) -> Self {
        Self {
            tone: preset.tone().to_string(),
            ..self.clone()
        }
    }
}

/// Named tone shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TonePreset {
    Professional,
    Concise,
    StoryDriven,
    Technical,
    Leadership,
}

impl TonePreset {
    pub const ALL: [TonePreset; 5] = [
        TonePreset::Professional,
        TonePreset::Concise,
        TonePreset::StoryDriven,
        TonePreset::Technical,
        TonePreset::Leadership,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TonePreset::Professional => "Professional",
            TonePreset::Concise => "Concise",
            TonePreset::StoryDriven => "Story-driven",
            TonePreset::Technical => "Technical",
            TonePreset::Leadership => "Leadership",
        }
    }

    pub fn tone(&self) -> &'static str {
        match self {
            TonePreset::Professional => "professional, confident, results-oriented",
            TonePreset::Concise => "crisp, minimal, bullet-heavy",
            TonePreset::StoryDriven => "engaging, narrative, value-focused",
            TonePreset::Technical => "precise, jargon-aware, quantified",
            TonePreset::Leadership => "strategic, stakeholder-savvy, impact-led",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style() {
        let style = StyleConfig::default();
        assert_eq!(style.tone, "professional, confident");
        assert_eq!(style.seniority, Seniority::MidSenior);
        assert_eq!(style.layout, Layout::Modern);
    }

    #[test]
    fn test_seniority_serde_uses_kebab_case() {
        let s: Seniority = serde_json::from_str(r#""mid-senior""#).unwrap();
        assert_eq!(s, Seniority::MidSenior);
        assert_eq!(serde_json::to_string(&Seniority::Lead).unwrap(), r#""lead""#);
        assert!(serde_json::from_str::<Seniority>(r#""principal""#).is_err());
    }

    #[test]
    fn test_layout_accepts_picker_labels() {
        let l: Layout = serde_json::from_str(r#""modern ATS-friendly""#).unwrap();
        assert_eq!(l, Layout::Modern);
        let l: Layout = serde_json::from_str(r#""two-column (ATS-safe)""#).unwrap();
        assert_eq!(l, Layout::TwoColumn);
        assert_eq!(serde_json::to_string(&Layout::TwoColumn).unwrap(), r#""two-column""#);
    }

    #[test]
    fn test_partial_style_fills_defaults() {
        let style: StyleConfig = serde_json::from_str(r#"{"seniority": "mid"}"#).unwrap();
        assert_eq!(style.tone, DEFAULT_TONE);
        assert_eq!(style.seniority, Seniority::Mid);
        assert_eq!(style.layout, Layout::Modern);
    }

    #[test]
    fn test_preset_replaces_tone_only() {
        let base = StyleConfig::new("anything", Seniority::Senior, Layout::Classic);
        let styled = base.with_preset(TonePreset::Leadership);
        assert_eq!(styled.tone, "strategic, stakeholder-savvy, impact-led");
        assert_eq!(styled.seniority, Seniority::Senior);
        assert_eq!(styled.layout, Layout::Classic);
        // value object: receiver untouched
        assert_eq!(base.tone, "anything");
    }

    #[test]
    fn test_every_preset_has_distinct_tone() {
        let mut tones: Vec<_> = TonePreset::ALL.iter().map(|p| p.tone()).collect();
        tones.sort();
        tones.dedup();
        assert_eq!(tones.len(), TonePreset::ALL.len());
    }
}
