//! Structured resume returned by the model.
//!
//! The shape is advisory: every key may be missing or null. `projects`, `education`
//! and `extras` are passed through as arbitrary JSON.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    #[serde(default, deserialize_with = "nullable_string")]
    pub summary: String,
    #[serde(default, deserialize_with = "nullable_text_or_list")]
    pub skills: TextOrList,
    #[serde(default, deserialize_with = "nullable_sections")]
    pub experience_sections: Vec<ExperienceSection>,
    #[serde(default)]
    pub projects: Option<Value>,
    #[serde(default)]
    pub education: Option<Value>,
    #[serde(default)]
    pub extras: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceSection {
    #[serde(default, deserialize_with = "nullable_string")]
    pub company: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub role: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub dates: String,
    #[serde(default, deserialize_with = "nullable_text_or_list")]
    pub bullets: TextOrList,
}

/// Models return either `"SQL, Python"` or `["SQL", "Python"]` for list-ish fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextOrList {
    List(Vec<String>),
    Text(String),
}

impl Default for TextOrList {
    fn default() -> Self {
        TextOrList::List(Vec::new())
    }
}

impl TextOrList {
    /// Flattens into display items. Text is split into lines with leading
    /// bullet markers removed.
    pub fn items(&self) -> Vec<String> {
        match self {
            TextOrList::List(items) => items
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            TextOrList::Text(text) => text
                .lines()
                .map(strip_bullet_marker)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Flattens an arbitrary JSON value into display lines.
///
/// Strings split into lines, arrays flatten element-wise, objects become
/// one line each, led by their `name`/`title` field when present.
pub fn value_lines(value: Option<&Value>) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(value) = value {
        push_value_lines(value, &mut lines);
    }
    lines
}

fn push_value_lines(value: &Value, lines: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::String(text) => lines.extend(
            text.lines()
                .map(strip_bullet_marker)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        ),
        Value::Bool(_) | Value::Number(_) => lines.push(value.to_string()),
        Value::Array(items) => items.iter().for_each(|item| push_value_lines(item, lines)),
        Value::Object(map) => {
            let heading = ["name", "title"]
                .iter()
                .find_map(|key| map.get(*key).and_then(scalar_text))
                .filter(|s| !s.is_empty());
            let has_heading = heading.is_some();
            let details = map
                .iter()
                .filter(|(key, _)| !has_heading || !matches!(key.as_str(), "name" | "title"))
                .filter_map(|(key, v)| {
                    let text = scalar_text(v)?;
                    (!text.is_empty()).then(|| format!("{key}: {text}"))
                });
            let parts: Vec<String> = heading.into_iter().chain(details).collect();
            if !parts.is_empty() {
                lines.push(parts.join(" | "));
            }
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.trim().to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(scalar_text)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => Some(other.to_string()),
    }
}

fn strip_bullet_marker(line: &str) -> &str {
    let line = line.trim();
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("• "))
        .or_else(|| line.strip_prefix("* "))
        .unwrap_or(line)
        .trim()
}

fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_text_or_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<TextOrList, D::Error> {
    Ok(Option::<TextOrList>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_sections<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<ExperienceSection>, D::Error> {
    Ok(Option::<Vec<ExperienceSection>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_reply_parses() {
        let doc: ResumeDocument = serde_json::from_value(json!({
            "summary": "x",
            "skills": ["SQL"],
            "experience_sections": [],
            "education": "",
            "extras": ""
        }))
        .unwrap();
        assert_eq!(doc.summary, "x");
        assert_eq!(doc.skills, TextOrList::List(vec!["SQL".to_string()]));
        assert!(doc.experience_sections.is_empty());
        assert!(doc.projects.is_none());
    }

    #[test]
    fn test_missing_and_null_keys_are_tolerated() {
        let doc: ResumeDocument = serde_json::from_value(json!({
            "summary": null,
            "experience_sections": [{"company": "Acme", "bullets": null}]
        }))
        .unwrap();
        assert_eq!(doc.summary, "");
        assert!(doc.skills.items().is_empty());
        assert_eq!(doc.experience_sections[0].company, "Acme");
        assert_eq!(doc.experience_sections[0].role, "");
        assert!(doc.experience_sections[0].bullets.items().is_empty());
    }

    #[test]
    fn test_wrong_type_for_typed_key_is_rejected() {
        let result: Result<ResumeDocument, _> = serde_json::from_value(json!({"summary": 5}));
        assert!(result.is_err());
    }

    #[test]
    fn test_optional_sections_pass_through_any_shape() {
        let doc: ResumeDocument = serde_json::from_value(json!({
            "projects": [{"name": "Dashboard", "impact": "cut reporting time 30%"}],
            "extras": {"certifications": ["CPC"], "tools": "Tableau"}
        }))
        .unwrap();
        assert_eq!(
            value_lines(doc.projects.as_ref()),
            vec!["Dashboard | impact: cut reporting time 30%"]
        );
        assert_eq!(
            value_lines(doc.extras.as_ref()),
            vec!["certifications: CPC | tools: Tableau"]
        );
    }

    #[test]
    fn test_text_skills_split_into_lines() {
        let skills = TextOrList::Text("- SQL\n\n• Python\nTableau".to_string());
        assert_eq!(skills.items(), vec!["SQL", "Python", "Tableau"]);
    }

    #[test]
    fn test_value_lines_for_string_and_empty() {
        assert_eq!(
            value_lines(Some(&json!("MBA; CPC"))),
            vec!["MBA; CPC".to_string()]
        );
        assert!(value_lines(Some(&json!(""))).is_empty());
        assert!(value_lines(None).is_empty());
    }
}
