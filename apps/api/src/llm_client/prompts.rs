// System-role framings sent ahead of every user prompt.
// Generation-specific prompt text lives in generation/prompts.rs.

/// Framing for structured completions.
pub const JSON_SYSTEM: &str = "Return strictly valid JSON unless told otherwise.";

/// Framing for free-text completions.
pub const MARKDOWN_SYSTEM: &str = "Return clean Markdown.";

/// Temperature for structured extraction; kept low for well-formed JSON.
pub const STRUCTURED_TEMPERATURE: f32 = 0.4;

/// Default temperature for free-text completions.
pub const DEFAULT_MARKDOWN_TEMPERATURE: f32 = 0.6;
