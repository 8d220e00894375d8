// Rendering: prompt/output templates, resume Markdown, and .docx documents.

pub mod document;
pub mod markdown;
pub mod template;
