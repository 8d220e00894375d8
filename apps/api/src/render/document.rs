//! Document Renderer: Markdown to a styled `.docx`.
//!
//! Rule set (line by line, non-recursive):
//! - `# text`  → level-1 heading
//! - `## text` → level-2 heading
//! - `- text`  → bullet paragraph
//! - any other non-empty line → plain paragraph
//!
//! Inline emphasis, nested lists, tables and links are not interpreted; their
//! markers pass through as literal characters.

use std::io::Cursor;
use std::path::Path;

use docx_rs::{
    AbstractNumbering, Docx, IndentLevel, Level, LevelJc, LevelText, NumberFormat, Numbering,
    NumberingId, Paragraph, Run, RunFonts, SpecialIndentType, Start, Style, StyleType,
};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_FONT_FAMILY: &str = "Calibri";
pub const DEFAULT_FONT_SIZE_PT: usize = 11;

const HEADING1_STYLE: &str = "Heading1";
const HEADING2_STYLE: &str = "Heading2";
const BULLET_NUMBERING_ID: usize = 1;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to package document: {0}")]
    Package(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Bullet(String),
    Paragraph(String),
}

impl Block {
    pub fn text(&self) -> &str {
        match self {
            Block::Heading { text, .. } | Block::Bullet(text) | Block::Paragraph(text) => text,
        }
    }
}

/// Document-wide default run style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultStyle {
    pub font_family: String,
    pub font_size_pt: usize,
}

impl Default for DefaultStyle {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size_pt: DEFAULT_FONT_SIZE_PT,
        }
    }
}

/// An ordered list of blocks plus the document-wide style, ready to be packed
/// into a `.docx`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub style: DefaultStyle,
    pub blocks: Vec<Block>,
}

/// Converts Markdown into a `Document` using the minimal rule set above.
pub fn markdown_to_document(markdown: &str, title: &str) -> Document {
    let blocks = markdown
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            if let Some(text) = line.strip_prefix("# ") {
                Block::Heading {
                    level: 1,
                    text: text.trim().to_string(),
                }
            } else if let Some(text) = line.strip_prefix("## ") {
                Block::Heading {
                    level: 2,
                    text: text.trim().to_string(),
                }
            } else if let Some(text) = line.strip_prefix("- ") {
                Block::Bullet(text.trim().to_string())
            } else {
                Block::Paragraph(line.trim_end().to_string())
            }
        })
        .collect();

    Document {
        title: title.to_string(),
        style: DefaultStyle::default(),
        blocks,
    }
}

impl Document {
    /// Builds the word-processor document: default font, heading styles and a
    /// bullet numbering definition, then one paragraph per block.
    pub fn to_docx(&self) -> Docx {
        let family = self.style.font_family.as_str();
        let mut docx = Docx::new()
            .default_fonts(
                RunFonts::new()
                    .ascii(family)
                    .hi_ansi(family)
                    .east_asia(family)
                    .cs(family),
            )
            // docx sizes are in half-points
            .default_size(self.style.font_size_pt * 2)
            .add_style(
                Style::new(HEADING1_STYLE, StyleType::Paragraph)
                    .name("Heading 1")
                    .size(32)
                    .bold(),
            )
            .add_style(
                Style::new(HEADING2_STYLE, StyleType::Paragraph)
                    .name("Heading 2")
                    .size(26)
                    .bold(),
            )
            .add_abstract_numbering(
                AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(
                    Level::new(
                        0,
                        Start::new(1),
                        NumberFormat::new("bullet"),
                        LevelText::new("•"),
                        LevelJc::new("left"),
                    )
                    .indent(Some(720), Some(SpecialIndentType::Hanging(360)), None, None),
                ),
            )
            .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID));

        for block in &self.blocks {
            let paragraph = Paragraph::new().add_run(Run::new().add_text(block.text()));
            let paragraph = match block {
                Block::Heading { level: 1, .. } => paragraph.style(HEADING1_STYLE),
                Block::Heading { .. } => paragraph.style(HEADING2_STYLE),
                Block::Bullet(_) => paragraph.numbering(
                    NumberingId::new(BULLET_NUMBERING_ID),
                    IndentLevel::new(0),
                ),
                Block::Paragraph(_) => paragraph,
            };
            docx = docx.add_paragraph(paragraph);
        }

        docx
    }

    /// Packs the document into `.docx` bytes in memory.
    pub fn to_docx_bytes(&self) -> Result<Vec<u8>, StorageError> {
        let mut buffer = Cursor::new(Vec::new());
        self.to_docx()
            .build()
            .pack(&mut buffer)
            .map_err(|e| StorageError::Package(e.to_string()))?;
        Ok(buffer.into_inner())
    }
}

/// Writes the document to `path` and returns the bytes written. Not
/// transactional: a failure part-way can leave a partial file behind.
pub fn save_document(document: &Document, path: &Path) -> Result<Vec<u8>, StorageError> {
    let bytes = document.to_docx_bytes()?;
    std::fs::write(path, &bytes)?;
    debug!(
        "Saved document '{}' ({} blocks) to {}",
        document.title,
        document.blocks.len(),
        path.display()
    );
    Ok(bytes)
}


#[cfg(test)]
mod tests {
    use super::testing::{document_text, ReadError};
    use super::*;

    #[test]
    fn test_heading_bullet_paragraph_in_order() {
        let doc = markdown_to_document("# Title\n- bullet one\nplain text", "Jane – Resume");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Heading {
                    level: 1,
                    text: "Title".to_string()
                },
                Block::Bullet("bullet one".to_string()),
                Block::Paragraph("plain text".to_string()),
            ]
        );
        assert_eq!(doc.title, "Jane – Resume");
    }

    #[test]
    fn test_level_two_heading_and_blank_lines() {
        let doc = markdown_to_document("## Experience\n\n   \nDone.\r\n", "t");
        assert_eq!(
            doc.blocks,
            vec![
                Block::Heading {
                    level: 2,
                    text: "Experience".to_string()
                },
                Block::Paragraph("Done.".to_string()),
            ]
        );
    }

    #[test]
    fn test_unsupported_markdown_passes_through_literally() {
        let doc = markdown_to_document(
            "### Deep heading\n**bold** and _it_\n  - nested\n| a | b |\n[link](http://x)\n#NoSpace",
            "t",
        );
        let texts: Vec<_> = doc.blocks.iter().map(Block::text).collect();
        assert_eq!(
            texts,
            vec![
                "### Deep heading",
                "**bold** and _it_",
                "  - nested",
                "| a | b |",
                "[link](http://x)",
                "#NoSpace"
            ]
        );
        assert!(doc
            .blocks
            .iter()
            .all(|b| matches!(b, Block::Paragraph(_))));
    }

    #[test]
    fn test_default_style_is_calibri_eleven() {
        let doc = markdown_to_document("x", "t");
        assert_eq!(doc.style.font_family, "Calibri");
        assert_eq!(doc.style.font_size_pt, 11);
    }

    #[test]
    fn test_round_trip_recovers_text() {
        let markdown = "# Jane Doe\n## Summary\nAnalyst with **5 years** experience.\n- Cut costs 20%\n- Built dashboards\n";
        let doc = markdown_to_document(markdown, "Jane Doe – Resume");
        let bytes = doc.to_docx_bytes().unwrap();
        let texts = document_text(&bytes).unwrap();
        assert_eq!(
            texts,
            vec![
                "Jane Doe",
                "Summary",
                "Analyst with **5 years** experience.",
                "Cut costs 20%",
                "Built dashboards"
            ]
        );
    }

    #[test]
    fn test_save_document_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Jane_Doe_resume.docx");
        let doc = markdown_to_document("# Title\n- one", "t");

        let written = save_document(&doc, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes, written);
        assert_eq!(document_text(&bytes).unwrap(), vec!["Title", "one"]);
    }

    #[test]
    fn test_save_document_into_missing_directory_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.docx");
        let err = save_document(&markdown_to_document("x", "t"), &path).unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }

    #[test]
    fn test_document_text_rejects_garbage() {
        assert!(matches!(
            document_text(b"not a zip"),
            Err(ReadError(_))
        ));
    }
}
