use crate::export::DocumentKind;
use crate::models::candidate::non_blank;

/// Returned when sanitizing leaves nothing.
pub const FALLBACK_FILENAME: &str = "output";

/// Reduces `name` to a filesystem-safe token: letters, digits and `._- ` are
/// kept, surrounding spaces trimmed, inner spaces become underscores.
pub fn safe_filename(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-' | ' '))
        .collect();
    let token = kept.trim_matches(' ').replace(' ', "_");
    if token.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        token
    }
}

/// `{safe display name}_{kind suffix}.{extension}`, e.g. `Jane_Doe_resume.docx`.
pub fn export_file_name(display_name: Option<&str>, kind: DocumentKind, extension: &str) -> String {
    let base = non_blank(display_name).unwrap_or(kind.fallback_name());
    format!("{}_{}.{extension}", safe_filename(base), kind.file_suffix())
}

/// `"{name} – Resume"`, with `Candidate` standing in for a missing name.
pub fn document_title(display_name: Option<&str>, kind: DocumentKind) -> String {
    format!(
        "{} – {}",
        non_blank(display_name).unwrap_or("Candidate"),
        kind.title_label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_filename_strips_punctuation() {
        let name = safe_filename("O'Brien, Jr. (PM)");
        assert_eq!(name, "OBrien_Jr._PM");
        assert!(!name.is_empty());
        assert!(name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-')));
    }

    #[test]
    fn test_safe_filename_keeps_unicode_letters() {
        assert_eq!(safe_filename("José Núñez"), "José_Núñez");
    }

    #[test]
    fn test_safe_filename_trims_and_falls_back() {
        assert_eq!(safe_filename("  Jane  Doe  "), "Jane__Doe");
        assert_eq!(safe_filename("!!!"), "output");
        assert_eq!(safe_filename(""), "output");
        assert_eq!(safe_filename("../../etc/passwd"), "....etcpasswd");
    }

    #[test]
    fn test_export_file_names() {
        assert_eq!(
            export_file_name(Some("Jane Doe"), DocumentKind::Resume, "md"),
            "Jane_Doe_resume.md"
        );
        assert_eq!(
            export_file_name(None, DocumentKind::Resume, "docx"),
            "resume_resume.docx"
        );
        assert_eq!(
            export_file_name(Some("  "), DocumentKind::CoverLetter, "docx"),
            "candidate_cover_letter.docx"
        );
    }

    #[test]
    fn test_document_titles() {
        assert_eq!(
            document_title(Some("Jane Doe"), DocumentKind::Resume),
            "Jane Doe – Resume"
        );
        assert_eq!(
            document_title(None, DocumentKind::CoverLetter),
            "Candidate – Cover Letter"
        );
    }
}
