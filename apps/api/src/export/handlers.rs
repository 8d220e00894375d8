//! Axum route handlers for the Export API.

use axum::{
    extract::State,
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
        HeaderValue,
    },
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::export::filename::{document_title, export_file_name};
use crate::export::DocumentKind;
use crate::render::document::{markdown_to_document, save_document, StorageError};
use crate::state::AppState;

pub const MARKDOWN_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub markdown: String,
    pub display_name: Option<String>,
    pub kind: DocumentKind,
}

/// `attachment; filename="..."`. Sanitized names may carry non-ASCII letters,
/// which travel as raw UTF-8 header bytes.
fn attachment(file_name: &str) -> Result<HeaderValue, AppError> {
    HeaderValue::from_bytes(format!("attachment; filename=\"{file_name}\"").as_bytes())
        .map_err(|e| AppError::Validation(format!("Unusable export file name: {e}")))
}

/// POST /api/v1/export/markdown
/// Returns the Markdown unchanged as a download.
pub async fn handle_export_markdown(
    Json(request): Json<ExportRequest>,
) -> Result<impl IntoResponse, AppError> {
    let file_name = export_file_name(request.display_name.as_deref(), request.kind, "md");
    info!("Exporting Markdown as {file_name}");

    Ok((
        [
            (CONTENT_TYPE, HeaderValue::from_static(MARKDOWN_CONTENT_TYPE)),
            (CONTENT_DISPOSITION, attachment(&file_name)?),
        ],
        request.markdown,
    ))
}

/// POST /api/v1/export/docx
/// Renders the Markdown to .docx, saves it under the export directory and
/// returns the saved bytes.
pub async fn handle_export_docx(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<impl IntoResponse, AppError> {
    let display_name = request.display_name.as_deref();
    let file_name = export_file_name(display_name, request.kind, "docx");
    let title = document_title(display_name, request.kind);

    let document = markdown_to_document(&request.markdown, &title);
    let block_count = document.blocks.len();

    // Packing and file I/O are blocking; keep them off the async executor.
    let export_dir = state.config.export_dir.clone();
    let path = export_dir.join(&file_name);
    let target = path.clone();
    let saved = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, StorageError> {
        std::fs::create_dir_all(&export_dir)?;
        save_document(&document, &target)
    })
    .await
    .map_err(|e| {
        StorageError::Io(std::io::Error::other(format!(
            "spawn_blocking failed in docx export: {e}"
        )))
    })??;

    info!(
        "Exported '{}' ({} blocks, {} bytes) to {}",
        title,
        block_count,
        saved.len(),
        path.display()
    );

    Ok((
        [
            (CONTENT_TYPE, HeaderValue::from_static(DOCX_CONTENT_TYPE)),
            (CONTENT_DISPOSITION, attachment(&file_name)?),
        ],
        Bytes::from(saved),
    ))
}
