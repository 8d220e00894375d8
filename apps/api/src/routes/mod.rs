pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::export;
use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation API
        .route("/api/v1/styles", get(handlers::handle_style_options))
        .route(
            "/api/v1/resumes/generate",
            post(handlers::handle_generate_resume),
        )
        .route(
            "/api/v1/cover-letters/generate",
            post(handlers::handle_generate_cover_letter),
        )
        // Export API
        .route(
            "/api/v1/export/markdown",
            post(export::handlers::handle_export_markdown),
        )
        .route(
            "/api/v1/export/docx",
            post(export::handlers::handle_export_docx),
        )
        .with_state(state)
}
