use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::render::document::StorageError;
use crate::render::template::TemplateError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Nothing here is retried; every variant surfaces to the caller.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Completion service error: {0}")]
    Service(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingCredential { .. } | LlmError::InvalidCredential { .. } => {
                AppError::Configuration(err.to_string())
            }
            LlmError::Parse { .. } => AppError::Parse(err.to_string()),
            LlmError::Http(_) | LlmError::Api { .. } | LlmError::EmptyContent => {
                AppError::Service(err.to_string())
            }
        }
    }
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Configuration(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIGURATION_ERROR"),
            AppError::Service(_) => (StatusCode::BAD_GATEWAY, "SERVICE_ERROR"),
            AppError::Parse(_) => (StatusCode::BAD_GATEWAY, "PARSE_ERROR"),
            AppError::Template(_) => (StatusCode::INTERNAL_SERVER_ERROR, "TEMPLATE_ERROR"),
            AppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            AppError::Validation(msg)
            | AppError::Configuration(msg)
            | AppError::Service(msg)
            | AppError::Parse(msg) => msg.clone(),
            AppError::Template(e) => {
                // template/context mismatch is a defect, not a user error
                tracing::error!("Template error: {e}");
                e.to_string()
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                e.to_string()
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_errors_map_onto_taxonomy() {
        let missing: AppError = LlmError::MissingCredential {
            key: "OPENAI_API_KEY",
        }
        .into();
        assert!(matches!(missing, AppError::Configuration(ref m) if m.contains("OPENAI_API_KEY")));

        let api: AppError = LlmError::Api {
            status: 503,
            message: "overloaded".to_string(),
        }
        .into();
        assert!(matches!(api, AppError::Service(ref m) if m.contains("overloaded")));

        let parse: AppError = LlmError::Parse {
            reason: "no JSON object found".to_string(),
            excerpt: "sorry".to_string(),
        }
        .into();
        assert!(matches!(parse, AppError::Parse(ref m) if m.contains("Raw: sorry")));

        let invalid: AppError = LlmError::InvalidCredential {
            key: "GROQ_API_KEY",
        }
        .into();
        assert!(matches!(invalid, AppError::Configuration(ref m) if m.contains("GROQ_API_KEY")));

        let empty: AppError = LlmError::EmptyContent.into();
        assert!(matches!(empty, AppError::Service(_)));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Configuration("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Service("x".into()), StatusCode::BAD_GATEWAY),
            (AppError::Parse("x".into()), StatusCode::BAD_GATEWAY),
            (
                AppError::Template(TemplateError::MissingValue("cand".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
