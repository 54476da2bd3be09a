use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every upload failure is a client error: the whole request fails and no
/// partial field set is returned.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("Invalid upload: {0}")]
    Validation(String),

    #[error("File exceeds the {limit}-byte upload limit")]
    UploadTooLarge { limit: usize },

    #[error(
        "PDF parsing is not supported in this demo. Please export your resume as .docx or .txt and upload again."
    )]
    PdfNotSupported,

    #[error("Unsupported file type. Please upload a .docx or .txt resume.")]
    UnsupportedFileType,

    #[error("Could not read any text from the file.")]
    EmptyDocument,

    #[error("Failed to extract text from the document: {0}")]
    Conversion(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::MissingFile => "MISSING_FILE",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::UploadTooLarge { .. } => "UPLOAD_TOO_LARGE",
            AppError::PdfNotSupported => "PDF_NOT_SUPPORTED",
            AppError::UnsupportedFileType => "UNSUPPORTED_FILE_TYPE",
            AppError::EmptyDocument => "EMPTY_DOCUMENT",
            AppError::Conversion(_) => "CONVERSION_FAILED",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
            AppError::UploadTooLarge { .. } => {
                tracing::warn!("Resume upload rejected: {self}");
                (StatusCode::PAYLOAD_TOO_LARGE, self.to_string())
            }
            other => {
                tracing::warn!("Resume upload rejected: {other}");
                (StatusCode::BAD_REQUEST, other.to_string())
            }
        };

        let body = Json(json!({
            "error": message,
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}
