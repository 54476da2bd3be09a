//! Axum route handlers for the resume upload API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::resume::acquire::{acquire_text, DocumentKind};
use crate::resume::fields::{extract_fields, ExtractedFields, ExtractionOptions};
use crate::state::AppState;

/// Multipart field carrying the resume.
const FILE_FIELD: &str = "file";

struct UploadedFile {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Bytes,
}

/// POST /api/v1/resumes/parse (also POST /api/parse-resume)
///
/// Accepts one resume file and returns whichever fields could be detected.
/// Any failure rejects the whole upload.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractedFields>, AppError> {
    let upload_id = Uuid::new_v4();
    async move {
        let upload = read_file_field(multipart, state.config.max_upload_bytes).await?;
        let kind = DocumentKind::detect(upload.file_name.as_deref(), upload.content_type.as_deref());
        info!(
            "Received {:?} upload ({} bytes, name={:?})",
            kind,
            upload.bytes.len(),
            upload.file_name
        );

        let acquired = acquire_text(kind, upload.bytes, state.converter.as_ref()).await?;
        let options = ExtractionOptions {
            binary_document: acquired.binary_document,
            numbering_plan: state.numbering_plan(),
        };
        let fields = extract_fields(&acquired.text, &options);

        info!(
            "Detected {} of 4 resume fields in {:?} text",
            fields.detected_count(),
            acquired.kind
        );
        Ok::<_, AppError>(Json(fields))
    }
    .instrument(info_span!("parse_resume", %upload_id))
    .await
}

/// Pulls the `file` field out of the form; other fields are skipped.
async fn read_file_field(mut multipart: Multipart, limit: usize) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        // A plain form value under "file" is not an upload
        let Some(file_name) = field.file_name().map(str::to_string) else {
            return Err(AppError::MissingFile);
        };
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, limit))?;
        return Ok(UploadedFile {
            file_name: Some(file_name),
            content_type,
            bytes,
        });
    }
    Err(AppError::MissingFile)
}

fn multipart_error(e: MultipartError, limit: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::UploadTooLarge { limit }
    } else {
        AppError::Validation(e.body_text())
    }
}
