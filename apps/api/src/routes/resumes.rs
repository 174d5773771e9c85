use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::{info, warn};

use crate::documents::{self, DocumentKind};
use crate::errors::AppError;
use crate::extraction::ExtractionResult;
use crate::state::AppState;
use crate::storage::object_key;

const RESUME_FIELD: &str = "resume";

#[derive(Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

struct UploadedFile {
    filename: String,
    data: Bytes,
}

/// POST /upload
/// Archives the original file, decodes it and returns the extracted profile.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractionResult>, AppError> {
    let upload = read_resume_file(&mut multipart).await?;

    let kind = DocumentKind::from_filename(&upload.filename).ok_or_else(|| {
        AppError::UnsupportedMediaType("Only PDF and DOCX files are allowed".to_string())
    })?;
    info!(
        filename = %upload.filename,
        size = upload.data.len(),
        ?kind,
        "Received resume upload"
    );

    let key = object_key(&upload.filename);
    state
        .store
        .put(&key, upload.data.clone(), kind.content_type())
        .await?;

    let text = match documents::decode(kind, upload.data).await {
        Ok(text) => text,
        Err(e) => {
            warn!(filename = %upload.filename, "Could not decode upload, extracting from empty text: {e}");
            String::new()
        }
    };

    Ok(Json(state.extractor.extract(&text)))
}

/// POST /api/v1/extract
/// Runs the engine on text the caller already has.
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> Json<ExtractionResult> {
    Json(state.extractor.extract(&req.text))
}

/// First field named `resume` or carrying a filename, whichever comes first.
async fn read_resume_file(multipart: &mut Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let is_resume = field.name() == Some(RESUME_FIELD);
        if !is_resume && field.file_name().is_none() {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(multipart_error)?;
        return Ok(UploadedFile { filename, data });
    }
    Err(AppError::Validation(format!(
        "Missing file field '{RESUME_FIELD}'"
    )))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Upload exceeds the maximum allowed size".to_string())
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
    }
}
