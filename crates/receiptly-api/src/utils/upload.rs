//! Upload handling for the receipt endpoint
//!
//! Reads the multipart `file` field, enforces size, extension and declared media
//! type, and writes the bytes to the upload store.

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use receiptly_core::constants::{ALLOWED_CONTENT_TYPES, ALLOWED_EXTENSIONS};
use receiptly_core::models::UploadedFile;
use receiptly_core::validation::INVALID_FILE_TYPE_MESSAGE;
use receiptly_core::AppError;

use crate::constants::UPLOAD_FIELD_NAME;
use crate::state::AppState;

/// Raw file part as received from the client
#[derive(Debug)]
pub struct FilePart {
    pub data: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

fn multipart_error(err: MultipartError, context: &str) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("{}: {}", context, err.body_text()))
    } else {
        AppError::InvalidInput(format!("{}: {}", context, err.body_text()))
    }
}

/// Extract the `file` field from a multipart form.
/// Returns `None` when the form has no such field; a second `file` field is rejected.
pub async fn extract_multipart_file(mut multipart: Multipart) -> Result<Option<FilePart>, AppError> {
    let mut part: Option<FilePart> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "Failed to read multipart"))?
    {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }

        if part.is_some() {
            return Err(AppError::InvalidInput(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            ));
        }

        let filename = field.file_name().unwrap_or("unknown").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, "Failed to read file data"))?;

        part = Some(FilePart {
            data: data.to_vec(),
            filename,
            content_type,
        });
    }

    Ok(part)
}

/// Validate file size
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::PayloadTooLarge(format!(
            "File size exceeds maximum allowed size of {} MB",
            max_size / 1024 / 1024
        )));
    }
    Ok(())
}

/// Normalize MIME type by stripping parameters (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_lowercase()
}

/// Validate the declared content type and return its normalized form.
pub fn validate_content_type(content_type: &str) -> Result<String, AppError> {
    let normalized = normalize_mime_type(content_type);
    if !ALLOWED_CONTENT_TYPES.contains(&normalized.as_str()) {
        return Err(AppError::InvalidInput(INVALID_FILE_TYPE_MESSAGE.to_string()));
    }
    Ok(normalized)
}

/// Validate file extension (case-insensitive)
pub fn validate_file_extension(filename: &str) -> Result<String, AppError> {
    let extension = match filename.rsplit_once('.') {
        Some((_, ext)) => ext.to_lowercase(),
        None => String::new(),
    };

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::InvalidInput(INVALID_FILE_TYPE_MESSAGE.to_string()));
    }

    Ok(extension)
}

/// Run the upload constraints on a file part (type, then size) and store it.
pub async fn store_upload(state: &AppState, part: FilePart) -> Result<UploadedFile, AppError> {
    validate_file_extension(&part.filename)?;
    let content_type = validate_content_type(&part.content_type)?;
    validate_file_size(part.data.len(), state.config.max_file_size_bytes())?;

    let file = state
        .uploads
        .save(&part.filename, &content_type, &part.data)
        .await?;

    Ok(file)
}

/// Receive the receipt image of a request, if one was sent.
pub async fn receive_upload(
    state: &AppState,
    multipart: Multipart,
) -> Result<Option<UploadedFile>, AppError> {
    match extract_multipart_file(multipart).await? {
        Some(part) => Ok(Some(store_upload(state, part).await?)),
        None => Ok(None),
    }
}
