//! Declared media type gate for uploaded receipts.

use crate::constants::ALLOWED_CONTENT_TYPES;
use crate::error::AppError;
use crate::models::UploadedFile;

pub const INVALID_FILE_TYPE_MESSAGE: &str = "Only .jpg, .jpeg, and .png files are allowed";

/// Reject a missing file or one whose declared media type is not an allowed image type.
pub fn validate_file_format(file: Option<&UploadedFile>) -> Result<&UploadedFile, AppError> {
    let file = file.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;

    if !ALLOWED_CONTENT_TYPES.contains(&file.content_type.as_str()) {
        return Err(AppError::InvalidInput(INVALID_FILE_TYPE_MESSAGE.to_string()));
    }

    Ok(file)
}
