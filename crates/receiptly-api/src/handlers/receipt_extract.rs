use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use receiptly_core::models::ReceiptResponse;
use utoipa::ToSchema;

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::ReceiptExtractionService;
use crate::state::AppState;
use crate::utils::upload::receive_upload;

/// Multipart form accepted by the extraction endpoint
#[derive(ToSchema)]
#[allow(dead_code)] // Documentation only
pub struct ReceiptUploadForm {
    /// Receipt image (.jpg, .jpeg or .png)
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

/// Extract receipt details handler
///
/// Stores the uploaded image, has the vision model read it, validates the answer and
/// persists the receipt. A request without a multipart body is treated like one
/// without a file.
///
/// # Errors
/// - `AppError::InvalidInput` - missing or disallowed file, schema-invalid model output
/// - `AppError::PayloadTooLarge` - file exceeds the size limit
/// - `AppError::AiService` - model call failed or returned empty/non-JSON output
/// - `AppError::Database` - receipt could not be stored
#[utoipa::path(
    post,
    path = "/receipt/extract-receipt-details",
    tag = "receipts",
    request_body(content = ReceiptUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Receipt extracted and stored", body = ReceiptResponse),
        (status = 400, description = "Invalid file or unusable model output", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "AI service or storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "extract_receipt_details"))]
pub async fn extract_receipt_details(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ReceiptResponse>, HttpAppError> {
    let file = match multipart {
        Ok(multipart) => receive_upload(&state, multipart).await?,
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "Request is not multipart");
            None
        }
    };

    let response = ReceiptExtractionService::new(&state)
        .extract_receipt_details(file)
        .await?;

    Ok(Json(response))
}
