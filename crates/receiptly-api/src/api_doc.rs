//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use receiptly_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Receiptly API",
        version = "0.1.0",
        description = "Extracts structured data (vendor, date, currency, line items, tax, total) from receipt images using a vision language model and stores the result."
    ),
    paths(handlers::receipt_extract::extract_receipt_details),
    components(schemas(
        models::ReceiptResponse,
        models::ReceiptItem,
        error::ErrorResponse,
        handlers::receipt_extract::ReceiptUploadForm,
    )),
    tags(
        (name = "receipts", description = "Receipt image extraction")
    )
)]
pub struct ApiDoc;
