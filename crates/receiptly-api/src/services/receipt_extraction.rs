//! Receipt extraction pipeline
//!
//! validate file -> read image -> call model -> validate response -> persist -> format.
//! Every failure after the upload reached disk removes the stored file before the
//! error is returned; the error itself is passed through unchanged.

use receiptly_core::models::{NewReceipt, ReceiptResponse, UploadedFile};
use receiptly_core::validation::{validate_file_format, verify_ai_response};
use receiptly_core::AppError;
use receiptly_storage::UploadGuard;

use crate::state::AppState;

/// Runs one extraction per call; holds no state of its own.
pub struct ReceiptExtractionService<'a> {
    state: &'a AppState,
}

impl<'a> ReceiptExtractionService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    #[tracing::instrument(
        skip(self, file),
        fields(
            original_filename = file.as_ref().map(|f| f.original_filename.as_str()),
            stored_filename = file.as_ref().map(|f| f.filename.as_str()),
        )
    )]
    pub async fn extract_receipt_details(
        &self,
        file: Option<UploadedFile>,
    ) -> Result<ReceiptResponse, AppError> {
        let guard = file.as_ref().map(|f| UploadGuard::new(&f.path));

        let response = self.run(file.as_ref()).await?;

        if let Some(guard) = guard {
            guard.keep();
        }

        tracing::info!(receipt_id = %response.id, "Receipt extracted");
        Ok(response)
    }

    async fn run(&self, file: Option<&UploadedFile>) -> Result<ReceiptResponse, AppError> {
        let file = validate_file_format(file)?;

        let image = self.state.uploads.read(file).await?;
        let raw = self.state.extraction.extract(&image).await?;
        let extraction = verify_ai_response(&raw)?;

        let new_receipt = NewReceipt::from_extraction(extraction, file)?;
        let receipt = self.state.receipts.create(new_receipt).await?;

        Ok(ReceiptResponse::from(receipt))
    }
}
