//! Application state shared by all handlers.

use std::sync::Arc;

use receiptly_core::Config;
use receiptly_db::ReceiptStore;
use receiptly_storage::LocalUploadStore;
use receiptly_vision::ExtractionClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Where extracted receipts are persisted
    pub receipts: Arc<dyn ReceiptStore>,
    /// Local disk holding uploaded images (served under `/uploads`)
    pub uploads: LocalUploadStore,
    pub extraction: ExtractionClient,
}

impl AppState {
    pub fn new(
        config: Config,
        receipts: Arc<dyn ReceiptStore>,
        uploads: LocalUploadStore,
        extraction: ExtractionClient,
    ) -> Self {
        Self {
            config,
            receipts,
            uploads,
            extraction,
        }
    }
}
