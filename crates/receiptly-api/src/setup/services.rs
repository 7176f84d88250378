//! Service and repository wiring

use crate::state::AppState;
use anyhow::{Context, Result};
use receiptly_core::Config;
use receiptly_db::ReceiptRepository;
use receiptly_storage::LocalUploadStore;
use receiptly_vision::{ExtractionClient, OpenAiVisionModel};
use sqlx::PgPool;
use std::sync::Arc;

/// Build the application state from configuration and a connected pool.
pub async fn initialize_services(config: &Config, pool: PgPool) -> Result<Arc<AppState>> {
    let uploads = LocalUploadStore::new(config.upload_dir())
        .await
        .context("Failed to initialize upload storage")?;
    tracing::info!(upload_dir = %config.upload_dir().display(), "Upload storage ready");

    // The API key is read here once; requests never touch the environment.
    let model = OpenAiVisionModel::new(config.openai_api_key(), config.openai_base_url())
        .context("Failed to initialize OpenAI vision model")?;
    tracing::info!(base_url = %config.openai_base_url(), model = %receiptly_vision::DEFAULT_MODEL, "Vision model client ready");

    let receipts = Arc::new(ReceiptRepository::new(pool));

    Ok(Arc::new(AppState::new(
        config.clone(),
        receipts,
        uploads,
        ExtractionClient::new(Arc::new(model)),
    )))
}
