use async_trait::async_trait;
use receiptly_core::models::{NewReceipt, Receipt};
use receiptly_core::AppError;
use sqlx::types::Json;
use sqlx::PgPool;

/// Persistence seam for extracted receipts
#[async_trait]
pub trait ReceiptStore: Send + Sync {
    /// Insert a receipt; the store assigns `id` and `created_at`.
    async fn create(&self, receipt: NewReceipt) -> Result<Receipt, AppError>;

    /// Cheap connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Postgres-backed receipt repository
#[derive(Clone)]
pub struct ReceiptRepository {
    pool: PgPool,
}

impl ReceiptRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReceiptStore for ReceiptRepository {
    #[tracing::instrument(skip(self, receipt), fields(vendor = %receipt.vendor_name, items = receipt.receipt_items.len()))]
    async fn create(&self, receipt: NewReceipt) -> Result<Receipt, AppError> {
        let stored = sqlx::query_as::<_, Receipt>(
            r#"
            INSERT INTO receipts (
                date, currency, vendor_name, receipt_items,
                tax, total, image_url, original_filename
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, date, currency, vendor_name, receipt_items,
                      tax, total, image_url, original_filename, created_at
            "#,
        )
        .bind(&receipt.date)
        .bind(&receipt.currency)
        .bind(&receipt.vendor_name)
        .bind(Json(&receipt.receipt_items))
        .bind(receipt.tax)
        .bind(receipt.total)
        .bind(&receipt.image_url)
        .bind(&receipt.original_filename)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(receipt_id = %stored.id, "Receipt stored");

        Ok(stored)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
