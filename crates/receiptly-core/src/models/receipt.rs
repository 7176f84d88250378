use chrono::{DateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

use super::upload::UploadedFile;
use crate::error::AppError;

/// Scale used for monetary columns (`NUMERIC(10, 2)`).
pub const MONEY_SCALE: u32 = 2;

/// One line of a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReceiptItem {
    pub item_name: String,
    pub item_cost: f64,
}

/// Fields extracted by the vision model, after validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiReceiptResponse {
    pub date: String,
    pub currency: String,
    pub vendor_name: String,
    pub receipt_items: Vec<ReceiptItem>,
    pub tax: f64,
    pub total: f64,
}

/// Insert payload for the `receipts` table. The database assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReceipt {
    pub date: String,
    pub currency: String,
    pub vendor_name: String,
    pub receipt_items: Vec<ReceiptItem>,
    pub tax: Decimal,
    pub total: Decimal,
    pub image_url: String,
    pub original_filename: String,
}

impl NewReceipt {
    /// Map a validated extraction onto a storable record for the given upload.
    pub fn from_extraction(extraction: AiReceiptResponse, file: &UploadedFile) -> Result<Self, AppError> {
        Ok(Self {
            date: extraction.date,
            currency: extraction.currency.to_uppercase(),
            vendor_name: extraction.vendor_name,
            receipt_items: extraction.receipt_items,
            tax: to_money("tax", extraction.tax)?,
            total: to_money("total", extraction.total)?,
            image_url: file.public_url(),
            original_filename: file.original_filename.clone(),
        })
    }
}

/// Convert a model-provided amount to a 2-decimal value, rounding half away from zero.
pub fn to_money(field: &str, value: f64) -> Result<Decimal, AppError> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero))
        .ok_or_else(|| AppError::Internal(format!("{} value {} cannot be stored", field, value)))
}

/// Persisted receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Receipt {
    pub id: Uuid,
    pub date: String,
    pub currency: String,
    pub vendor_name: String,
    #[cfg_attr(feature = "sqlx", sqlx(json))]
    pub receipt_items: Vec<ReceiptItem>,
    pub tax: Decimal,
    pub total: Decimal,
    pub image_url: String,
    pub original_filename: String,
    pub created_at: DateTime<Utc>,
}

/// Public view of a stored receipt (everything except the original filename).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReceiptResponse {
    pub id: Uuid,
    pub date: String,
    pub currency: String,
    pub vendor_name: String,
    pub receipt_items: Vec<ReceiptItem>,
    #[schema(value_type = f64)]
    pub tax: Decimal,
    #[schema(value_type = f64)]
    pub total: Decimal,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<Receipt> for ReceiptResponse {
    fn from(receipt: Receipt) -> Self {
        Self {
            id: receipt.id,
            date: receipt.date,
            currency: receipt.currency,
            vendor_name: receipt.vendor_name,
            receipt_items: receipt.receipt_items,
            tax: receipt.tax,
            total: receipt.total,
            image_url: receipt.image_url,
            created_at: receipt.created_at,
        }
    }
}
