//! Extraction prompt construction

use base64::Engine;

/// Instruction sent alongside every receipt image.
pub const EXTRACTION_INSTRUCTION: &str = r#"Please extract the following fields from the provided receipt image and output only a single JSON object (no extra text or formatting):

{
  "date": "YYYY-MM-DD",
  "currency": "3-letter currency code (e.g. USD, EUR, GBP)",
  "vendor_name": "String",
  "receipt_items": [
    {
      "item_name": "String",
      "item_cost": Number
    }
  ],
  "tax": Number,
  "total": Number
}"#;

/// Media type placed in the data URL. Always JPEG, whatever the upload was.
const DATA_URL_MEDIA_TYPE: &str = "image/jpeg";

/// One extraction request: the fixed instruction plus the base64-encoded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionPrompt {
    pub instruction: &'static str,
    pub image_base64: String,
}

impl ExtractionPrompt {
    pub fn from_image(bytes: &[u8]) -> Self {
        Self {
            instruction: EXTRACTION_INSTRUCTION,
            image_base64: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    /// `data:image/jpeg;base64,<payload>`
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", DATA_URL_MEDIA_TYPE, self.image_base64)
    }
}
