//! Model call plus mapping of every failure onto [`AppError::AiService`].

use std::sync::Arc;

use receiptly_core::AppError;
use serde_json::Value;

use crate::error::VisionError;
use crate::model::VisionModel;
use crate::prompt::ExtractionPrompt;

/// Sends a receipt image to a [`VisionModel`] and parses its answer as JSON.
///
/// The parsed value is untyped; schema checks happen in
/// [`receiptly_core::validation::verify_ai_response`].
#[derive(Clone)]
pub struct ExtractionClient {
    model: Arc<dyn VisionModel>,
}

impl ExtractionClient {
    pub fn new(model: Arc<dyn VisionModel>) -> Self {
        Self { model }
    }

    #[tracing::instrument(skip(self, image), fields(model = %self.model.name(), image_bytes = image.len()))]
    pub async fn extract(&self, image: &[u8]) -> Result<Value, AppError> {
        let prompt = ExtractionPrompt::from_image(image);

        let content = self
            .model
            .complete(&prompt)
            .await
            .map_err(map_vision_error)?;

        tracing::debug!(content = ?content, "AI response");

        let content = match content {
            Some(content) if !content.is_empty() => content,
            _ => {
                return Err(AppError::AiService(
                    "AI model returned empty response".to_string(),
                ))
            }
        };

        serde_json::from_str(&content).map_err(|e| {
            tracing::warn!(error = %e, "AI model output is not valid JSON");
            AppError::AiService("AI model returned invalid JSON response".to_string())
        })
    }
}

fn map_vision_error(err: VisionError) -> AppError {
    tracing::warn!(error = %err, "AI service call failed");
    match err.status() {
        Some(status) if err.is_server_error() => {
            AppError::AiService(format!("AI service returned {} status", status))
        }
        _ => AppError::AiService(format!("AI extraction failed: {}", err)),
    }
}
