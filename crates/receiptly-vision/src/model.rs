use async_trait::async_trait;

use crate::error::VisionError;
use crate::prompt::ExtractionPrompt;

/// A vision-capable model that answers an extraction prompt.
///
/// Implementations perform exactly one remote call per invocation and never retry.
/// `Ok(None)` means the provider answered but produced no message content.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Model identifier, for logs
    fn name(&self) -> &str;

    async fn complete(&self, prompt: &ExtractionPrompt) -> Result<Option<String>, VisionError>;
}
