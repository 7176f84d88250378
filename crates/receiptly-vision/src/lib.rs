//! Receiptly Vision Library
//!
//! Talks to the vision-capable language model that reads receipt images.
//!
//! - [`prompt`]: the fixed extraction instruction and base64 image payload
//! - [`model`]: the [`VisionModel`] seam, one prompt in, raw completion text out
//! - [`openai`]: chat-completions implementation of [`VisionModel`]
//! - [`extraction`]: turns a completion into untyped JSON and maps failures to [`AppError`]
//!
//! [`AppError`]: receiptly_core::AppError

pub mod error;
pub mod extraction;
pub mod model;
pub mod openai;
pub mod prompt;

pub use error::VisionError;
pub use extraction::ExtractionClient;
pub use model::VisionModel;
pub use openai::{OpenAiVisionModel, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
pub use prompt::{ExtractionPrompt, EXTRACTION_INSTRUCTION};
