//! Receiptly API Library
//!
//! HTTP surface of the receipt extraction service: handlers, the extraction
//! pipeline, middleware wiring and application setup.

// Module declarations
mod api_doc;
pub mod constants;
mod handlers;
pub mod services;
pub mod setup;
mod utils;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::ReceiptExtractionService;
pub use state::AppState;
