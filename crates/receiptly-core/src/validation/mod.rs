//! Validation modules

pub mod ai_response;
pub mod file;

pub use ai_response::{verify_ai_response, REQUIRED_FIELDS};
pub use file::{validate_file_format, INVALID_FILE_TYPE_MESSAGE};
