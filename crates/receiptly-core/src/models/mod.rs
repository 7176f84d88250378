//! Data models for the application
//!
//! Each sub-module represents a specific feature area.

mod receipt;
mod upload;

// Re-export all models for convenient imports
pub use receipt::*;
pub use upload::*;
