//! Receiptly Core Library
//!
//! This crate provides the domain models, error types, configuration, and validation
//! rules shared by every Receiptly component.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, ReceiptServiceConfig};
pub use error::{AppError, ErrorKind, ErrorMetadata, LogLevel};
