//! Receiptly Storage Library
//!
//! Local filesystem storage for uploaded receipt images.
//!
//! # Layout
//!
//! Every upload is written directly under the configured upload directory as
//! `{uuid}.{ext}`, where `ext` is the lowercased extension of the client filename.
//! The same name is used in the public URL (`/uploads/{uuid}.{ext}`).

pub mod error;
pub mod guard;
pub mod local;

// Re-export commonly used types
pub use error::{StorageError, StorageResult};
pub use guard::UploadGuard;
pub use local::LocalUploadStore;
