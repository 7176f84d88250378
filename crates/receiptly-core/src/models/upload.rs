//! Uploaded file model.

use std::path::PathBuf;

use crate::constants::UPLOADS_URL_PREFIX;

/// A receipt image accepted by the upload layer and written to local disk.
///
/// Owned by exactly one request. Removed again if extraction fails, kept (and served)
/// if it succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Filename as sent by the client
    pub original_filename: String,
    /// MIME type declared by the client (not sniffed)
    pub content_type: String,
    /// Server-generated filename on disk (`<uuid>.<ext>`)
    pub filename: String,
    /// Full path of the stored file
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
}

impl UploadedFile {
    /// Public URL under which the stored file is served.
    pub fn public_url(&self) -> String {
        format!("{}/{}", UPLOADS_URL_PREFIX, self.filename)
    }
}
