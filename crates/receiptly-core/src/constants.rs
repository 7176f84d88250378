//! Constants shared across crates.

/// Public path prefix under which stored uploads are served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Declared media types accepted for receipt images.
pub const ALLOWED_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

/// File extensions accepted for receipt images (lowercase, without dot).
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Default upload size limit in megabytes.
pub const DEFAULT_MAX_FILE_SIZE_MB: usize = 10;
