//! API constants

/// Receipt extraction endpoint
pub const RECEIPT_EXTRACT_PATH: &str = "/receipt/extract-receipt-details";

/// Multipart field carrying the receipt image
pub const UPLOAD_FIELD_NAME: &str = "file";

/// OpenAPI document and its RapiDoc viewer
pub const OPENAPI_JSON_PATH: &str = "/api/openapi.json";
pub const DOCS_PATH: &str = "/docs";

/// Headroom on top of the file size limit for multipart boundaries and headers.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub const DEFAULT_HTTP_CONCURRENCY_LIMIT: usize = 1024;
