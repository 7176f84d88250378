pub mod receipt_extraction;

pub use receipt_extraction::ReceiptExtractionService;
