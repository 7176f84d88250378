pub mod receipt_extract;
