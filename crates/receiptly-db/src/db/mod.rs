//! Database repositories for data access layer
//
// Receipt repository and its storage seam
pub mod receipt;

pub use receipt::{ReceiptRepository, ReceiptStore};
