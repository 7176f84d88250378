//! Receiptly Database Library
//!
//! Postgres access for stored receipts. Queries use runtime-checked SQLx so the
//! crate builds without a live `DATABASE_URL`.

pub mod db;

pub use db::*;
