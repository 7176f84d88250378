//! Domain route groups.

use crate::constants::RECEIPT_EXTRACT_PATH;
use crate::handlers;
use crate::state::AppState;
use axum::routing::post;
use axum::Router;
use std::sync::Arc;

pub fn receipt_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        RECEIPT_EXTRACT_PATH,
        post(handlers::receipt_extract::extract_receipt_details),
    )
}
