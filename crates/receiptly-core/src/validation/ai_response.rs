//! Schema checks for the vision model's JSON output.
//!
//! Checks run in a fixed order and the first violation is reported; violations are
//! never aggregated.

use serde_json::{Map, Value};

use crate::error::AppError;
use crate::models::AiReceiptResponse;

/// Keys that must be present, checked in this order.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "date",
    "currency",
    "vendor_name",
    "receipt_items",
    "tax",
    "total",
];

const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from AI model";

type Check = fn(&Map<String, Value>) -> Result<(), String>;

/// Ordered checks applied once the response is known to be an object.
const CHECKS: [Check; 6] = [
    required_fields_present,
    items_is_array,
    items_not_empty,
    items_well_formed,
    currency_is_code,
    amounts_are_numbers,
];

/// Validate untyped model output and convert it into an [`AiReceiptResponse`].
pub fn verify_ai_response(response: &Value) -> Result<AiReceiptResponse, AppError> {
    let object = response
        .as_object()
        .ok_or_else(|| AppError::InvalidInput(INVALID_RESPONSE_MESSAGE.to_string()))?;

    if let Some(violation) = CHECKS.iter().find_map(|check| check(object).err()) {
        return Err(AppError::InvalidInput(violation));
    }

    // date and vendor_name are only required to be present; anything that is not a
    // string there still makes the record unusable.
    serde_json::from_value(response.clone())
        .map_err(|_| AppError::InvalidInput(INVALID_RESPONSE_MESSAGE.to_string()))
}

fn required_fields_present(object: &Map<String, Value>) -> Result<(), String> {
    match REQUIRED_FIELDS.iter().find(|field| !object.contains_key(**field)) {
        Some(field) => Err(format!("Missing required field: {}", field)),
        None => Ok(()),
    }
}

fn items_is_array(object: &Map<String, Value>) -> Result<(), String> {
    if object["receipt_items"].is_array() {
        Ok(())
    } else {
        Err("receipt_items must be an array".to_string())
    }
}

fn items_not_empty(object: &Map<String, Value>) -> Result<(), String> {
    match object["receipt_items"].as_array() {
        Some(items) if !items.is_empty() => Ok(()),
        _ => Err("receipt_items cannot be empty".to_string()),
    }
}

fn items_well_formed(object: &Map<String, Value>) -> Result<(), String> {
    let items = object["receipt_items"].as_array().map(Vec::as_slice).unwrap_or_default();
    let well_formed = |item: &Value| {
        let has_name = matches!(item.get("item_name"), Some(Value::String(name)) if !name.is_empty());
        let has_cost = item.get("item_cost").is_some_and(Value::is_number);
        has_name && has_cost
    };

    if items.iter().all(well_formed) {
        Ok(())
    } else {
        Err("Invalid receipt item format".to_string())
    }
}

fn currency_is_code(object: &Map<String, Value>) -> Result<(), String> {
    match object["currency"].as_str() {
        Some(code) if code.chars().count() == 3 => Ok(()),
        _ => Err("Currency must be a 3-character code".to_string()),
    }
}

fn amounts_are_numbers(object: &Map<String, Value>) -> Result<(), String> {
    if object["tax"].is_number() && object["total"].is_number() {
        Ok(())
    } else {
        Err("Tax and total must be numbers".to_string())
    }
}
