//! End-to-end tests for `POST /receipt/extract-receipt-details`.

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use base64::Engine;
use helpers::{setup_test_app, TestApp, MAX_FILE_SIZE_BYTES, VALID_AI_RESPONSE};
use receiptly_vision::VisionError;
use serde_json::{json, Value};

const EXTRACT_PATH: &str = "/receipt/extract-receipt-details";
const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

fn image_form(filename: &str, mime: &str, data: Vec<u8>) -> MultipartForm {
    let part = Part::bytes(data).file_name(filename).mime_type(mime);
    MultipartForm::new().add_part("file", part)
}

async fn upload(app: &TestApp, form: MultipartForm) -> axum_test::TestResponse {
    app.client().post(EXTRACT_PATH).multipart(form).await
}

async fn upload_jpeg(app: &TestApp) -> axum_test::TestResponse {
    upload(
        app,
        image_form("test-receipt.jpg", "image/jpeg", JPEG_BYTES.to_vec()),
    )
    .await
}

fn assert_error(body: &Value, kind: &str, message: &str) {
    assert_eq!(body["kind"], kind, "{body}");
    assert_eq!(body["error"], message, "{body}");
}

#[tokio::test]
async fn test_extracts_and_stores_receipt() {
    let app = setup_test_app().await;
    app.model.answer(VALID_AI_RESPONSE);

    let response = upload_jpeg(&app).await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["currency"], "USD");
    assert_eq!(body["total"], json!(12.09));
    assert_eq!(body["tax"], json!(1.1));
    assert_eq!(body["date"], "2023-12-01");
    assert_eq!(body["vendor_name"], "Test Store");
    assert_eq!(
        body["receipt_items"],
        json!([{"item_name": "Test Item", "item_cost": 10.99}])
    );
    assert!(body.get("original_filename").is_none());
    assert!(body["created_at"].is_string());

    let stored = app.store.all();
    assert_eq!(stored.len(), 1);
    let receipt = &stored[0];
    assert_eq!(body["id"], receipt.id.to_string());
    assert_eq!(receipt.currency, "USD");
    assert_eq!(receipt.original_filename, "test-receipt.jpg");

    // The kept upload is the one the image_url points at.
    let files = app.stored_files();
    assert_eq!(files.len(), 1);
    let stored_name = files[0].file_name().unwrap().to_str().unwrap().to_string();
    assert!(stored_name.ends_with(".jpg"));
    assert_eq!(receipt.image_url, format!("/uploads/{}", stored_name));
    assert_eq!(body["image_url"], receipt.image_url);
    assert_eq!(std::fs::read(&files[0]).unwrap(), JPEG_BYTES);
}

#[tokio::test]
async fn test_sends_image_as_jpeg_data_url() {
    let app = setup_test_app().await;
    app.model.answer(VALID_AI_RESPONSE);

    let png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    let response = upload(&app, image_form("scan.png", "image/png", png.clone())).await;
    assert_eq!(response.status_code(), 200);

    let prompt = app.model.last_prompt().unwrap();
    let encoded = base64::engine::general_purpose::STANDARD.encode(&png);
    assert_eq!(prompt.data_url(), format!("data:image/jpeg;base64,{}", encoded));
    assert!(prompt.instruction.contains("receipt_items"));
}

#[tokio::test]
async fn test_stored_image_is_served() {
    let app = setup_test_app().await;
    app.model.answer(VALID_AI_RESPONSE);

    let body: Value = upload_jpeg(&app).await.json();
    let image_url = body["image_url"].as_str().unwrap();

    let image = app.client().get(image_url).await;
    assert_eq!(image.status_code(), 200);
    assert_eq!(image.as_bytes().as_ref(), JPEG_BYTES);
}

#[tokio::test]
async fn test_rejects_disallowed_file_type() {
    let app = setup_test_app().await;

    let response = upload(
        &app,
        image_form("receipt.pdf", "application/pdf", b"%PDF-1.4".to_vec()),
    )
    .await;

    assert_eq!(response.status_code(), 400);
    assert_error(
        &response.json(),
        "invalid_input",
        "Only .jpg, .jpeg, and .png files are allowed",
    );
    assert_eq!(app.model.calls(), 0);
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_rejects_disallowed_declared_type_with_allowed_extension() {
    let app = setup_test_app().await;

    let response = upload(&app, image_form("receipt.jpg", "image/gif", JPEG_BYTES.to_vec())).await;

    assert_eq!(response.status_code(), 400);
    assert_error(
        &response.json(),
        "invalid_input",
        "Only .jpg, .jpeg, and .png files are allowed",
    );
    assert_eq!(app.model.calls(), 0);
}

#[tokio::test]
async fn test_requires_file() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_text("note", "no image here");
    let response = upload(&app, form).await;
    assert_eq!(response.status_code(), 400);
    assert_error(&response.json(), "invalid_input", "No file provided");

    let response = app.client().post(EXTRACT_PATH).await;
    assert_eq!(response.status_code(), 400);
    assert_error(&response.json(), "invalid_input", "No file provided");

    assert_eq!(app.model.calls(), 0);
}

#[tokio::test]
async fn test_rejects_second_file_field() {
    let app = setup_test_app().await;

    let form = image_form("a.jpg", "image/jpeg", JPEG_BYTES.to_vec()).add_part(
        "file",
        Part::bytes(JPEG_BYTES.to_vec())
            .file_name("b.jpg")
            .mime_type("image/jpeg"),
    );
    let response = upload(&app, form).await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["kind"], "invalid_input");
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_rejects_oversized_file() {
    let app = setup_test_app().await;

    let response = upload(
        &app,
        image_form("big.jpg", "image/jpeg", vec![0u8; MAX_FILE_SIZE_BYTES + 1]),
    )
    .await;

    assert_eq!(response.status_code(), 413);
    assert_eq!(response.json::<Value>()["kind"], "invalid_input");
    assert!(app.stored_files().is_empty());
    assert_eq!(app.model.calls(), 0);
}

#[tokio::test]
async fn test_oversized_file_of_wrong_type_is_a_type_error() {
    let app = setup_test_app().await;

    let response = upload(
        &app,
        image_form(
            "big.pdf",
            "application/pdf",
            vec![0u8; MAX_FILE_SIZE_BYTES + 1],
        ),
    )
    .await;

    assert_eq!(response.status_code(), 400);
    assert_error(
        &response.json(),
        "invalid_input",
        "Only .jpg, .jpeg, and .png files are allowed",
    );
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_missing_field_is_reported_and_upload_removed() {
    let app = setup_test_app().await;
    let mut answer: Value = serde_json::from_str(VALID_AI_RESPONSE).unwrap();
    answer.as_object_mut().unwrap().remove("total");
    app.model.answer(&answer.to_string());

    let response = upload_jpeg(&app).await;

    assert_eq!(response.status_code(), 400);
    assert_error(&response.json(), "invalid_input", "Missing required field: total");
    assert!(app.stored_files().is_empty());
    assert!(app.store.all().is_empty());
}

#[tokio::test]
async fn test_empty_items_are_rejected() {
    let app = setup_test_app().await;
    let mut answer: Value = serde_json::from_str(VALID_AI_RESPONSE).unwrap();
    answer["receipt_items"] = json!([]);
    app.model.answer(&answer.to_string());

    let response = upload_jpeg(&app).await;

    assert_eq!(response.status_code(), 400);
    assert_error(&response.json(), "invalid_input", "receipt_items cannot be empty");
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_ai_server_error_removes_upload() {
    let app = setup_test_app().await;
    app.model.push(Err(VisionError::Status {
        status: 500,
        message: "Internal Server Error".to_string(),
    }));

    let response = upload_jpeg(&app).await;

    assert_eq!(response.status_code(), 500);
    assert_error(&response.json(), "server_error", "AI service returned 500 status");
    assert!(app.stored_files().is_empty());
    assert!(app.store.all().is_empty());
}

#[tokio::test]
async fn test_invalid_json_from_model() {
    let app = setup_test_app().await;
    app.model.answer("Sure! Here is your receipt: {date: 2023-12-01}");

    let response = upload_jpeg(&app).await;

    assert_eq!(response.status_code(), 500);
    assert_error(
        &response.json(),
        "server_error",
        "AI model returned invalid JSON response",
    );
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_empty_model_response() {
    let app = setup_test_app().await;
    app.model.push(Ok(None));

    let response = upload_jpeg(&app).await;

    assert_eq!(response.status_code(), 500);
    assert_error(&response.json(), "server_error", "AI model returned empty response");
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_transport_failure() {
    let app = setup_test_app().await;
    app.model.push(Err(VisionError::Transport("connection reset".to_string())));

    let response = upload_jpeg(&app).await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["kind"], "server_error");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("AI extraction failed: "));
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_persistence_failure_removes_upload() {
    let app = setup_test_app().await;
    app.model.answer(VALID_AI_RESPONSE);
    app.store.fail_writes();

    let response = upload_jpeg(&app).await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(response.json::<Value>()["kind"], "server_error");
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_each_request_gets_its_own_upload() {
    let app = setup_test_app().await;
    app.model.answer(VALID_AI_RESPONSE);
    app.model.answer(VALID_AI_RESPONSE);

    let first: Value = upload_jpeg(&app).await.json();
    let second: Value = upload_jpeg(&app).await.json();

    assert_ne!(first["id"], second["id"]);
    assert_ne!(first["image_url"], second["image_url"]);
    assert_eq!(app.stored_files().len(), 2);
    assert_eq!(app.model.calls(), 2);
}
