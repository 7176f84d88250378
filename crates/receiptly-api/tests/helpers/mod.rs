//! Test helpers: build AppState and router for end-to-end handler tests.
//!
//! The database and the vision model are replaced by in-memory fakes; uploads go to
//! a temporary directory. Run with `cargo test -p receiptly-api`.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use receiptly_api::setup::routes::setup_routes;
use receiptly_api::AppState;
use receiptly_core::models::{NewReceipt, Receipt};
use receiptly_core::{AppError, BaseConfig, Config, ReceiptServiceConfig};
use receiptly_db::ReceiptStore;
use receiptly_storage::LocalUploadStore;
use receiptly_vision::{ExtractionClient, ExtractionPrompt, VisionError, VisionModel};
use tempfile::TempDir;

pub const MAX_FILE_SIZE_BYTES: usize = 1024 * 1024;

/// Model output used by the happy-path tests.
pub const VALID_AI_RESPONSE: &str = r#"{"date":"2023-12-01","currency":"usd","vendor_name":"Test Store","receipt_items":[{"item_name":"Test Item","item_cost":10.99}],"tax":1.10,"total":12.09}"#;

/// Receipt store backed by a vector.
#[derive(Default)]
pub struct InMemoryReceiptStore {
    receipts: Mutex<Vec<Receipt>>,
    fail: AtomicBool,
}

impl InMemoryReceiptStore {
    pub fn fail_writes(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn all(&self) -> Vec<Receipt> {
        self.receipts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReceiptStore for InMemoryReceiptStore {
    async fn create(&self, receipt: NewReceipt) -> Result<Receipt, AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Storage("receipts table unavailable".to_string()));
        }

        let stored = Receipt {
            id: uuid::Uuid::new_v4(),
            date: receipt.date,
            currency: receipt.currency,
            vendor_name: receipt.vendor_name,
            receipt_items: receipt.receipt_items,
            tax: receipt.tax,
            total: receipt.total,
            image_url: receipt.image_url,
            original_filename: receipt.original_filename,
            created_at: chrono::Utc::now(),
        };
        self.receipts.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn ping(&self) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Storage("receipts table unavailable".to_string()));
        }
        Ok(())
    }
}

/// Vision model that replays queued answers in order.
#[derive(Default)]
pub struct ScriptedModel {
    answers: Mutex<VecDeque<Result<Option<String>, VisionError>>>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<ExtractionPrompt>>,
}

impl ScriptedModel {
    pub fn answer(&self, content: &str) {
        self.push(Ok(Some(content.to_string())));
    }

    pub fn push(&self, answer: Result<Option<String>, VisionError>) {
        self.answers.lock().unwrap().push_back(answer);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<ExtractionPrompt> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisionModel for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, prompt: &ExtractionPrompt) -> Result<Option<String>, VisionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.clone());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(VisionError::Transport("no scripted answer".to_string())))
    }
}

/// Test application: server plus handles on the fakes.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<InMemoryReceiptStore>,
    pub model: Arc<ScriptedModel>,
    pub upload_dir: PathBuf,
    _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Files currently in the upload directory.
    pub fn stored_files(&self) -> Vec<PathBuf> {
        list_files(&self.upload_dir)
    }
}

fn list_files(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .expect("Failed to read upload directory")
        .map(|entry| entry.expect("Failed to read entry").path())
        .collect()
}

pub fn create_test_config(upload_dir: &Path) -> Config {
    Config(Box::new(ReceiptServiceConfig {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["http://localhost:3000".to_string()],
            db_max_connections: 1,
            db_timeout_seconds: 1,
            environment: "test".to_string(),
        },
        database_url: "postgresql://unused@localhost/receipts".to_string(),
        openai_api_key: "sk-test".to_string(),
        openai_base_url: "http://localhost:1".to_string(),
        upload_dir: upload_dir.to_path_buf(),
        max_file_size_bytes: MAX_FILE_SIZE_BYTES,
    }))
}

/// Setup test app with in-memory store, scripted model and a temp upload dir.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let upload_dir = temp_dir.path().join("uploads");

    let config = create_test_config(&upload_dir);
    let uploads = LocalUploadStore::new(&upload_dir)
        .await
        .expect("Failed to create upload store");

    let store = Arc::new(InMemoryReceiptStore::default());
    let model = Arc::new(ScriptedModel::default());

    let state = Arc::new(AppState::new(
        config.clone(),
        store.clone(),
        uploads,
        ExtractionClient::new(model.clone()),
    ));

    let router = setup_routes(&config, state).expect("Failed to build routes");
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        store,
        model,
        upload_dir,
        _temp_dir: temp_dir,
    }
}
