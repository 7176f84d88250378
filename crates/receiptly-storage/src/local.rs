use std::path::{Path, PathBuf};

use receiptly_core::models::UploadedFile;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::{StorageError, StorageResult};
use crate::guard::UploadGuard;

/// Local filesystem store for receipt uploads
#[derive(Clone, Debug)]
pub struct LocalUploadStore {
    base_path: PathBuf,
}

impl LocalUploadStore {
    /// Create a store rooted at `base_path`, creating the directory if needed.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create upload directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalUploadStore { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Generate the on-disk name for an upload: a fresh UUID plus the client's extension.
    fn generate_filename(original_filename: &str) -> String {
        let id = Uuid::new_v4();
        match Path::new(original_filename)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(ext) if !ext.is_empty() => format!("{}.{}", id, ext.to_lowercase()),
            _ => id.to_string(),
        }
    }

    /// Write an upload to disk and describe it as an [`UploadedFile`].
    pub async fn save(
        &self,
        original_filename: &str,
        content_type: &str,
        data: &[u8],
    ) -> StorageResult<UploadedFile> {
        let filename = Self::generate_filename(original_filename);
        let path = self.base_path.join(&filename);
        let start = std::time::Instant::now();

        write_new_file(&path, data).await?;

        tracing::info!(
            path = %path.display(),
            original_filename = %original_filename,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Upload stored"
        );

        Ok(UploadedFile {
            original_filename: original_filename.to_string(),
            content_type: content_type.to_string(),
            filename,
            path,
            size: data.len() as u64,
        })
    }

    /// Read the full contents of a stored upload.
    pub async fn read(&self, file: &UploadedFile) -> StorageResult<Vec<u8>> {
        if !fs::try_exists(&file.path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(file.filename.clone()));
        }

        fs::read(&file.path).await.map_err(|e| {
            StorageError::ReadFailed(format!("Failed to read file {}: {}", file.path.display(), e))
        })
    }
}

/// Create `path` and fill it with `data`. A partially written file is removed on failure.
async fn write_new_file(path: &Path, data: &[u8]) -> StorageResult<()> {
    let mut file = fs::File::create(path).await.map_err(|e| {
        StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let guard = UploadGuard::new(path);

    // tokio reports a failed background write on the next flush.
    let written = match file.write_all(data).await {
        Ok(()) => file.flush().await,
        Err(e) => Err(e),
    };
    written.map_err(|e| {
        StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
    })?;

    file.sync_all().await.map_err(|e| {
        StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
    })?;

    guard.keep();
    Ok(())
}
