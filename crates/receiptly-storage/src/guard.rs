//! Scoped cleanup for uploads that did not make it into a stored receipt.

use std::io::ErrorKind;
use std::path::PathBuf;

/// Removes an uploaded file when dropped, unless [`UploadGuard::keep`] was called.
///
/// # Example
///
/// ```ignore
/// let guard = UploadGuard::new(&file.path);
/// let receipt = run_pipeline(&file).await?; // early return drops the guard
/// guard.keep();
/// ```
#[derive(Debug)]
pub struct UploadGuard {
    path: Option<PathBuf>,
}

impl UploadGuard {
    /// Arm a guard for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Disarm the guard; the file stays on disk.
    pub fn keep(mut self) {
        self.path = None;
    }
}

impl Drop for UploadGuard {
    fn drop(&mut self) {
        let Some(path) = self.path.take() else {
            return;
        };

        // Blocking unlink on the current worker: one syscall, and the file is gone
        // before the error reaches the caller.
        match std::fs::remove_file(&path) {
            Ok(()) => tracing::debug!(path = %path.display(), "Removed upload after failure"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to remove upload after failure"
            ),
        }
    }
}
