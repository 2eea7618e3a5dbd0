//! Placeholder submission storage.
//!
//! No storage service exists yet, so files are not persisted. The adapter
//! hands back the key a real bucket would use so submissions still carry a
//! stable reference.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{SubmissionFile, SubmissionUploadError, SubmissionUploader};

/// Uploader that records `uploads/{millis}_{file_name}` without storing bytes.
#[derive(Clone)]
pub struct PlaceholderSubmissionUploader {
    clock: Arc<dyn Clock + Send + Sync>,
}

impl PlaceholderSubmissionUploader {
    /// Uploader stamping keys with `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { clock }
    }
}

#[async_trait]
impl SubmissionUploader for PlaceholderSubmissionUploader {
    async fn upload(
        &self,
        student_id: &str,
        file: &SubmissionFile,
    ) -> Result<String, SubmissionUploadError> {
        let file_name = file.file_name.trim();
        if file_name.is_empty() || file_name.contains('/') {
            return Err(SubmissionUploadError::rejected(format!(
                "unusable file name {:?}",
                file.file_name
            )));
        }
        let key = format!("uploads/{}_{file_name}", self.clock.utc().timestamp_millis());
        info!(student_id, key = %key, size = file.bytes.len(), "submission file accepted");
        Ok(key)
    }
}
