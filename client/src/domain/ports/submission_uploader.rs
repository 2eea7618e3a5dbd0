//! Driven port for storing assignment submission files.

use async_trait::async_trait;

use super::define_port_error;

/// File attached to an assignment submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionFile {
    /// Original file name as chosen by the student.
    pub file_name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

define_port_error! {
    /// Errors surfaced while storing a submission file.
    pub enum SubmissionUploadError {
        /// Storage refused the file.
        Rejected { message: String } =>
            "submission upload rejected: {message}",
        /// Storage could not be reached.
        Unavailable { message: String } =>
            "submission storage unavailable: {message}",
    }
}

/// Port storing a file and returning the URL recorded with the submission.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionUploader: Send + Sync {
    /// Store `file` on behalf of `student_id`.
    async fn upload(
        &self,
        student_id: &str,
        file: &SubmissionFile,
    ) -> Result<String, SubmissionUploadError>;
}
