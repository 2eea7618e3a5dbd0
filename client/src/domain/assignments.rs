//! Assignment detail loading and submission recording.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use serde_json::Value;

use crate::domain::ports::{SubmissionFile, SubmissionUploader};
use crate::domain::{ApiClient, ClientError, QueryParams, SessionContext};

/// Status recorded with every new submission; grading happens later.
pub const SUBMITTED_STATUS: &str = "submitted";

/// Everything the assignment page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentDetail {
    /// The template document (`assignmentTemplate` field of the response).
    pub assignment: Value,
    /// The owning module (`module` field of the response).
    pub module: Value,
    /// The student's progress entry for this assignment, if any.
    pub progress: Option<Value>,
}

/// Student input for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionDraft {
    /// Module the assignment belongs to.
    pub module_id: String,
    /// Assignment template id.
    pub assignment_id: String,
    /// Free-text answer; surrounding whitespace is dropped.
    pub text: String,
    /// Optional attached file.
    pub file: Option<SubmissionFile>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressSubmission<'a> {
    student_id: &'a str,
    module_id: &'a str,
    assignment_id: &'a str,
    score: u32,
    submission_data: SubmissionData<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmissionData<'a> {
    submission: &'a str,
    file_url: Option<String>,
    submitted_at: DateTime<Utc>,
    status: &'static str,
}

/// Loads assignment pages and records submissions as progress entries.
#[derive(Clone)]
pub struct AssignmentService {
    client: ApiClient,
    uploader: Arc<dyn SubmissionUploader>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl AssignmentService {
    /// Service over `client`, storing files through `uploader`.
    #[must_use]
    pub fn new(
        client: ApiClient,
        uploader: Arc<dyn SubmissionUploader>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            client,
            uploader,
            clock,
        }
    }

    /// Fetch template, module, and module progress concurrently.
    pub async fn load(
        &self,
        ctx: &SessionContext,
        module_id: &str,
        assignment_id: &str,
    ) -> Result<AssignmentDetail, ClientError> {
        let params = QueryParams::new().with("moduleId", module_id);
        let templates = self.client.assignment_templates();
        let modules = self.client.modules();
        let progress = self.client.progress();
        let (template, module, progress) = tokio::try_join!(
            templates.get_by_id(ctx, module_id, assignment_id),
            modules.get_by_id(ctx, module_id),
            progress.get(ctx, &params),
        )?;

        Ok(AssignmentDetail {
            assignment: field(&template, "assignmentTemplate"),
            module: field(&module, "module"),
            progress: progress
                .get("progress")
                .and_then(Value::as_array)
                .and_then(|entries| {
                    entries.iter().find(|entry| {
                        entry.get("assignmentId").and_then(Value::as_str) == Some(assignment_id)
                    })
                })
                .cloned(),
        })
    }

    /// Upload any file and record the submission with a zero score.
    ///
    /// A draft with neither text nor a file is rejected before any I/O.
    pub async fn submit(
        &self,
        ctx: &SessionContext,
        draft: &SubmissionDraft,
    ) -> Result<Value, ClientError> {
        let text = draft.text.trim();
        if text.is_empty() && draft.file.is_none() {
            return Err(ClientError::validation(
                "provide a submission or upload a file",
            ));
        }
        let session = self.client.ensure_authenticated(ctx)?;

        let file_url = match &draft.file {
            Some(file) => Some(self.uploader.upload(session.user_id(), file).await?),
            None => None,
        };
        let payload = ProgressSubmission {
            student_id: session.user_id(),
            module_id: &draft.module_id,
            assignment_id: &draft.assignment_id,
            score: 0,
            submission_data: SubmissionData {
                submission: text,
                file_url,
                submitted_at: self.clock.utc(),
                status: SUBMITTED_STATUS,
            },
        };
        self.client.progress().record(ctx, &payload).await
    }
}

fn field(document: &Value, key: &str) -> Value {
    document.get(key).cloned().unwrap_or(Value::Null)
}
