//! `/api/admin` actions. Approval rules live in the backend.

use serde_json::{Value, json};

use crate::domain::{ApiClient, ClientError, SessionContext};

/// Administrative approval queue.
#[derive(Clone, Copy)]
pub struct AdminApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AdminApi<'a> {
    pub(crate) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Students awaiting approval.
    pub async fn get_pending_students(&self, ctx: &SessionContext) -> Result<Value, ClientError> {
        self.client.get(ctx, "/api/admin/pending-students").await
    }

    /// Educators awaiting approval.
    pub async fn get_pending_educators(&self, ctx: &SessionContext) -> Result<Value, ClientError> {
        self.client.get(ctx, "/api/admin/pending-educators").await
    }

    /// Approve a student; body `{"studentId": ...}`.
    pub async fn approve_student(
        &self,
        ctx: &SessionContext,
        student_id: &str,
    ) -> Result<Value, ClientError> {
        self.client
            .post(
                ctx,
                "/api/admin/approve-student",
                &json!({ "studentId": student_id }),
            )
            .await
    }

    /// Approve an educator; body `{"educatorId": ...}`.
    pub async fn approve_educator(
        &self,
        ctx: &SessionContext,
        educator_id: &str,
    ) -> Result<Value, ClientError> {
        self.client
            .post(
                ctx,
                "/api/admin/approve-educator",
                &json!({ "educatorId": educator_id }),
            )
            .await
    }

    /// Reject any pending user; body `{"userId": ...}`.
    pub async fn reject_user(
        &self,
        ctx: &SessionContext,
        user_id: &str,
    ) -> Result<Value, ClientError> {
        self.client
            .post(ctx, "/api/admin/reject-user", &json!({ "userId": user_id }))
            .await
    }
}
