//! Student endpoints, including the current student's own views.

use serde::Serialize;
use serde_json::Value;

use crate::domain::{ApiClient, ClientError, SessionContext};

/// Students table.
#[derive(Clone, Copy)]
pub struct StudentsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> StudentsApi<'a> {
    pub(crate) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /api/students`.
    pub async fn get_all(&self, ctx: &SessionContext) -> Result<Value, ClientError> {
        self.client.get(ctx, "/api/students").await
    }

    /// `GET /api/student/dashboard` for the session user.
    pub async fn get_dashboard(&self, ctx: &SessionContext) -> Result<Value, ClientError> {
        self.client.get(ctx, "/api/student/dashboard").await
    }

    /// `GET /api/student/enrollments` for the session user.
    pub async fn get_enrollments(&self, ctx: &SessionContext) -> Result<Value, ClientError> {
        self.client.get(ctx, "/api/student/enrollments").await
    }

    /// `GET /api/me`.
    pub async fn get_profile(&self, ctx: &SessionContext) -> Result<Value, ClientError> {
        self.client.get(ctx, "/api/me").await
    }

    /// `GET /api/student/active-assignments` for the session user.
    pub async fn get_active_assignments(
        &self,
        ctx: &SessionContext,
    ) -> Result<Value, ClientError> {
        self.client.get(ctx, "/api/student/active-assignments").await
    }

    /// `POST /api/students`.
    pub async fn create<T>(&self, ctx: &SessionContext, data: &T) -> Result<Value, ClientError>
    where
        T: Serialize + ?Sized,
    {
        self.client.post(ctx, "/api/students", data).await
    }

    /// `DELETE /api/students/{id}`.
    pub async fn delete(&self, ctx: &SessionContext, id: &str) -> Result<Value, ClientError> {
        self.client.delete(ctx, &format!("/api/students/{id}")).await
    }
}
