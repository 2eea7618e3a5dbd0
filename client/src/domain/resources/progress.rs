//! `/api/student-progress` table.

use serde::Serialize;
use serde_json::Value;

use crate::domain::{ApiClient, ClientError, QueryParams, SessionContext};

const BASE: &str = "/api/student-progress";

/// Student progress records (scores and submissions).
#[derive(Clone, Copy)]
pub struct ProgressApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ProgressApi<'a> {
    pub(crate) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Progress entries matching `params` (e.g. `moduleId`).
    pub async fn get(
        &self,
        ctx: &SessionContext,
        params: &QueryParams,
    ) -> Result<Value, ClientError> {
        self.client.get(ctx, &params.apply_to(BASE)).await
    }

    /// All progress entries of one student.
    pub async fn get_student_progress(
        &self,
        ctx: &SessionContext,
        student_id: &str,
    ) -> Result<Value, ClientError> {
        let params = QueryParams::new().with("studentId", student_id);
        self.client.get(ctx, &params.apply_to(BASE)).await
    }

    /// Record a new progress entry.
    pub async fn record<T>(&self, ctx: &SessionContext, data: &T) -> Result<Value, ClientError>
    where
        T: Serialize + ?Sized,
    {
        self.client.post(ctx, BASE, data).await
    }

    /// Replace an existing progress entry.
    pub async fn update<T>(
        &self,
        ctx: &SessionContext,
        id: &str,
        data: &T,
    ) -> Result<Value, ClientError>
    where
        T: Serialize + ?Sized,
    {
        self.client.put(ctx, &format!("{BASE}/{id}"), data).await
    }
}
