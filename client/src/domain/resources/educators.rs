//! `/api/educators` table.

use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::{ApiClient, ClientError, HttpMethod, SessionContext};

/// Educators and what they teach.
#[derive(Clone, Copy)]
pub struct EducatorsApi<'a> {
    client: &'a ApiClient,
}

fn modules_of(id: &str) -> String {
    format!("/api/educators/{id}/modules")
}

impl<'a> EducatorsApi<'a> {
    pub(crate) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /api/educators`.
    pub async fn get_all(&self, ctx: &SessionContext) -> Result<Value, ClientError> {
        self.client.get(ctx, "/api/educators").await
    }

    /// `POST /api/educators`.
    pub async fn create<T>(&self, ctx: &SessionContext, data: &T) -> Result<Value, ClientError>
    where
        T: Serialize + ?Sized,
    {
        self.client.post(ctx, "/api/educators", data).await
    }

    /// `DELETE /api/educators/{id}`.
    pub async fn delete(&self, ctx: &SessionContext, id: &str) -> Result<Value, ClientError> {
        self.client.delete(ctx, &format!("/api/educators/{id}")).await
    }

    /// Modules taught by educator `id`.
    pub async fn get_modules(&self, ctx: &SessionContext, id: &str) -> Result<Value, ClientError> {
        self.client.get(ctx, &modules_of(id)).await
    }

    /// Assign modules; body `{"moduleIds": [...]}`.
    pub async fn assign_modules(
        &self,
        ctx: &SessionContext,
        id: &str,
        module_ids: &[String],
    ) -> Result<Value, ClientError> {
        self.client
            .post(ctx, &modules_of(id), &json!({ "moduleIds": module_ids }))
            .await
    }

    /// Remove modules; `DELETE` carrying body `{"moduleIds": [...]}`.
    pub async fn remove_modules(
        &self,
        ctx: &SessionContext,
        id: &str,
        module_ids: &[String],
    ) -> Result<Value, ClientError> {
        self.client
            .send_json(
                ctx,
                HttpMethod::Delete,
                &modules_of(id),
                &json!({ "moduleIds": module_ids }),
            )
            .await
    }

    /// Students taught by educator `id`.
    pub async fn get_students(&self, ctx: &SessionContext, id: &str) -> Result<Value, ClientError> {
        self.client
            .get(ctx, &format!("/api/educators/{id}/students"))
            .await
    }

    /// Assessments owned by educator `id`.
    pub async fn get_assessments(
        &self,
        ctx: &SessionContext,
        id: &str,
    ) -> Result<Value, ClientError> {
        self.client
            .get(ctx, &format!("/api/educators/{id}/assessments"))
            .await
    }
}
