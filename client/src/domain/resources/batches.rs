//! `/api/batches` table.

use serde_json::Value;

use crate::domain::{ClientError, SessionContext};

define_crud_table! {
    /// Student batches (cohorts).
    BatchesApi => "/api/batches"
}

impl BatchesApi<'_> {
    /// `GET /api/batches`.
    pub async fn get_all(&self, ctx: &SessionContext) -> Result<Value, ClientError> {
        self.client.get(ctx, "/api/batches").await
    }
}
