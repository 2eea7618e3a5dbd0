//! `/api/assessments` table.

use serde_json::Value;

use crate::domain::{ClientError, QueryParams, SessionContext};

define_crud_table! {
    /// Assessments, filterable by batch, module, status, and so on.
    AssessmentsApi => "/api/assessments"
}

impl AssessmentsApi<'_> {
    /// `GET /api/assessments?{params}`.
    pub async fn get_all(
        &self,
        ctx: &SessionContext,
        params: &QueryParams,
    ) -> Result<Value, ClientError> {
        self.client
            .get(ctx, &params.apply_to("/api/assessments"))
            .await
    }
}
