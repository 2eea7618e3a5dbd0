//! `/api/modules` table.

use serde_json::Value;

use crate::domain::{ClientError, SessionContext};

define_crud_table! {
    /// Learning modules.
    ModulesApi => "/api/modules"
}

impl ModulesApi<'_> {
    /// `GET /api/modules`.
    pub async fn get_all(&self, ctx: &SessionContext) -> Result<Value, ClientError> {
        self.client.get(ctx, "/api/modules").await
    }
}
