//! `/api/courses` table.

use serde_json::Value;

use crate::domain::{ClientError, SessionContext};

define_crud_table! {
    /// Courses offered on the platform.
    CoursesApi => "/api/courses"
}

impl CoursesApi<'_> {
    /// `GET /api/courses`.
    pub async fn get_all(&self, ctx: &SessionContext) -> Result<Value, ClientError> {
        self.client.get(ctx, "/api/courses").await
    }
}
