//! Recommendation source reading the ML planner service.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ports::RecommendationSource;
use crate::domain::{ApiClient, ClientError, SessionContext};

/// Fetches `GET /planner/{student_id}` through an [`ApiClient`] pointed at
/// the recommendation service origin.
#[derive(Clone)]
pub struct ApiRecommendationSource {
    client: ApiClient,
}

impl ApiRecommendationSource {
    /// Source issuing calls through `client`.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecommendationSource for ApiRecommendationSource {
    async fn planner_for(
        &self,
        ctx: &SessionContext,
        student_id: &str,
    ) -> Result<Value, ClientError> {
        self.client
            .get(ctx, &format!("/planner/{student_id}"))
            .await
    }
}
