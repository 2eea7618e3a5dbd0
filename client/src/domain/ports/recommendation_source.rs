//! Driven port for the external ML study-planner service.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{ClientError, SessionContext};

/// Port returning raw planner recommendations for one student.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    /// Fetch the recommendation document for `student_id`.
    async fn planner_for(
        &self,
        ctx: &SessionContext,
        student_id: &str,
    ) -> Result<Value, ClientError>;
}

/// Fixture source returning an empty recommendation document.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureRecommendationSource;

#[async_trait]
impl RecommendationSource for FixtureRecommendationSource {
    async fn planner_for(
        &self,
        _ctx: &SessionContext,
        _student_id: &str,
    ) -> Result<Value, ClientError> {
        Ok(Value::Object(serde_json::Map::new()))
    }
}
