//! Personalised study planner built from ML recommendations.
//!
//! Unlike the access layer, this service recovers: when the recommendation
//! service fails the student still gets a generic plan, tagged as a fallback
//! so the caller can say so.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::domain::ports::RecommendationSource;
use crate::domain::{ClientError, SessionContext};

const DEFAULT_STUDY_HOURS: f64 = 20.0;
const NO_PHYSICAL_PLAN: &str = "No physical plan available";
const NO_EMOTIONAL_PLAN: &str = "No emotional plan available";

/// Link to an online learning resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnlineResource {
    /// Resource title.
    pub name: String,
    /// Resource URL.
    pub link: String,
}

/// Plan shown on the planner page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    /// Recommended weekly study hours.
    pub study_hours_per_week: f64,
    /// Suggested online resources.
    pub online_resources: Vec<OnlineResource>,
    /// Suggested book titles.
    pub books: Vec<String>,
    /// Physical wellbeing advice.
    pub physical_plan: String,
    /// Emotional wellbeing advice.
    pub emotional_plan: String,
}

impl StudyPlan {
    /// Map a recommendation document onto a plan, defaulting missing parts.
    ///
    /// # Examples
    /// ```
    /// use dashboard_client::domain::StudyPlan;
    /// use serde_json::json;
    ///
    /// let plan = StudyPlan::from_recommendation(&json!({
    ///     "study_plan": { "recommended_hours": 12 }
    /// }));
    /// assert_eq!(plan.study_hours_per_week, 12.0);
    /// assert_eq!(plan.physical_plan, "No physical plan available");
    /// ```
    #[must_use]
    pub fn from_recommendation(document: &Value) -> Self {
        let study_plan = document.get("study_plan");
        let study_hours_per_week = study_plan
            .and_then(|plan| plan.get("recommended_hours"))
            .and_then(Value::as_f64)
            .filter(|hours| *hours > 0.0)
            .unwrap_or(DEFAULT_STUDY_HOURS);
        let online_resources = entries(document, "online_resources")
            .map(|resource| OnlineResource {
                name: text(resource, "resource_title").unwrap_or_default(),
                link: text(resource, "resource_url").unwrap_or_default(),
            })
            .collect();
        let books = entries(document, "book_recommendations")
            .filter_map(|book| text(book, "resource_title"))
            .collect();
        let plan_text = |key: &str, default: &str| {
            study_plan
                .and_then(|plan| text(plan, key))
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        Self {
            study_hours_per_week,
            online_resources,
            books,
            physical_plan: plan_text("physical_plan", NO_PHYSICAL_PLAN),
            emotional_plan: plan_text("emotional_plan", NO_EMOTIONAL_PLAN),
        }
    }

    /// Generic plan used when recommendations are unavailable.
    #[must_use]
    pub fn fallback() -> Self {
        let resource = |name: &str, link: &str| OnlineResource {
            name: name.to_owned(),
            link: link.to_owned(),
        };
        Self {
            study_hours_per_week: DEFAULT_STUDY_HOURS,
            online_resources: vec![
                resource("W3Schools - Web Technologies", "https://www.w3schools.com"),
                resource("SQLBolt - Database Practice", "https://sqlbolt.com"),
                resource(
                    "MDN Web Docs - JavaScript",
                    "https://developer.mozilla.org/en-US/docs/Web/JavaScript",
                ),
                resource(
                    "Codecademy - Python",
                    "https://www.codecademy.com/learn/learn-python-3",
                ),
            ],
            books: [
                "Introduction to Database Systems",
                "Computer Networking: A Top-Down Approach",
                "Clean Code: A Handbook of Agile Software Craftsmanship",
                "Algorithms Unlocked",
                "Cybersecurity Essentials",
            ]
            .map(str::to_owned)
            .to_vec(),
            physical_plan: "Walk 30 mins daily, minimum 7 hours sleep, drink 2.5L water daily, \
                            light stretching."
                .to_owned(),
            emotional_plan: "Practice mindfulness meditation 10 mins daily, limit screen time \
                             1 hour before sleep, schedule weekly mentor check-ins, journal \
                             thoughts twice a week."
                .to_owned(),
        }
    }
}

fn entries<'v>(document: &'v Value, key: &str) -> impl Iterator<Item = &'v Value> {
    document
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn text(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// Result of a planner fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum PlannerOutcome {
    /// Plan derived from the student's recommendations.
    Personalised(StudyPlan),
    /// Generic plan; `error` says why recommendations were not used.
    Fallback {
        /// Generic plan.
        plan: StudyPlan,
        /// Failure that forced the fallback.
        error: ClientError,
    },
}

impl PlannerOutcome {
    /// Plan to display, whichever branch was taken.
    #[must_use]
    pub const fn plan(&self) -> &StudyPlan {
        match self {
            Self::Personalised(plan) | Self::Fallback { plan, .. } => plan,
        }
    }
}

/// Fetches the session student's planner.
#[derive(Clone)]
pub struct PlannerService {
    source: Arc<dyn RecommendationSource>,
}

impl PlannerService {
    /// Service reading recommendations from `source`.
    #[must_use]
    pub fn new(source: Arc<dyn RecommendationSource>) -> Self {
        Self { source }
    }

    /// Planner for the session user.
    ///
    /// Without a session nothing is fetched and
    /// [`ClientError::Unauthenticated`] is returned; any other failure
    /// degrades to [`PlannerOutcome::Fallback`].
    pub async fn fetch(&self, ctx: &SessionContext) -> Result<PlannerOutcome, ClientError> {
        let student_id = ctx
            .session()
            .map(|session| session.user_id().to_owned())
            .ok_or(ClientError::Unauthenticated)?;
        match self.source.planner_for(ctx, &student_id).await {
            Ok(document) => Ok(PlannerOutcome::Personalised(
                StudyPlan::from_recommendation(&document),
            )),
            Err(ClientError::Unauthenticated) => Err(ClientError::Unauthenticated),
            Err(error) => {
                warn!(student_id = %student_id, error = %error, "planner recommendations unavailable");
                Ok(PlannerOutcome::Fallback {
                    plan: StudyPlan::fallback(),
                    error,
                })
            }
        }
    }
}
