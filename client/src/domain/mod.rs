//! Access-layer domain: session guard, call wrapper, resource tables, and
//! the caller-side services built on them.
//!
//! Purpose: keep request shaping and error normalisation in one place so
//! adapters only move bytes and callers only decide how to degrade.
//!
//! Public surface:
//! - `ApiClient`: generic call wrapper plus one accessor per resource table.
//! - `SessionContext` and `ensure_authenticated`: the session guard.
//! - `ClientError` and `ApiError`: error taxonomy.
//! - `GradesService`, `AssignmentService`, `PlannerService`: page data.

mod api_client;
mod assignments;
mod error;
mod grades;
mod planner;
pub mod ports;
mod request;
pub mod resources;
mod session;

pub use self::api_client::ApiClient;
pub use self::assignments::{
    AssignmentDetail, AssignmentService, SUBMITTED_STATUS, SubmissionDraft,
};
pub use self::error::{ApiError, ClientError, ErrorBody};
pub use self::grades::{GradeBand, GradeSummary, GradesService, ModuleGrade, PASS_MARK};
pub use self::planner::{OnlineResource, PlannerOutcome, PlannerService, StudyPlan};
pub use self::request::{DEFAULT_CONTENT_TYPE, HttpMethod, QueryParams, RequestOptions};
pub use self::session::{
    Role, Session, SessionContext, SessionCookie, SessionValidationError, ensure_authenticated,
};
