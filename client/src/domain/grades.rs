//! Grade view assembled from progress records and enrolments.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::domain::{ApiClient, ClientError, QueryParams, SessionContext};

const UNKNOWN_MODULE: &str = "Unknown Module";
/// Lowest grade that counts as a pass.
pub const PASS_MARK: f64 = 50.0;

/// Qualitative band of a numeric grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeBand {
    /// 80 and above.
    Excellent,
    /// 65 to below 80.
    Good,
    /// 50 to below 65.
    AtRisk,
    /// Below 50.
    Fail,
}

impl GradeBand {
    /// Band for `score`.
    #[must_use]
    pub fn for_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Excellent
        } else if score >= 65.0 {
            Self::Good
        } else if score >= PASS_MARK {
            Self::AtRisk
        } else {
            Self::Fail
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::AtRisk => "At Risk",
            Self::Fail => "Fail",
        }
    }
}

/// Grade for one module.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleGrade {
    /// Module title, or `Unknown Module` when enrolments do not name it.
    pub module_name: String,
    /// Recorded score; `0` when none was recorded.
    pub grade: f64,
}

impl ModuleGrade {
    /// Band of this grade.
    #[must_use]
    pub fn band(&self) -> GradeBand {
        GradeBand::for_score(self.grade)
    }
}

/// Headline numbers over a list of grades.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeSummary {
    /// Number of graded modules.
    pub total_modules: usize,
    /// Modules at or above the pass mark.
    pub passed_modules: usize,
    /// Mean grade rounded to one decimal place; `0` with no modules.
    pub average_grade: f64,
}

impl GradeSummary {
    /// Summarise `grades`.
    #[must_use]
    pub fn from_grades(grades: &[ModuleGrade]) -> Self {
        let total_modules = grades.len();
        let passed_modules = grades.iter().filter(|g| g.grade >= PASS_MARK).count();
        let average_grade = if total_modules == 0 {
            0.0
        } else {
            let sum: f64 = grades.iter().map(|g| g.grade).sum();
            #[expect(
                clippy::cast_precision_loss,
                reason = "module counts are far below 2^52"
            )]
            let mean = sum / total_modules as f64;
            (mean * 10.0).round() / 10.0
        };
        Self {
            total_modules,
            passed_modules,
            average_grade,
        }
    }
}

/// Builds the grade view for the session student.
#[derive(Clone)]
pub struct GradesService {
    client: ApiClient,
}

impl GradesService {
    /// Service reading through `client`.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetch progress and enrolments and join them into per-module grades.
    ///
    /// A failed enrolment lookup only loses module names; a failed progress
    /// lookup fails the whole view.
    pub async fn fetch(&self, ctx: &SessionContext) -> Result<Vec<ModuleGrade>, ClientError> {
        let progress = self.client.progress().get(ctx, &QueryParams::new()).await?;
        let names = match self.client.students().get_enrollments(ctx).await {
            Ok(enrollments) => module_names(&enrollments),
            Err(error) => {
                warn!(error = %error, "enrolments unavailable; module names omitted");
                HashMap::new()
            }
        };
        Ok(join_grades(&progress, &names))
    }
}

/// Map module id to display name from an enrolments document.
fn module_names(enrollments: &Value) -> HashMap<String, String> {
    let courses = enrollments
        .get("enrollments")
        .and_then(Value::as_array)
        .into_iter()
        .flatten();
    let modules = courses
        .filter_map(|course| course.get("modules").and_then(Value::as_array))
        .flatten();
    modules
        .filter_map(|module| {
            let id = module.get("id").and_then(Value::as_str)?;
            let name = non_empty_str(module, "title").or_else(|| non_empty_str(module, "name"))?;
            Some((id.to_owned(), name.to_owned()))
        })
        .collect()
}

fn non_empty_str<'v>(value: &'v Value, key: &str) -> Option<&'v str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn join_grades(progress: &Value, names: &HashMap<String, String>) -> Vec<ModuleGrade> {
    progress
        .get("progress")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .map(|entry| {
            let module_name = entry
                .get("moduleId")
                .and_then(Value::as_str)
                .and_then(|id| names.get(id))
                .map_or_else(|| UNKNOWN_MODULE.to_owned(), Clone::clone);
            let grade = entry.get("score").and_then(Value::as_f64).unwrap_or(0.0);
            ModuleGrade { module_name, grade }
        })
        .collect()
}
