//! Resource-API tables: one thin, stateless accessor per backend area.
//!
//! Every entry maps typed arguments to a path, verb, and body and delegates
//! to [`ApiClient`]. Nothing here validates, caches, or transforms payloads.

use crate::domain::ApiClient;

/// Generate a table exposing `get_by_id`, `create`, `update`, and `delete`
/// for a flat collection rooted at `$base`.
macro_rules! define_crud_table {
    (
        $(#[$outer:meta])*
        $name:ident => $base:literal
    ) => {
        $(#[$outer])*
        #[derive(Clone, Copy)]
        pub struct $name<'a> {
            client: &'a $crate::domain::ApiClient,
        }

        impl<'a> $name<'a> {
            pub(crate) const fn new(client: &'a $crate::domain::ApiClient) -> Self {
                Self { client }
            }

            #[doc = concat!("`GET ", $base, "/{id}`.")]
            pub async fn get_by_id(
                &self,
                ctx: &$crate::domain::SessionContext,
                id: &str,
            ) -> Result<::serde_json::Value, $crate::domain::ClientError> {
                self.client.get(ctx, &format!(concat!($base, "/{}"), id)).await
            }

            #[doc = concat!("`POST ", $base, "` with `data` as the body.")]
            pub async fn create<T>(
                &self,
                ctx: &$crate::domain::SessionContext,
                data: &T,
            ) -> Result<::serde_json::Value, $crate::domain::ClientError>
            where
                T: ::serde::Serialize + ?Sized,
            {
                self.client.post(ctx, $base, data).await
            }

            #[doc = concat!("`PUT ", $base, "/{id}` with `data` as the body.")]
            pub async fn update<T>(
                &self,
                ctx: &$crate::domain::SessionContext,
                id: &str,
                data: &T,
            ) -> Result<::serde_json::Value, $crate::domain::ClientError>
            where
                T: ::serde::Serialize + ?Sized,
            {
                self.client
                    .put(ctx, &format!(concat!($base, "/{}"), id), data)
                    .await
            }

            #[doc = concat!("`DELETE ", $base, "/{id}`.")]
            pub async fn delete(
                &self,
                ctx: &$crate::domain::SessionContext,
                id: &str,
            ) -> Result<::serde_json::Value, $crate::domain::ClientError> {
                self.client
                    .delete(ctx, &format!(concat!($base, "/{}"), id))
                    .await
            }
        }
    };
}

mod admin;
mod assessments;
mod assignment_templates;
mod batches;
mod courses;
mod educators;
mod modules;
mod progress;
mod students;

pub use admin::AdminApi;
pub use assessments::AssessmentsApi;
pub use assignment_templates::AssignmentTemplatesApi;
pub use batches::BatchesApi;
pub use courses::CoursesApi;
pub use educators::EducatorsApi;
pub use modules::ModulesApi;
pub use progress::ProgressApi;
pub use students::StudentsApi;

impl ApiClient {
    /// Learning modules.
    #[must_use]
    pub const fn modules(&self) -> ModulesApi<'_> {
        ModulesApi::new(self)
    }

    /// Assignment templates nested under a module.
    #[must_use]
    pub const fn assignment_templates(&self) -> AssignmentTemplatesApi<'_> {
        AssignmentTemplatesApi::new(self)
    }

    /// Courses.
    #[must_use]
    pub const fn courses(&self) -> CoursesApi<'_> {
        CoursesApi::new(self)
    }

    /// Student batches (cohorts).
    #[must_use]
    pub const fn batches(&self) -> BatchesApi<'_> {
        BatchesApi::new(self)
    }

    /// Assessments.
    #[must_use]
    pub const fn assessments(&self) -> AssessmentsApi<'_> {
        AssessmentsApi::new(self)
    }

    /// Student progress records.
    #[must_use]
    pub const fn progress(&self) -> ProgressApi<'_> {
        ProgressApi::new(self)
    }

    /// Students and the current student's own views.
    #[must_use]
    pub const fn students(&self) -> StudentsApi<'_> {
        StudentsApi::new(self)
    }

    /// Educators and their module assignments.
    #[must_use]
    pub const fn educators(&self) -> EducatorsApi<'_> {
        EducatorsApi::new(self)
    }

    /// Administrative approval actions.
    #[must_use]
    pub const fn admin(&self) -> AdminApi<'_> {
        AdminApi::new(self)
    }
}
