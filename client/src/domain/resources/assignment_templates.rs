//! `/api/modules/{module_id}/assignment-templates` table.

use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::{ApiClient, ClientError, SessionContext};

/// Assignment templates nested under a module.
#[derive(Clone, Copy)]
pub struct AssignmentTemplatesApi<'a> {
    client: &'a ApiClient,
}

fn collection(module_id: &str) -> String {
    format!("/api/modules/{module_id}/assignment-templates")
}

fn member(module_id: &str, assignment_id: &str) -> String {
    format!("{}/{assignment_id}", collection(module_id))
}

fn activation(module_id: &str, assignment_id: &str) -> String {
    format!("{}/activate", member(module_id, assignment_id))
}

impl<'a> AssignmentTemplatesApi<'a> {
    pub(crate) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List templates of one module.
    pub async fn get_by_module(
        &self,
        ctx: &SessionContext,
        module_id: &str,
    ) -> Result<Value, ClientError> {
        self.client.get(ctx, &collection(module_id)).await
    }

    /// Fetch one template.
    pub async fn get_by_id(
        &self,
        ctx: &SessionContext,
        module_id: &str,
        assignment_id: &str,
    ) -> Result<Value, ClientError> {
        self.client
            .get(ctx, &member(module_id, assignment_id))
            .await
    }

    /// Create a template under `module_id`.
    pub async fn create<T>(
        &self,
        ctx: &SessionContext,
        module_id: &str,
        data: &T,
    ) -> Result<Value, ClientError>
    where
        T: Serialize + ?Sized,
    {
        self.client.post(ctx, &collection(module_id), data).await
    }

    /// Replace a template.
    pub async fn update<T>(
        &self,
        ctx: &SessionContext,
        module_id: &str,
        assignment_id: &str,
        data: &T,
    ) -> Result<Value, ClientError>
    where
        T: Serialize + ?Sized,
    {
        self.client
            .put(ctx, &member(module_id, assignment_id), data)
            .await
    }

    /// Delete a template.
    pub async fn delete(
        &self,
        ctx: &SessionContext,
        module_id: &str,
        assignment_id: &str,
    ) -> Result<Value, ClientError> {
        self.client
            .delete(ctx, &member(module_id, assignment_id))
            .await
    }

    /// Open a template to students until `due_date`.
    ///
    /// `POST .../activate` with body `{"dueDate": due_date}`.
    pub async fn activate(
        &self,
        ctx: &SessionContext,
        module_id: &str,
        assignment_id: &str,
        due_date: &str,
    ) -> Result<Value, ClientError> {
        self.client
            .post(
                ctx,
                &activation(module_id, assignment_id),
                &json!({ "dueDate": due_date }),
            )
            .await
    }

    /// Close a template again. `DELETE .../activate`, no body.
    pub async fn deactivate(
        &self,
        ctx: &SessionContext,
        module_id: &str,
        assignment_id: &str,
    ) -> Result<Value, ClientError> {
        self.client
            .delete(ctx, &activation(module_id, assignment_id))
            .await
    }
}
