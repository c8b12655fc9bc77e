//! The typed backend surface: one method per REST endpoint.
//!
//! Session logic talks to this trait, never to HTTP directly; the
//! production implementation is [`crate::http::HttpGateway`], and tests
//! substitute an in-memory fake.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::TransportError;
use tabula_core::model::department::Department;
use tabula_core::model::row::TaskStatus;
use tabula_core::model::user::{CurrentUser, User};
use tabula_core::wire::{WireCell, WireProject, WireSave};

/// Body of `POST /projects`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(
        default,
        rename = "departmentId",
        skip_serializing_if = "Option::is_none"
    )]
    pub department_id: Option<String>,
}

/// Body of `PUT /projects/:id` (partial update).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        rename = "departmentId",
        skip_serializing_if = "Option::is_none"
    )]
    pub department_id: Option<String>,
}

/// Body of `POST /tasks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(rename = "projectId")]
    pub project_id: String,
    #[serde(default)]
    pub cells: BTreeMap<String, WireCell>,
}

/// Response of `POST /tasks`: the server-issued row id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTask {
    pub id: String,
}

/// Body of `PUT /users/:id` (partial update).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        rename = "departmentId",
        skip_serializing_if = "Option::is_none"
    )]
    pub department_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<tabula_core::model::user::Role>>,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "roleNames")]
    pub role_names: Vec<String>,
}

/// The REST surface consumed from the backend (base path `/api`).
pub trait Gateway {
    /// `GET /projects?userId=<id>`
    ///
    /// # Errors
    ///
    /// [`TransportError`] on network or server failure.
    fn fetch_projects(&self, user_id: &str) -> Result<Vec<WireProject>, TransportError>;

    /// `POST /projects`
    ///
    /// # Errors
    ///
    /// [`TransportError`] on network or server failure.
    fn create_project(&self, request: &CreateProjectRequest)
    -> Result<WireProject, TransportError>;

    /// `PUT /projects/:id` (partial update)
    ///
    /// # Errors
    ///
    /// [`TransportError`] on network or server failure.
    fn update_project(
        &self,
        project_id: &str,
        patch: &ProjectPatch,
    ) -> Result<WireProject, TransportError>;

    /// `PUT /projects/:id/save` — full replace of blocks and tasks.
    ///
    /// # Errors
    ///
    /// [`TransportError`] on network or server failure.
    fn save_project(&self, project_id: &str, body: &WireSave) -> Result<(), TransportError>;

    /// `DELETE /projects/:id`
    ///
    /// # Errors
    ///
    /// [`TransportError`] on network or server failure.
    fn delete_project(&self, project_id: &str) -> Result<(), TransportError>;

    /// `POST /tasks`
    ///
    /// # Errors
    ///
    /// [`TransportError`] on network or server failure.
    fn create_task(&self, request: &CreateTaskRequest) -> Result<CreatedTask, TransportError>;

    /// `DELETE /tasks` (body-carrying delete)
    ///
    /// # Errors
    ///
    /// [`TransportError`] on network or server failure.
    fn delete_task(&self, task_id: &str) -> Result<(), TransportError>;

    /// `PUT /tasks/:id {newStatus}`
    ///
    /// # Errors
    ///
    /// [`TransportError`] on network or server failure.
    fn update_task_status(&self, task_id: &str, status: TaskStatus)
    -> Result<(), TransportError>;

    /// `GET /departments`
    ///
    /// # Errors
    ///
    /// [`TransportError`] on network or server failure.
    fn fetch_departments(&self) -> Result<Vec<Department>, TransportError>;

    /// `POST /departments`
    ///
    /// # Errors
    ///
    /// [`TransportError`] on network or server failure.
    fn create_department(&self, name: &str) -> Result<Department, TransportError>;

    /// `PUT /departments/:id`
    ///
    /// # Errors
    ///
    /// [`TransportError`] on network or server failure.
    fn update_department(&self, department_id: &str, name: &str)
    -> Result<Department, TransportError>;

    /// `DELETE /departments/:id`
    ///
    /// # Errors
    ///
    /// [`TransportError`] on network or server failure.
    fn delete_department(&self, department_id: &str) -> Result<(), TransportError>;

    /// `GET /users`
    ///
    /// # Errors
    ///
    /// [`TransportError`] on network or server failure.
    fn fetch_users(&self) -> Result<Vec<User>, TransportError>;

    /// `PUT /users/:id`
    ///
    /// # Errors
    ///
    /// [`TransportError`] on network or server failure.
    fn update_user(&self, user_id: &str, patch: &UserPatch) -> Result<User, TransportError>;

    /// `DELETE /users/:id`
    ///
    /// # Errors
    ///
    /// [`TransportError`] on network or server failure.
    fn delete_user(&self, user_id: &str) -> Result<(), TransportError>;

    /// `POST /auth/login`
    ///
    /// # Errors
    ///
    /// [`TransportError`] on network or server failure (including rejected
    /// credentials, which arrive as a status error).
    fn login(&self, email: &str, password: &str) -> Result<CurrentUser, TransportError>;

    /// `POST /auth/register`
    ///
    /// # Errors
    ///
    /// [`TransportError`] on network or server failure.
    fn register(&self, request: &RegisterRequest) -> Result<CurrentUser, TransportError>;
}
