//! `ureq`-backed production gateway.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::TransportError;
use crate::gateway::{
    CreateProjectRequest, CreateTaskRequest, CreatedTask, Gateway, ProjectPatch, RegisterRequest,
    UserPatch,
};
use tabula_core::model::department::Department;
use tabula_core::model::row::TaskStatus;
use tabula_core::model::user::{CurrentUser, User};
use tabula_core::wire::{WireProject, WireSave};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking JSON client for the backend REST API.
#[derive(Clone)]
pub struct HttpGateway {
    agent: ureq::Agent,
    base_url: String,
}

impl std::fmt::Debug for HttpGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGateway")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpGateway {
    /// Build a gateway for `base_url` (e.g. `https://host/api`). A trailing
    /// slash is tolerated.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        let response = self
            .agent
            .get(&self.url(path))
            .set("Accept", "application/json")
            .call()
            .map_err(from_ureq)?;
        decode(response)
    }

    fn send_json<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, TransportError> {
        let response = self
            .agent
            .request(method, &self.url(path))
            .set("Accept", "application/json")
            .send_json(body)
            .map_err(from_ureq)?;
        decode(response)
    }

    /// Send a body-less or body-carrying request whose response body (an
    /// ack) is discarded.
    fn send_ack(
        &self,
        method: &str,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<(), TransportError> {
        let request = self
            .agent
            .request(method, &self.url(path))
            .set("Accept", "application/json");
        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };
        result.map_err(from_ureq)?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(response: ureq::Response) -> Result<T, TransportError> {
    response
        .into_json::<T>()
        .map_err(|err| TransportError::Io(format!("failed to decode response JSON: {err}")))
}

fn from_ureq(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Status(status, response) => TransportError::Status {
            status,
            message: response.into_string().unwrap_or_default(),
        },
        ureq::Error::Transport(transport) => TransportError::Io(transport.to_string()),
    }
}

impl Gateway for HttpGateway {
    fn fetch_projects(&self, user_id: &str) -> Result<Vec<WireProject>, TransportError> {
        self.get_json(&format!("/projects?userId={user_id}"))
    }

    fn create_project(
        &self,
        request: &CreateProjectRequest,
    ) -> Result<WireProject, TransportError> {
        self.send_json("POST", "/projects", request)
    }

    fn update_project(
        &self,
        project_id: &str,
        patch: &ProjectPatch,
    ) -> Result<WireProject, TransportError> {
        self.send_json("PUT", &format!("/projects/{project_id}"), patch)
    }

    fn save_project(&self, project_id: &str, body: &WireSave) -> Result<(), TransportError> {
        let body = serde_json::to_value(body)
            .map_err(|err| TransportError::Io(format!("failed to encode save body: {err}")))?;
        self.send_ack("PUT", &format!("/projects/{project_id}/save"), Some(&body))
    }

    fn delete_project(&self, project_id: &str) -> Result<(), TransportError> {
        self.send_ack("DELETE", &format!("/projects/{project_id}"), None)
    }

    fn create_task(&self, request: &CreateTaskRequest) -> Result<CreatedTask, TransportError> {
        self.send_json("POST", "/tasks", request)
    }

    fn delete_task(&self, task_id: &str) -> Result<(), TransportError> {
        // The backend reads the task id from the request body, not the path.
        let body = serde_json::json!({ "taskId": task_id });
        self.send_ack("DELETE", "/tasks", Some(&body))
    }

    fn update_task_status(
        &self,
        task_id: &str,
        status: TaskStatus,
    ) -> Result<(), TransportError> {
        let body = serde_json::json!({ "newStatus": status });
        self.send_ack("PUT", &format!("/tasks/{task_id}"), Some(&body))
    }

    fn fetch_departments(&self) -> Result<Vec<Department>, TransportError> {
        self.get_json("/departments")
    }

    fn create_department(&self, name: &str) -> Result<Department, TransportError> {
        self.send_json("POST", "/departments", &serde_json::json!({ "name": name }))
    }

    fn update_department(
        &self,
        department_id: &str,
        name: &str,
    ) -> Result<Department, TransportError> {
        self.send_json(
            "PUT",
            &format!("/departments/{department_id}"),
            &serde_json::json!({ "name": name }),
        )
    }

    fn delete_department(&self, department_id: &str) -> Result<(), TransportError> {
        self.send_ack("DELETE", &format!("/departments/{department_id}"), None)
    }

    fn fetch_users(&self) -> Result<Vec<User>, TransportError> {
        self.get_json("/users")
    }

    fn update_user(&self, user_id: &str, patch: &UserPatch) -> Result<User, TransportError> {
        self.send_json("PUT", &format!("/users/{user_id}"), patch)
    }

    fn delete_user(&self, user_id: &str) -> Result<(), TransportError> {
        self.send_ack("DELETE", &format!("/users/{user_id}"), None)
    }

    fn login(&self, email: &str, password: &str) -> Result<CurrentUser, TransportError> {
        self.send_json(
            "POST",
            "/auth/login",
            &serde_json::json!({ "email": email, "password": password }),
        )
    }

    fn register(&self, request: &RegisterRequest) -> Result<CurrentUser, TransportError> {
        self.send_json("POST", "/auth/register", request)
    }
}
