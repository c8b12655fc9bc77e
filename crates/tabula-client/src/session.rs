//! The per-login application context.
//!
//! A [`Session`] owns every piece of in-memory state scoped to one login:
//! the project store, the user and department directories, and the
//! authentication state. It is created when the app starts, populated at
//! login, and cleared by [`Session::logout`].
//!
//! Reconciliation policy:
//!
//! - **Loads degrade.** A failed fetch logs a warning and leaves the prior
//!   in-memory state untouched; there is no safe partial-load fallback.
//! - **Mutations propagate.** A failed create/save/delete surfaces the
//!   error to the caller so the UI can react.
//! - **Optimistic inserts roll back.** Project and row creation mutate the
//!   store first and remove the speculative entry again if the server
//!   rejects the insert; on success the server id replaces the local one
//!   in place.
//! - **Saves are full replaces.** The entire block and task set is
//!   retransmitted; when two saves race, the later response wins.

use crate::auth::AuthState;
use crate::directory::{DepartmentDirectory, UserDirectory};
use crate::error::ClientError;
use crate::gateway::{
    CreateProjectRequest, CreateTaskRequest, Gateway, ProjectPatch, RegisterRequest, UserPatch,
};
use tabula_core::ProjectStore;
use tabula_core::StoreError;
use tabula_core::error::EntityKind;
use tabula_core::model::row::TaskStatus;
use tabula_core::model::user::CurrentUser;
use tabula_core::wire::{project_from_wire, save_body, task_to_wire};

/// All state owned by one logged-in (or logging-in) user.
#[derive(Debug)]
pub struct Session<G> {
    gateway: G,
    pub auth: AuthState,
    pub projects: ProjectStore,
    pub users: UserDirectory,
    pub departments: DepartmentDirectory,
}

impl<G: Gateway> Session<G> {
    #[must_use]
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            auth: AuthState::default(),
            projects: ProjectStore::new(),
            users: UserDirectory::default(),
            departments: DepartmentDirectory::default(),
        }
    }

    /// Rebuild a session from a previously persisted login, skipping the
    /// credential exchange.
    #[must_use]
    pub fn resume(gateway: G, user: CurrentUser) -> Self {
        let mut session = Self::new(gateway);
        session.auth.set(user);
        session
    }

    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Authenticate and remember the current user.
    ///
    /// # Errors
    ///
    /// Propagates transport failures, including rejected credentials.
    pub fn login(&mut self, email: &str, password: &str) -> Result<CurrentUser, ClientError> {
        let user = self.gateway.login(email, password)?;
        tracing::info!(user_id = %user.id, "logged in");
        self.auth.set(user.clone());
        Ok(user)
    }

    /// Register a new account and log it in.
    ///
    /// # Errors
    ///
    /// Propagates transport failures.
    pub fn register(&mut self, request: &RegisterRequest) -> Result<CurrentUser, ClientError> {
        let user = self.gateway.register(request)?;
        tracing::info!(user_id = %user.id, "registered");
        self.auth.set(user.clone());
        Ok(user)
    }

    /// Clear every piece of session-scoped state. The teardown boundary:
    /// nothing loaded under the old login survives it.
    pub fn logout(&mut self) {
        self.auth.clear();
        self.projects = ProjectStore::new();
        self.users = UserDirectory::default();
        self.departments = DepartmentDirectory::default();
        tracing::info!("logged out; session state cleared");
    }

    /// Reload the project collection for the current user. On failure the
    /// previous in-memory state is kept.
    pub fn load_projects(&mut self) {
        let Some(user_id) = self.auth.current_user().map(|u| u.id.clone()) else {
            tracing::warn!("load_projects called without a logged-in user");
            return;
        };
        match self.gateway.fetch_projects(&user_id) {
            Ok(wire_projects) => {
                let projects = wire_projects.into_iter().map(project_from_wire).collect();
                self.projects.replace_projects(projects);
            }
            Err(err) => {
                tracing::warn!(error = %err, "project load failed; keeping previous state");
            }
        }
    }

    /// Reload the user directory. On failure the previous state is kept.
    pub fn load_users(&mut self) {
        match self.gateway.fetch_users() {
            Ok(users) => self.users.replace(users),
            Err(err) => {
                tracing::warn!(error = %err, "user load failed; keeping previous state");
            }
        }
    }

    /// Reload the department directory. On failure the previous state is
    /// kept.
    pub fn load_departments(&mut self) {
        match self.gateway.fetch_departments() {
            Ok(departments) => self.departments.replace(departments),
            Err(err) => {
                tracing::warn!(error = %err, "department load failed; keeping previous state");
            }
        }
    }

    /// Create a project locally, then persist it. Returns the confirmed
    /// project id.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` without a login; `Validation` on an empty name;
    /// transport failures propagate after the speculative insert is rolled
    /// back.
    pub fn create_project(
        &mut self,
        name: &str,
        department_id: Option<&str>,
    ) -> Result<String, ClientError> {
        let owner_id = self
            .auth
            .current_user()
            .map(|u| u.id.clone())
            .ok_or(ClientError::NotAuthenticated)?;

        let local_id = self
            .projects
            .create_project(name, Some(&owner_id), department_id)?;

        let request = CreateProjectRequest {
            name: name.trim().to_string(),
            user_id: owner_id,
            department_id: department_id.map(str::to_string),
        };
        match self.gateway.create_project(&request) {
            Ok(created) => {
                self.projects.confirm_project_id(&local_id, &created.id)?;
                Ok(created.id)
            }
            Err(err) => {
                tracing::warn!(error = %err, "project create rejected; rolling back");
                if self.projects.remove_project(&local_id).is_err() {
                    tracing::debug!(project_id = %local_id, "speculative project already gone");
                }
                Err(err.into())
            }
        }
    }

    /// Rename a project or move it to another department.
    ///
    /// # Errors
    ///
    /// Transport failures propagate; local state is only touched on success.
    pub fn update_project(
        &mut self,
        project_id: &str,
        patch: &ProjectPatch,
    ) -> Result<(), ClientError> {
        let updated = self.gateway.update_project(project_id, patch)?;
        self.projects.insert_project(project_from_wire(updated));
        Ok(())
    }

    /// Persist a project wholesale: every block and every task, replacing
    /// the server-side state for it.
    ///
    /// # Errors
    ///
    /// `NotFound` if the project is not loaded; transport failures
    /// propagate (local state is already ahead of the server and stays so).
    pub fn save_project(&mut self, project_id: &str) -> Result<(), ClientError> {
        let project = self
            .projects
            .project(project_id)
            .ok_or_else(|| StoreError::NotFound {
                kind: EntityKind::Project,
                id: project_id.to_string(),
            })?;
        let body = save_body(project);
        self.gateway.save_project(project_id, &body)?;
        tracing::debug!(project_id = %project_id, "project saved");
        Ok(())
    }

    /// Delete a project on the server, then locally.
    ///
    /// # Errors
    ///
    /// Transport failures propagate; the local copy survives a failed
    /// delete.
    pub fn delete_project(&mut self, project_id: &str) -> Result<(), ClientError> {
        self.gateway.delete_project(project_id)?;
        self.projects.remove_project(project_id)?;
        Ok(())
    }

    /// Add a row optimistically, then persist it. Returns the confirmed
    /// row id.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown project; transport failures propagate
    /// after the speculative row is rolled back.
    pub fn add_row(&mut self, project_id: &str) -> Result<String, ClientError> {
        let local_id = self.projects.add_row(project_id)?;

        let request = {
            let project = self
                .projects
                .project(project_id)
                .ok_or_else(|| StoreError::NotFound {
                    kind: EntityKind::Project,
                    id: project_id.to_string(),
                })?;
            let row = project.row(&local_id).ok_or_else(|| StoreError::NotFound {
                kind: EntityKind::Row,
                id: local_id.clone(),
            })?;
            CreateTaskRequest {
                project_id: project_id.to_string(),
                cells: task_to_wire(project, row).cells,
            }
        };

        match self.gateway.create_task(&request) {
            Ok(created) => {
                self.projects
                    .confirm_row_id(project_id, &local_id, &created.id)?;
                Ok(created.id)
            }
            Err(err) => {
                tracing::warn!(error = %err, "task create rejected; rolling back");
                if self.projects.delete_row(project_id, &local_id).is_err() {
                    tracing::debug!(row_id = %local_id, "speculative row already gone");
                }
                Err(err.into())
            }
        }
    }

    /// Delete a row on the server, then locally.
    ///
    /// # Errors
    ///
    /// Transport failures propagate; the local row survives a failed
    /// delete.
    pub fn delete_row(&mut self, project_id: &str, row_id: &str) -> Result<(), ClientError> {
        self.gateway.delete_task(row_id)?;
        self.projects.delete_row(project_id, row_id)?;
        Ok(())
    }

    /// Set a row's status locally, then persist. The local edit is kept
    /// even when the server rejects it (a status is trivially re-editable);
    /// the failure still propagates.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown row; transport failures propagate.
    pub fn set_status(
        &mut self,
        project_id: &str,
        row_id: &str,
        status: TaskStatus,
    ) -> Result<(), ClientError> {
        self.projects.update_status(project_id, row_id, status)?;
        self.gateway.update_task_status(row_id, status)?;
        Ok(())
    }

    /// Create a department and add it to the directory.
    ///
    /// # Errors
    ///
    /// Transport failures propagate.
    pub fn create_department(&mut self, name: &str) -> Result<String, ClientError> {
        let department = self.gateway.create_department(name)?;
        let department_id = department.id.clone();
        self.departments.upsert(department);
        Ok(department_id)
    }

    /// Rename a department.
    ///
    /// # Errors
    ///
    /// Transport failures propagate.
    pub fn update_department(
        &mut self,
        department_id: &str,
        name: &str,
    ) -> Result<(), ClientError> {
        let department = self.gateway.update_department(department_id, name)?;
        self.departments.upsert(department);
        Ok(())
    }

    /// Delete a department.
    ///
    /// # Errors
    ///
    /// Transport failures propagate; the directory entry survives a failed
    /// delete.
    pub fn delete_department(&mut self, department_id: &str) -> Result<(), ClientError> {
        self.gateway.delete_department(department_id)?;
        self.departments.remove(department_id);
        Ok(())
    }

    /// Update a user (rename, reassign department, change roles).
    ///
    /// # Errors
    ///
    /// Transport failures propagate.
    pub fn update_user(&mut self, user_id: &str, patch: &UserPatch) -> Result<(), ClientError> {
        let user = self.gateway.update_user(user_id, patch)?;
        self.users.upsert(user);
        Ok(())
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Transport failures propagate; the directory entry survives a failed
    /// delete.
    pub fn delete_user(&mut self, user_id: &str) -> Result<(), ClientError> {
        self.gateway.delete_user(user_id)?;
        self.users.remove(user_id);
        Ok(())
    }
}
