//! The in-memory project collection and its mutation surface.
//!
//! Every mutation of `blocks`, `workspace_order`, or row cells goes through
//! [`ProjectStore`]; no other component touches them. Operations mutate
//! synchronously and run to completion, then notify subscribed observers
//! (mutate-then-notify), so observers always see consistent state.

mod rows;
mod schema;

use std::fmt;

use crate::error::{EntityKind, StoreError};
use crate::event::ChangeEvent;
use crate::model::project::Project;

/// Owns every project loaded for the active session.
#[derive(Default)]
pub struct ProjectStore {
    projects: Vec<Project>,
    observers: Vec<Box<dyn Fn(&ChangeEvent)>>,
}

impl fmt::Debug for ProjectStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectStore")
            .field("projects", &self.projects.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ProjectStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer, called after every completed mutation.
    pub fn subscribe(&mut self, observer: impl Fn(&ChangeEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub(crate) fn notify(&self, event: &ChangeEvent) {
        tracing::debug!(kind = event.kind(), "store change");
        for observer in &self.observers {
            observer(event);
        }
    }

    /// All projects, in load/creation order.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Returns the project with `project_id`, if loaded.
    #[must_use]
    pub fn project(&self, project_id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == project_id)
    }

    pub(crate) fn project_mut(&mut self, project_id: &str) -> Result<&mut Project, StoreError> {
        self.projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Project, project_id))
    }

    /// Insert an already-shaped project (the reconciliation load path).
    /// A project with the same id is replaced in place.
    pub fn insert_project(&mut self, project: Project) {
        let project_id = project.id.clone();
        if let Some(existing) = self.projects.iter_mut().find(|p| p.id == project.id) {
            *existing = project;
        } else {
            self.projects.push(project);
        }
        self.notify(&ChangeEvent::ProjectCreated { project_id });
    }

    /// Replace the whole collection (a successful reload).
    pub fn replace_projects(&mut self, projects: Vec<Project>) {
        tracing::info!(count = projects.len(), "replacing project collection");
        self.projects = projects;
    }

    /// Remove and return a project.
    ///
    /// # Errors
    ///
    /// `NotFound` if `project_id` is unknown.
    pub fn remove_project(&mut self, project_id: &str) -> Result<Project, StoreError> {
        let index = self
            .projects
            .iter()
            .position(|p| p.id == project_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Project, project_id))?;
        let project = self.projects.remove(index);
        self.notify(&ChangeEvent::ProjectRemoved {
            project_id: project_id.to_string(),
        });
        Ok(project)
    }

    /// Swap a speculative local project id for the server-issued one.
    ///
    /// # Errors
    ///
    /// `NotFound` if `old_id` is unknown.
    pub fn confirm_project_id(&mut self, old_id: &str, new_id: &str) -> Result<(), StoreError> {
        let project = self.project_mut(old_id)?;
        project.id = new_id.to_string();
        self.notify(&ChangeEvent::ProjectIdConfirmed {
            old_id: old_id.to_string(),
            new_id: new_id.to_string(),
        });
        Ok(())
    }
}
