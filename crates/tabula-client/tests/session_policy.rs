//! Session reconciliation policy, exercised against an in-memory gateway:
//! loads degrade, mutations propagate, optimistic inserts roll back.

use std::cell::{Cell, RefCell};

use tabula_client::error::{ClientError, TransportError};
use tabula_client::gateway::{
    CreateProjectRequest, CreateTaskRequest, CreatedTask, Gateway, ProjectPatch, RegisterRequest,
    UserPatch,
};
use tabula_client::session::Session;
use tabula_core::model::department::Department;
use tabula_core::model::row::TaskStatus;
use tabula_core::model::user::{CurrentUser, Role, User};
use tabula_core::wire::{WireProject, WireSave};

fn server_error() -> TransportError {
    TransportError::Status {
        status: 500,
        message: "boom".to_string(),
    }
}

/// Scriptable in-memory stand-in for the backend.
#[derive(Default)]
struct FakeGateway {
    fail_fetch_projects: Cell<bool>,
    fail_create_project: Cell<bool>,
    fail_create_task: Cell<bool>,
    fail_update_status: Cell<bool>,
    fail_delete_task: Cell<bool>,
    projects: RefCell<Vec<WireProject>>,
    saves: RefCell<Vec<(String, WireSave)>>,
    next_id: Cell<u32>,
}

impl FakeGateway {
    fn issue_id(&self, prefix: &str) -> String {
        let n = self.next_id.get() + 1;
        self.next_id.set(n);
        format!("{prefix}{n}")
    }
}

impl Gateway for FakeGateway {
    fn fetch_projects(&self, _user_id: &str) -> Result<Vec<WireProject>, TransportError> {
        if self.fail_fetch_projects.get() {
            return Err(server_error());
        }
        Ok(self.projects.borrow().clone())
    }

    fn create_project(
        &self,
        request: &CreateProjectRequest,
    ) -> Result<WireProject, TransportError> {
        if self.fail_create_project.get() {
            return Err(server_error());
        }
        Ok(WireProject {
            id: self.issue_id("srv-p"),
            name: request.name.clone(),
            user_id: Some(request.user_id.clone()),
            department_id: request.department_id.clone(),
            blocks: Vec::new(),
            tasks: Vec::new(),
        })
    }

    fn update_project(
        &self,
        project_id: &str,
        patch: &ProjectPatch,
    ) -> Result<WireProject, TransportError> {
        Ok(WireProject {
            id: project_id.to_string(),
            name: patch.name.clone().unwrap_or_default(),
            user_id: None,
            department_id: patch.department_id.clone(),
            blocks: Vec::new(),
            tasks: Vec::new(),
        })
    }

    fn save_project(&self, project_id: &str, body: &WireSave) -> Result<(), TransportError> {
        self.saves
            .borrow_mut()
            .push((project_id.to_string(), body.clone()));
        Ok(())
    }

    fn delete_project(&self, _project_id: &str) -> Result<(), TransportError> {
        Ok(())
    }

    fn create_task(&self, _request: &CreateTaskRequest) -> Result<CreatedTask, TransportError> {
        if self.fail_create_task.get() {
            return Err(server_error());
        }
        Ok(CreatedTask {
            id: self.issue_id("srv-t"),
        })
    }

    fn delete_task(&self, _task_id: &str) -> Result<(), TransportError> {
        if self.fail_delete_task.get() {
            return Err(server_error());
        }
        Ok(())
    }

    fn update_task_status(
        &self,
        _task_id: &str,
        _status: TaskStatus,
    ) -> Result<(), TransportError> {
        if self.fail_update_status.get() {
            return Err(server_error());
        }
        Ok(())
    }

    fn fetch_departments(&self) -> Result<Vec<Department>, TransportError> {
        Ok(Vec::new())
    }

    fn create_department(&self, name: &str) -> Result<Department, TransportError> {
        Ok(Department {
            id: self.issue_id("srv-d"),
            name: name.to_string(),
            users: Vec::new(),
        })
    }

    fn update_department(
        &self,
        department_id: &str,
        name: &str,
    ) -> Result<Department, TransportError> {
        Ok(Department {
            id: department_id.to_string(),
            name: name.to_string(),
            users: Vec::new(),
        })
    }

    fn delete_department(&self, _department_id: &str) -> Result<(), TransportError> {
        Ok(())
    }

    fn fetch_users(&self) -> Result<Vec<User>, TransportError> {
        Ok(Vec::new())
    }

    fn update_user(&self, user_id: &str, patch: &UserPatch) -> Result<User, TransportError> {
        Ok(User {
            id: user_id.to_string(),
            name: patch.name.clone().unwrap_or_default(),
            email: patch.email.clone().unwrap_or_default(),
            department_id: patch.department_id.clone(),
            roles: patch.roles.clone().unwrap_or_default(),
        })
    }

    fn delete_user(&self, _user_id: &str) -> Result<(), TransportError> {
        Ok(())
    }

    fn login(&self, email: &str, _password: &str) -> Result<CurrentUser, TransportError> {
        Ok(CurrentUser {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            email: email.to_string(),
            roles: vec![Role::Manager],
        })
    }

    fn register(&self, request: &RegisterRequest) -> Result<CurrentUser, TransportError> {
        Ok(CurrentUser {
            id: self.issue_id("srv-u"),
            name: request.name.clone(),
            email: request.email.clone(),
            roles: vec![Role::Employee],
        })
    }
}

fn logged_in_session() -> Session<FakeGateway> {
    let mut session = Session::new(FakeGateway::default());
    session.login("ada@example.com", "secret").expect("login");
    session
}

#[test]
fn create_project_swaps_in_the_server_id() {
    let mut session = logged_in_session();
    let project_id = session.create_project("Alpha", None).expect("create");

    assert_eq!(project_id, "srv-p1");
    let project = session.projects.project(&project_id).expect("project");
    assert_eq!(project.owner_id.as_deref(), Some("u1"));
    assert!(!tabula_core::id::is_local(&project.id));
}

#[test]
fn create_project_requires_a_login() {
    let mut session = Session::new(FakeGateway::default());
    assert!(matches!(
        session.create_project("Alpha", None),
        Err(ClientError::NotAuthenticated)
    ));
}

#[test]
fn failed_project_create_rolls_back_the_speculative_insert() {
    let mut session = logged_in_session();
    session.gateway().fail_create_project.set(true);

    assert!(matches!(
        session.create_project("Alpha", None),
        Err(ClientError::Transport(_))
    ));
    assert!(session.projects.projects().is_empty());
}

#[test]
fn failed_task_create_rolls_back_the_speculative_row() {
    let mut session = logged_in_session();
    let project_id = session.create_project("Alpha", None).expect("create");
    session
        .projects
        .move_block_to_workspace(&project_id, "deadline")
        .expect("activate");

    session.gateway().fail_create_task.set(true);
    assert!(session.add_row(&project_id).is_err());
    assert!(session.projects.project(&project_id).expect("project").rows.is_empty());

    // The same insert succeeds once the backend recovers.
    session.gateway().fail_create_task.set(false);
    let row_id = session.add_row(&project_id).expect("add_row");
    assert!(row_id.starts_with("srv-t"));
    let project = session.projects.project(&project_id).expect("project");
    assert!(project.row(&row_id).expect("row").cell("deadline").is_some());
}

#[test]
fn failed_load_keeps_previous_state() {
    let mut session = logged_in_session();
    session.gateway().projects.borrow_mut().push(WireProject {
        id: "srv-p9".to_string(),
        name: "Existing".to_string(),
        user_id: Some("u1".to_string()),
        department_id: None,
        blocks: Vec::new(),
        tasks: Vec::new(),
    });

    session.load_projects();
    assert_eq!(session.projects.projects().len(), 1);

    session.gateway().fail_fetch_projects.set(true);
    session.load_projects();
    assert_eq!(session.projects.projects().len(), 1);
    assert_eq!(session.projects.projects()[0].name, "Existing");
}

#[test]
fn save_transmits_the_full_block_and_task_set() {
    let mut session = logged_in_session();
    let project_id = session.create_project("Alpha", None).expect("create");
    session
        .projects
        .move_block_to_workspace(&project_id, "control")
        .expect("activate");
    session
        .projects
        .move_block_to_workspace(&project_id, "deadline")
        .expect("activate");
    session.add_row(&project_id).expect("add_row");
    session.add_row(&project_id).expect("add_row");

    session.save_project(&project_id).expect("save");

    let saves = session.gateway().saves.borrow();
    let (saved_id, body) = saves.last().expect("one save recorded");
    assert_eq!(saved_id, &project_id);
    assert_eq!(body.blocks.len(), 4);
    assert_eq!(body.tasks.len(), 2);

    let control = body.blocks.iter().find(|b| b.id == "control").expect("control");
    let deadline = body.blocks.iter().find(|b| b.id == "deadline").expect("deadline");
    let document = body.blocks.iter().find(|b| b.id == "document").expect("document");
    assert_eq!(control.order, Some(0));
    assert_eq!(deadline.order, Some(1));
    assert_eq!(document.order, None);
}

#[test]
fn status_edit_survives_a_rejected_persist() {
    let mut session = logged_in_session();
    let project_id = session.create_project("Alpha", None).expect("create");
    let row_id = session.add_row(&project_id).expect("add_row");

    session.gateway().fail_update_status.set(true);
    assert!(session
        .set_status(&project_id, &row_id, TaskStatus::Submitted)
        .is_err());

    let project = session.projects.project(&project_id).expect("project");
    assert_eq!(project.row(&row_id).expect("row").status, TaskStatus::Submitted);
}

#[test]
fn row_delete_is_server_first() {
    let mut session = logged_in_session();
    let project_id = session.create_project("Alpha", None).expect("create");
    let row_id = session.add_row(&project_id).expect("add_row");

    session.gateway().fail_delete_task.set(true);
    assert!(session.delete_row(&project_id, &row_id).is_err());
    assert_eq!(session.projects.project(&project_id).expect("project").rows.len(), 1);

    session.gateway().fail_delete_task.set(false);
    session.delete_row(&project_id, &row_id).expect("delete");
    assert!(session.projects.project(&project_id).expect("project").rows.is_empty());
}

#[test]
fn logout_clears_all_session_state() {
    let mut session = logged_in_session();
    session.create_project("Alpha", None).expect("create");
    session.load_users();
    session.load_departments();

    session.logout();
    assert!(!session.auth.is_authenticated());
    assert!(session.projects.projects().is_empty());
    assert!(session.users.users().is_empty());
    assert!(session.departments.departments().is_empty());
}

#[test]
fn department_crud_updates_the_directory() {
    let mut session = logged_in_session();
    let department_id = session.create_department("Design").expect("create");
    assert!(session.departments.department(&department_id).is_some());

    session
        .update_department(&department_id, "Design & Research")
        .expect("update");
    assert_eq!(
        session
            .departments
            .department(&department_id)
            .map(|d| d.name.as_str()),
        Some("Design & Research")
    );

    session.delete_department(&department_id).expect("delete");
    assert!(session.departments.department(&department_id).is_none());
}
