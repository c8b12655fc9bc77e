//! In-memory directories for users and departments.
//!
//! Thin collections the session keeps in step with the backend: loads
//! replace them wholesale, CRUD acks update single entries.

use tabula_core::model::department::Department;
use tabula_core::model::user::User;

/// Every registered user, as of the last successful load.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    #[must_use]
    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    /// Users assigned to `department_id`.
    #[must_use]
    pub fn in_department(&self, department_id: &str) -> Vec<&User> {
        self.users
            .iter()
            .filter(|u| u.department_id.as_deref() == Some(department_id))
            .collect()
    }

    /// Users with no department assignment.
    #[must_use]
    pub fn unassigned(&self) -> Vec<&User> {
        self.users
            .iter()
            .filter(|u| u.department_id.is_none())
            .collect()
    }

    pub(crate) fn replace(&mut self, users: Vec<User>) {
        self.users = users;
    }

    pub(crate) fn upsert(&mut self, user: User) {
        if let Some(existing) = self.users.iter_mut().find(|u| u.id == user.id) {
            *existing = user;
        } else {
            self.users.push(user);
        }
    }

    pub(crate) fn remove(&mut self, user_id: &str) {
        self.users.retain(|u| u.id != user_id);
    }
}

/// Every department, as of the last successful load.
#[derive(Debug, Clone, Default)]
pub struct DepartmentDirectory {
    departments: Vec<Department>,
}

impl DepartmentDirectory {
    #[must_use]
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    #[must_use]
    pub fn department(&self, department_id: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.id == department_id)
    }

    pub(crate) fn replace(&mut self, departments: Vec<Department>) {
        self.departments = departments;
    }

    pub(crate) fn upsert(&mut self, department: Department) {
        if let Some(existing) = self
            .departments
            .iter_mut()
            .find(|d| d.id == department.id)
        {
            *existing = department;
        } else {
            self.departments.push(department);
        }
    }

    pub(crate) fn remove(&mut self, department_id: &str) {
        self.departments.retain(|d| d.id != department_id);
    }
}

#[cfg(test)]
mod tests {
    use super::{DepartmentDirectory, UserDirectory};
    use tabula_core::model::department::Department;
    use tabula_core::model::user::User;

    fn user(id: &str, department_id: Option<&str>) -> User {
        User {
            id: id.to_string(),
            name: id.to_string(),
            email: format!("{id}@example.com"),
            department_id: department_id.map(str::to_string),
            roles: Vec::new(),
        }
    }

    #[test]
    fn department_filters() {
        let mut directory = UserDirectory::default();
        directory.replace(vec![
            user("u1", Some("d1")),
            user("u2", None),
            user("u3", Some("d1")),
        ]);
        assert_eq!(directory.in_department("d1").len(), 2);
        assert_eq!(directory.unassigned().len(), 1);
    }

    #[test]
    fn upsert_replaces_or_appends() {
        let mut directory = DepartmentDirectory::default();
        directory.upsert(Department {
            id: "d1".to_string(),
            name: "Design".to_string(),
            users: Vec::new(),
        });
        directory.upsert(Department {
            id: "d1".to_string(),
            name: "Design & Research".to_string(),
            users: Vec::new(),
        });
        assert_eq!(directory.departments().len(), 1);
        assert_eq!(
            directory.department("d1").map(|d| d.name.as_str()),
            Some("Design & Research")
        );

        directory.remove("d1");
        assert!(directory.departments().is_empty());
    }
}
