use serde::{Deserialize, Serialize};

/// An organizational unit projects and users can belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub name: String,
    /// Member user ids. The backend omits the field for empty departments.
    #[serde(default)]
    pub users: Vec<String>,
}
