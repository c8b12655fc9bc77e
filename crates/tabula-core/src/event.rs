//! Change notifications emitted by the store after every mutation.
//!
//! Observers are notified once the mutation has fully completed, so they
//! always see consistent state. The string representation uses the
//! `entity.verb` dotted format used in logs.

use serde::Serialize;

/// One completed store mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ChangeEvent {
    ProjectCreated { project_id: String },
    ProjectRemoved { project_id: String },
    ProjectIdConfirmed { old_id: String, new_id: String },
    BlockAdded { project_id: String, block_id: String },
    BlockRemoved { project_id: String, block_id: String },
    BlockActivated { project_id: String, block_id: String },
    BlockDeactivated { project_id: String, block_id: String },
    WorkspaceReordered { project_id: String },
    RowAdded { project_id: String, row_id: String },
    RowRemoved { project_id: String, row_id: String },
    RowIdConfirmed {
        project_id: String,
        old_id: String,
        new_id: String,
    },
    CellUpdated {
        project_id: String,
        row_id: String,
        block_id: String,
    },
    StatusUpdated { project_id: String, row_id: String },
}

impl ChangeEvent {
    /// Canonical `entity.verb` name for logs and observers.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ProjectCreated { .. } => "project.create",
            Self::ProjectRemoved { .. } => "project.remove",
            Self::ProjectIdConfirmed { .. } => "project.confirm-id",
            Self::BlockAdded { .. } => "block.add",
            Self::BlockRemoved { .. } => "block.remove",
            Self::BlockActivated { .. } => "block.activate",
            Self::BlockDeactivated { .. } => "block.deactivate",
            Self::WorkspaceReordered { .. } => "workspace.reorder",
            Self::RowAdded { .. } => "row.add",
            Self::RowRemoved { .. } => "row.remove",
            Self::RowIdConfirmed { .. } => "row.confirm-id",
            Self::CellUpdated { .. } => "cell.update",
            Self::StatusUpdated { .. } => "status.update",
        }
    }
}
