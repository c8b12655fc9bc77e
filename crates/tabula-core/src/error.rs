use std::fmt;
use thiserror::Error;

use crate::model::block::BlockType;

/// The entity classes a store lookup can miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Project,
    Block,
    Row,
    Department,
    User,
}

impl EntityKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Block => "block",
            Self::Row => "row",
            Self::Department => "department",
            Self::User => "user",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by the in-memory store operations.
///
/// Transport failures are a separate taxonomy owned by the client layer;
/// the store never performs I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Input rejected before any mutation took place.
    #[error("validation failed: {reason}")]
    Validation { reason: String },

    /// A referenced entity does not exist (or, for cells, is not active).
    #[error("{kind} not found: '{id}'")]
    NotFound { kind: EntityKind, id: String },

    /// A cell value whose shape does not match the block's declared type.
    #[error("cell value for block '{block_id}' does not match type '{expected}'")]
    TypeMismatch {
        block_id: String,
        expected: BlockType,
    },
}

impl StoreError {
    /// Stable machine-readable code (`E####`) for each variant.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "E1001",
            Self::TypeMismatch { .. } => "E1002",
            Self::NotFound { .. } => "E2001",
        }
    }

    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}
