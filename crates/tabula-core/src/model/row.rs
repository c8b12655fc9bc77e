use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{fmt, str::FromStr};

use super::block::{ParseEnumError, normalize};
use super::cell::CellValue;

/// Submission status of a task row.
///
/// Transitions are unconstrained: any status may be set from any other.
/// There is no workflow state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    NotSubmitted,
    Submitted,
    Approved,
    Rejected,
}

impl TaskStatus {
    const fn as_str(self) -> &'static str {
        match self {
            Self::NotSubmitted => "not-submitted",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "not-submitted" => Ok(Self::NotSubmitted),
            "submitted" => Ok(Self::Submitted),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseEnumError {
                expected: "status",
                got: s.to_string(),
            }),
        }
    }
}

/// A table row: one cell per active block, keyed by block id, plus a status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    pub status: TaskStatus,
    pub cells: BTreeMap<String, CellValue>,
}

impl Row {
    /// An empty row with the default status. Cell seeding is the store's job.
    #[must_use]
    pub fn new(id: String) -> Self {
        Self {
            id,
            status: TaskStatus::default(),
            cells: BTreeMap::new(),
        }
    }

    /// Returns the cell for `block_id`, if one exists.
    #[must_use]
    pub fn cell(&self, block_id: &str) -> Option<&CellValue> {
        self.cells.get(block_id)
    }
}
