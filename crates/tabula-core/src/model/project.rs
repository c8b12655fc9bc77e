use serde::{Deserialize, Serialize};

use super::block::{Block, BlockType};
use super::row::Row;

/// A project: block schema, active-column order, and task rows.
///
/// Structural invariants, re-established by every store operation:
///
/// - every id in `workspace_order` names a block in `blocks`, with no
///   duplicates; the sequence is the authoritative table-header order;
/// - every row carries a cell for every id in `workspace_order`, seeded with
///   the block-type default at the moment the block became active for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub department_id: Option<String>,
    pub blocks: Vec<Block>,
    pub workspace_order: Vec<String>,
    pub rows: Vec<Row>,
}

impl Project {
    /// The fixed starter column set every new project receives.
    #[must_use]
    pub fn starter_blocks() -> Vec<Block> {
        vec![
            Block {
                id: "task-name".to_string(),
                label: "Task name".to_string(),
                block_type: BlockType::Text,
                color: "#f0f0f0".to_string(),
            },
            Block {
                id: "deadline".to_string(),
                label: "Deadline".to_string(),
                block_type: BlockType::Date,
                color: "#e0f7fa".to_string(),
            },
            Block {
                id: "document".to_string(),
                label: "Document".to_string(),
                block_type: BlockType::File,
                color: "#fff3e0".to_string(),
            },
            Block {
                id: "control".to_string(),
                label: "Control".to_string(),
                block_type: BlockType::Control,
                color: "#ffe0b2".to_string(),
            },
        ]
    }

    /// Returns the block with `block_id`, if the project owns one.
    #[must_use]
    pub fn block(&self, block_id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == block_id)
    }

    /// Returns the row with `row_id`, if the project owns one.
    #[must_use]
    pub fn row(&self, row_id: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == row_id)
    }

    pub(crate) fn row_mut(&mut self, row_id: &str) -> Option<&mut Row> {
        self.rows.iter_mut().find(|r| r.id == row_id)
    }

    /// Whether `block_id` is in the workspace order (rendered as a header).
    #[must_use]
    pub fn is_active(&self, block_id: &str) -> bool {
        self.workspace_order.iter().any(|id| id == block_id)
    }

    /// Blocks in workspace order, skipping any stale id with no matching
    /// block.
    #[must_use]
    pub fn active_blocks(&self) -> Vec<&Block> {
        self.workspace_order
            .iter()
            .filter_map(|id| self.block(id))
            .collect()
    }

    /// Blocks not in the workspace order, in block insertion order.
    #[must_use]
    pub fn sidebar_blocks(&self) -> Vec<&Block> {
        self.blocks
            .iter()
            .filter(|b| !self.is_active(&b.id))
            .collect()
    }

    /// Additive cell fill: every row missing a cell for `block_id` gets the
    /// block-type default. Existing values are never overwritten.
    pub(crate) fn sync_cells_for_block(&mut self, block_id: &str) {
        let Some(block_type) = self.block(block_id).map(|b| b.block_type) else {
            return;
        };
        for row in &mut self.rows {
            row.cells
                .entry(block_id.to_string())
                .or_insert_with(|| block_type.default_cell());
        }
    }

    /// Remove every row's cell for `block_id`. Inactive-column data is
    /// discarded, not hidden.
    pub(crate) fn drop_cells_for_block(&mut self, block_id: &str) {
        for row in &mut self.rows {
            row.cells.remove(block_id);
        }
    }

    /// Check the structural invariants, returning the first violation found.
    ///
    /// # Errors
    ///
    /// Returns a description of the violated invariant.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut seen = std::collections::HashSet::new();
        for id in &self.workspace_order {
            if self.block(id).is_none() {
                return Err(format!("workspace order references unknown block '{id}'"));
            }
            if !seen.insert(id.as_str()) {
                return Err(format!("workspace order repeats block '{id}'"));
            }
        }
        for row in &self.rows {
            for id in &self.workspace_order {
                if !row.cells.contains_key(id) {
                    return Err(format!("row '{}' has no cell for active block '{id}'", row.id));
                }
            }
        }
        Ok(())
    }
}
