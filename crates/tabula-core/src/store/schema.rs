//! Schema operations: block lifecycle, activation, and ordering.

use super::ProjectStore;
use crate::error::{EntityKind, StoreError};
use crate::event::ChangeEvent;
use crate::id;
use crate::model::block::{Block, BlockSpec};
use crate::model::project::Project;

impl ProjectStore {
    /// Create a project with the fixed starter column set, an empty
    /// workspace order, and no rows. The id is speculative until the server
    /// confirms the insert.
    ///
    /// # Errors
    ///
    /// `Validation` if `name` is empty after trimming.
    pub fn create_project(
        &mut self,
        name: &str,
        owner_id: Option<&str>,
        department_id: Option<&str>,
    ) -> Result<String, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::validation("project name must not be empty"));
        }

        let project = Project {
            id: id::fresh_local(),
            name: name.to_string(),
            owner_id: owner_id.map(str::to_string),
            department_id: department_id.map(str::to_string),
            blocks: Project::starter_blocks(),
            workspace_order: Vec::new(),
            rows: Vec::new(),
        };
        let project_id = project.id.clone();
        self.projects.push(project);
        self.notify(&ChangeEvent::ProjectCreated {
            project_id: project_id.clone(),
        });
        Ok(project_id)
    }

    /// Append a new block with a fresh id. The block starts in the sidebar;
    /// activation is a separate step.
    ///
    /// # Errors
    ///
    /// `NotFound` if `project_id` is unknown.
    pub fn add_block(&mut self, project_id: &str, spec: BlockSpec) -> Result<String, StoreError> {
        let project = self.project_mut(project_id)?;
        let block = Block {
            id: id::fresh(),
            label: spec.label,
            block_type: spec.block_type,
            color: spec.color,
        };
        let block_id = block.id.clone();
        project.blocks.push(block);
        self.notify(&ChangeEvent::BlockAdded {
            project_id: project_id.to_string(),
            block_id: block_id.clone(),
        });
        Ok(block_id)
    }

    /// Delete a block, cascading: its workspace-order entry and every row's
    /// cell for it are removed too.
    ///
    /// # Errors
    ///
    /// `NotFound` if the project or block is unknown.
    pub fn delete_block(&mut self, project_id: &str, block_id: &str) -> Result<(), StoreError> {
        let project = self.project_mut(project_id)?;
        let index = project
            .blocks
            .iter()
            .position(|b| b.id == block_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Block, block_id))?;
        project.blocks.remove(index);
        project.workspace_order.retain(|id| id != block_id);
        project.drop_cells_for_block(block_id);
        self.notify(&ChangeEvent::BlockRemoved {
            project_id: project_id.to_string(),
            block_id: block_id.to_string(),
        });
        Ok(())
    }

    /// Activate a block: append it to the end of the workspace order and
    /// seed a default cell for it in every row. Idempotent — activating an
    /// already-active block is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// `NotFound` if the project or block is unknown.
    pub fn move_block_to_workspace(
        &mut self,
        project_id: &str,
        block_id: &str,
    ) -> Result<(), StoreError> {
        let project = self.project_mut(project_id)?;
        if project.block(block_id).is_none() {
            return Err(StoreError::not_found(EntityKind::Block, block_id));
        }
        if project.is_active(block_id) {
            return Ok(());
        }
        project.workspace_order.push(block_id.to_string());
        project.sync_cells_for_block(block_id);
        self.notify(&ChangeEvent::BlockActivated {
            project_id: project_id.to_string(),
            block_id: block_id.to_string(),
        });
        Ok(())
    }

    /// Demote a block to the sidebar: remove its workspace-order entry and
    /// every row's cell for it. Cell data for inactive columns is discarded,
    /// not hidden. A no-op if the block is already inactive.
    ///
    /// # Errors
    ///
    /// `NotFound` if the project or block is unknown.
    pub fn move_block_to_sidebar(
        &mut self,
        project_id: &str,
        block_id: &str,
    ) -> Result<(), StoreError> {
        let project = self.project_mut(project_id)?;
        if project.block(block_id).is_none() {
            return Err(StoreError::not_found(EntityKind::Block, block_id));
        }
        if !project.is_active(block_id) {
            return Ok(());
        }
        project.workspace_order.retain(|id| id != block_id);
        project.drop_cells_for_block(block_id);
        self.notify(&ChangeEvent::BlockDeactivated {
            project_id: project_id.to_string(),
            block_id: block_id.to_string(),
        });
        Ok(())
    }

    /// Replace the workspace order wholesale.
    ///
    /// Ids that name no block are dropped (logged at warn); duplicates keep
    /// their first occurrence. Newly-present ids are computed against the
    /// order being replaced, then cell-synced; ids that disappear are
    /// demoted with the usual cell cascade.
    ///
    /// # Errors
    ///
    /// `NotFound` if `project_id` is unknown.
    pub fn reorder_workspace(
        &mut self,
        project_id: &str,
        ordered_ids: &[String],
    ) -> Result<(), StoreError> {
        let project = self.project_mut(project_id)?;

        let mut next: Vec<String> = Vec::with_capacity(ordered_ids.len());
        for block_id in ordered_ids {
            if project.block(block_id).is_none() {
                tracing::warn!(block_id = %block_id, "reorder skipped unknown block id");
                continue;
            }
            if !next.contains(block_id) {
                next.push(block_id.clone());
            }
        }

        let added: Vec<String> = next
            .iter()
            .filter(|id| !project.workspace_order.contains(id))
            .cloned()
            .collect();
        let removed: Vec<String> = project
            .workspace_order
            .iter()
            .filter(|id| !next.contains(id))
            .cloned()
            .collect();

        project.workspace_order = next;
        for block_id in &added {
            project.sync_cells_for_block(block_id);
        }
        for block_id in &removed {
            project.drop_cells_for_block(block_id);
        }
        self.notify(&ChangeEvent::WorkspaceReordered {
            project_id: project_id.to_string(),
        });
        Ok(())
    }

    /// Blocks not in the workspace order, in block insertion order.
    ///
    /// # Errors
    ///
    /// `NotFound` if `project_id` is unknown.
    pub fn sidebar_view(&self, project_id: &str) -> Result<Vec<&Block>, StoreError> {
        self.project(project_id)
            .map(Project::sidebar_blocks)
            .ok_or_else(|| StoreError::not_found(EntityKind::Project, project_id))
    }

    /// Blocks in workspace order, skipping stale ids.
    ///
    /// # Errors
    ///
    /// `NotFound` if `project_id` is unknown.
    pub fn table_header_view(&self, project_id: &str) -> Result<Vec<&Block>, StoreError> {
        self.project(project_id)
            .map(Project::active_blocks)
            .ok_or_else(|| StoreError::not_found(EntityKind::Project, project_id))
    }
}

#[cfg(test)]
mod tests {
    use super::super::ProjectStore;
    use crate::error::StoreError;
    use crate::model::block::{BlockSpec, BlockType};

    fn store_with_project() -> (ProjectStore, String) {
        let mut store = ProjectStore::new();
        let id = store.create_project("Alpha", Some("u1"), None).unwrap();
        (store, id)
    }

    #[test]
    fn create_rejects_empty_names() {
        let mut store = ProjectStore::new();
        assert!(matches!(
            store.create_project("", None, None),
            Err(StoreError::Validation { .. })
        ));
        assert!(matches!(
            store.create_project("   ", None, None),
            Err(StoreError::Validation { .. })
        ));
    }

    #[test]
    fn created_project_matches_the_starter_shape() {
        let (store, id) = store_with_project();
        let project = store.project(&id).unwrap();
        assert_eq!(project.name, "Alpha");
        assert_eq!(project.owner_id.as_deref(), Some("u1"));
        assert_eq!(project.blocks.len(), 4);
        assert!(project.workspace_order.is_empty());
        assert!(project.rows.is_empty());
    }

    #[test]
    fn add_block_does_not_activate() {
        let (mut store, id) = store_with_project();
        let block_id = store
            .add_block(
                &id,
                BlockSpec {
                    label: "Budget".to_string(),
                    block_type: BlockType::Number,
                    color: "#ffffff".to_string(),
                },
            )
            .unwrap();
        let project = store.project(&id).unwrap();
        assert!(project.block(&block_id).is_some());
        assert!(!project.is_active(&block_id));
        assert_eq!(store.sidebar_view(&id).unwrap().len(), 5);
    }

    #[test]
    fn activation_is_idempotent() {
        let (mut store, id) = store_with_project();
        store.move_block_to_workspace(&id, "deadline").unwrap();
        store.move_block_to_workspace(&id, "deadline").unwrap();
        let project = store.project(&id).unwrap();
        assert_eq!(project.workspace_order, ["deadline"]);
    }

    #[test]
    fn activation_of_unknown_block_fails() {
        let (mut store, id) = store_with_project();
        assert!(matches!(
            store.move_block_to_workspace(&id, "ghost"),
            Err(StoreError::NotFound { .. })
        ));
        assert!(store.move_block_to_workspace("nope", "deadline").is_err());
    }

    #[test]
    fn demotion_drops_cells() {
        let (mut store, id) = store_with_project();
        store.move_block_to_workspace(&id, "document").unwrap();
        store.add_row(&id).unwrap();
        store.move_block_to_sidebar(&id, "document").unwrap();

        let project = store.project(&id).unwrap();
        assert!(project.workspace_order.is_empty());
        assert!(project.rows[0].cell("document").is_none());
    }

    #[test]
    fn demoting_an_inactive_block_is_a_no_op() {
        let (mut store, id) = store_with_project();
        store.move_block_to_sidebar(&id, "deadline").unwrap();
        assert!(store.project(&id).unwrap().workspace_order.is_empty());
    }

    #[test]
    fn delete_block_cascades_everywhere() {
        let (mut store, id) = store_with_project();
        store.move_block_to_workspace(&id, "deadline").unwrap();
        store.add_row(&id).unwrap();
        store.delete_block(&id, "deadline").unwrap();

        let project = store.project(&id).unwrap();
        assert!(project.block("deadline").is_none());
        assert!(project.workspace_order.is_empty());
        assert!(project.rows[0].cell("deadline").is_none());
    }

    #[test]
    fn reorder_replaces_wholesale_and_syncs_new_ids() {
        let (mut store, id) = store_with_project();
        store.move_block_to_workspace(&id, "deadline").unwrap();
        store.add_row(&id).unwrap();

        // "control" was not active before the reorder; its cells must be
        // seeded against the order that was replaced, not the new one.
        store
            .reorder_workspace(
                &id,
                &["control".to_string(), "deadline".to_string()],
            )
            .unwrap();

        let project = store.project(&id).unwrap();
        assert_eq!(project.workspace_order, ["control", "deadline"]);
        assert!(project.rows[0].cell("control").is_some());
        assert!(project.rows[0].cell("deadline").is_some());
    }

    #[test]
    fn reorder_drops_unknown_ids_and_duplicates() {
        let (mut store, id) = store_with_project();
        store
            .reorder_workspace(
                &id,
                &[
                    "ghost".to_string(),
                    "deadline".to_string(),
                    "deadline".to_string(),
                ],
            )
            .unwrap();
        assert_eq!(store.project(&id).unwrap().workspace_order, ["deadline"]);
    }

    #[test]
    fn reorder_omission_demotes_with_cascade() {
        let (mut store, id) = store_with_project();
        store.move_block_to_workspace(&id, "deadline").unwrap();
        store.move_block_to_workspace(&id, "control").unwrap();
        store.add_row(&id).unwrap();

        store
            .reorder_workspace(&id, &["control".to_string()])
            .unwrap();

        let project = store.project(&id).unwrap();
        assert_eq!(project.workspace_order, ["control"]);
        assert!(project.rows[0].cell("deadline").is_none());
    }

    #[test]
    fn views_split_sidebar_from_headers() {
        let (mut store, id) = store_with_project();
        store.move_block_to_workspace(&id, "control").unwrap();
        store.move_block_to_workspace(&id, "task-name").unwrap();

        let headers: Vec<&str> = store
            .table_header_view(&id)
            .unwrap()
            .iter()
            .map(|b| b.id.as_str())
            .collect();
        assert_eq!(headers, ["control", "task-name"]);

        let sidebar: Vec<&str> = store
            .sidebar_view(&id)
            .unwrap()
            .iter()
            .map(|b| b.id.as_str())
            .collect();
        assert_eq!(sidebar, ["deadline", "document"]);
    }
}
