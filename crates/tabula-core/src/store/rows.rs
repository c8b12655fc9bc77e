//! Row lifecycle and the cell synchronization engine.
//!
//! Synchronization runs at every point the active-column set changes, so
//! read paths can join headers with row cells without null-checking.

use super::ProjectStore;
use crate::error::{EntityKind, StoreError};
use crate::event::ChangeEvent;
use crate::id;
use crate::model::cell::CellValue;
use crate::model::row::{Row, TaskStatus};

impl ProjectStore {
    /// Append a row seeded with a default cell for every active block.
    /// The id is speculative until the server confirms the insert.
    ///
    /// # Errors
    ///
    /// `NotFound` if `project_id` is unknown.
    pub fn add_row(&mut self, project_id: &str) -> Result<String, StoreError> {
        let project = self.project_mut(project_id)?;
        let mut row = Row::new(id::fresh_local());
        for block in project.active_blocks() {
            row.cells
                .insert(block.id.clone(), block.block_type.default_cell());
        }
        let row_id = row.id.clone();
        project.rows.push(row);
        self.notify(&ChangeEvent::RowAdded {
            project_id: project_id.to_string(),
            row_id: row_id.clone(),
        });
        Ok(row_id)
    }

    /// Remove a row.
    ///
    /// # Errors
    ///
    /// `NotFound` if the project or row is unknown.
    pub fn delete_row(&mut self, project_id: &str, row_id: &str) -> Result<(), StoreError> {
        let project = self.project_mut(project_id)?;
        let index = project
            .rows
            .iter()
            .position(|r| r.id == row_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Row, row_id))?;
        project.rows.remove(index);
        self.notify(&ChangeEvent::RowRemoved {
            project_id: project_id.to_string(),
            row_id: row_id.to_string(),
        });
        Ok(())
    }

    /// Additive cell fill for one block: every row missing a cell for it
    /// gets the type default. Never overwrites an existing cell, so user
    /// edits survive repeated synchronization.
    ///
    /// # Errors
    ///
    /// `NotFound` if the project or block is unknown.
    pub fn sync_cells_for_block(
        &mut self,
        project_id: &str,
        block_id: &str,
    ) -> Result<(), StoreError> {
        let project = self.project_mut(project_id)?;
        if project.block(block_id).is_none() {
            return Err(StoreError::not_found(EntityKind::Block, block_id));
        }
        project.sync_cells_for_block(block_id);
        Ok(())
    }

    /// Overwrite a single cell.
    ///
    /// # Errors
    ///
    /// `NotFound` if the project, row, or block is unknown, or the block is
    /// not active; `TypeMismatch` if the value shape does not fit the
    /// block's declared type.
    pub fn set_cell(
        &mut self,
        project_id: &str,
        row_id: &str,
        block_id: &str,
        value: CellValue,
    ) -> Result<(), StoreError> {
        let project = self.project_mut(project_id)?;
        let block_type = project
            .block(block_id)
            .map(|b| b.block_type)
            .ok_or_else(|| StoreError::not_found(EntityKind::Block, block_id))?;
        if !project.is_active(block_id) {
            return Err(StoreError::not_found(EntityKind::Block, block_id));
        }
        if !value.matches(block_type) {
            return Err(StoreError::TypeMismatch {
                block_id: block_id.to_string(),
                expected: block_type,
            });
        }
        let row = project
            .row_mut(row_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Row, row_id))?;
        row.cells.insert(block_id.to_string(), value);
        self.notify(&ChangeEvent::CellUpdated {
            project_id: project_id.to_string(),
            row_id: row_id.to_string(),
            block_id: block_id.to_string(),
        });
        Ok(())
    }

    /// Set a row's status. Any status may follow any other.
    ///
    /// # Errors
    ///
    /// `NotFound` if the project or row is unknown.
    pub fn update_status(
        &mut self,
        project_id: &str,
        row_id: &str,
        status: TaskStatus,
    ) -> Result<(), StoreError> {
        let project = self.project_mut(project_id)?;
        let row = project
            .row_mut(row_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Row, row_id))?;
        row.status = status;
        self.notify(&ChangeEvent::StatusUpdated {
            project_id: project_id.to_string(),
            row_id: row_id.to_string(),
        });
        Ok(())
    }

    /// Set a row's status given only the row id, scanning every project.
    /// Returns the owning project's id.
    ///
    /// # Errors
    ///
    /// `NotFound` if no project owns a row with `row_id`.
    pub fn update_status_anywhere(
        &mut self,
        row_id: &str,
        status: TaskStatus,
    ) -> Result<String, StoreError> {
        let project_id = self
            .projects
            .iter()
            .find(|p| p.row(row_id).is_some())
            .map(|p| p.id.clone())
            .ok_or_else(|| StoreError::not_found(EntityKind::Row, row_id))?;
        self.update_status(&project_id, row_id, status)?;
        Ok(project_id)
    }

    /// Swap a speculative local row id for the server-issued one. Cells are
    /// keyed by block id, so no cell data moves.
    ///
    /// # Errors
    ///
    /// `NotFound` if the project or row is unknown.
    pub fn confirm_row_id(
        &mut self,
        project_id: &str,
        old_id: &str,
        new_id: &str,
    ) -> Result<(), StoreError> {
        let project = self.project_mut(project_id)?;
        let row = project
            .row_mut(old_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Row, old_id))?;
        row.id = new_id.to_string();
        self.notify(&ChangeEvent::RowIdConfirmed {
            project_id: project_id.to_string(),
            old_id: old_id.to_string(),
            new_id: new_id.to_string(),
        });
        Ok(())
    }
}
