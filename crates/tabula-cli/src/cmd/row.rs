//! `tbl row` — task rows: add, delete, edit cells, set status.

use anyhow::Context;
use clap::{Args, Subcommand};
use std::str::FromStr;

use crate::cmd::fail;
use crate::output::{OutputMode, render_success};
use tabula_client::{HttpGateway, Session};
use tabula_core::StoreError;
use tabula_core::error::EntityKind;
use tabula_core::model::block::BlockType;
use tabula_core::model::cell::{AttachmentCell, CellValue, FileRef};
use tabula_core::model::row::TaskStatus;

#[derive(Subcommand, Debug)]
pub enum RowCmd {
    /// Append a row, seeded with a default cell per table header.
    Add(ProjectRef),
    /// Delete a row.
    Delete(RowRef),
    /// Set one cell. Attachment cells take `name=url`, or `-` to clear.
    Set(SetArgs),
    /// Set a row's status: not-submitted, submitted, approved, rejected.
    Status(StatusArgs),
}

#[derive(Args, Debug)]
pub struct ProjectRef {
    /// Project id.
    pub project_id: String,
}

#[derive(Args, Debug)]
pub struct RowRef {
    /// Project id.
    pub project_id: String,
    /// Row id.
    pub row_id: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Project id.
    pub project_id: String,
    /// Row id.
    pub row_id: String,
    /// Block id of the cell to edit.
    pub block_id: String,
    /// The new value, shaped by the block's type.
    pub value: String,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Project id.
    pub project_id: String,
    /// Row id.
    pub row_id: String,
    /// The new status.
    pub status: String,
}

pub fn run(
    cmd: &RowCmd,
    session: &mut Session<HttpGateway>,
    output: OutputMode,
) -> anyhow::Result<()> {
    session.load_projects();
    match cmd {
        RowCmd::Add(args) => {
            let row_id = session
                .add_row(&args.project_id)
                .map_err(|err| fail(output, &err))?;
            render_success(output, &format!("added row {row_id}"))
        }
        RowCmd::Delete(args) => {
            session
                .delete_row(&args.project_id, &args.row_id)
                .map_err(|err| fail(output, &err))?;
            render_success(output, &format!("deleted row {}", args.row_id))
        }
        RowCmd::Set(args) => {
            let block_type = session
                .projects
                .project(&args.project_id)
                .and_then(|p| p.block(&args.block_id))
                .map(|b| b.block_type)
                .ok_or_else(|| {
                    fail(
                        output,
                        &StoreError::NotFound {
                            kind: EntityKind::Block,
                            id: args.block_id.clone(),
                        }
                        .into(),
                    )
                })?;
            let value = parse_cell_value(block_type, &args.value)?;
            session
                .projects
                .set_cell(&args.project_id, &args.row_id, &args.block_id, value)
                .map_err(|err| fail(output, &err.into()))?;
            session
                .save_project(&args.project_id)
                .map_err(|err| fail(output, &err))?;
            render_success(output, &format!("updated cell {}", args.block_id))
        }
        RowCmd::Status(args) => {
            let status = TaskStatus::from_str(&args.status).map_err(|err| anyhow::anyhow!("{err}"))?;
            session
                .set_status(&args.project_id, &args.row_id, status)
                .map_err(|err| fail(output, &err))?;
            render_success(output, &format!("status set to {status}"))
        }
    }
}

/// Shape a raw CLI value for the target block type.
fn parse_cell_value(block_type: BlockType, raw: &str) -> anyhow::Result<CellValue> {
    match block_type {
        BlockType::Number => raw
            .trim()
            .parse::<f64>()
            .map(CellValue::Number)
            .with_context(|| format!("'{raw}' is not a number")),
        BlockType::File | BlockType::Report => {
            if raw == "-" {
                Ok(CellValue::Attachment(AttachmentCell::none()))
            } else if let Some((name, url)) = raw.split_once('=') {
                Ok(CellValue::Attachment(AttachmentCell::present(FileRef {
                    name: name.to_string(),
                    url: url.to_string(),
                })))
            } else {
                anyhow::bail!("attachment cells take 'name=url', or '-' to clear")
            }
        }
        BlockType::Text | BlockType::Date | BlockType::Control => {
            Ok(CellValue::Text(raw.to_string()))
        }
    }
}
