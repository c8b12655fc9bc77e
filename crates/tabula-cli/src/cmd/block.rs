//! `tbl block` — column management: add, activate, order, delete.

use clap::{Args, Subcommand};
use serde::Serialize;
use std::io::Write as _;
use std::str::FromStr;

use crate::cmd::fail;
use crate::output::{OutputMode, render, render_success};
use tabula_client::{HttpGateway, Session};
use tabula_core::model::block::{BlockSpec, BlockType};

#[derive(Subcommand, Debug)]
pub enum BlockCmd {
    /// Show a project's columns: table headers, then the sidebar.
    List(ProjectRef),
    /// Add a column. New columns start in the sidebar.
    Add(AddArgs),
    /// Activate a column: append it to the table headers.
    Activate(BlockRef),
    /// Deactivate a column: back to the sidebar, discarding its cells.
    Deactivate(BlockRef),
    /// Replace the header order wholesale.
    Reorder(ReorderArgs),
    /// Delete a column everywhere.
    Delete(BlockRef),
}

#[derive(Args, Debug)]
pub struct ProjectRef {
    /// Project id.
    pub project_id: String,
}

#[derive(Args, Debug)]
pub struct BlockRef {
    /// Project id.
    pub project_id: String,
    /// Block id.
    pub block_id: String,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Project id.
    pub project_id: String,

    /// Column label.
    #[arg(short, long)]
    pub label: String,

    /// Column type: text, date, number, file, report, control.
    #[arg(short = 't', long = "type", default_value = "text")]
    pub block_type: String,

    /// Display color.
    #[arg(short, long, default_value = "#f0f0f0")]
    pub color: String,
}

#[derive(Args, Debug)]
pub struct ReorderArgs {
    /// Project id.
    pub project_id: String,

    /// Block ids in the desired header order.
    #[arg(required = true)]
    pub block_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ColumnView {
    headers: Vec<ColumnSummary>,
    sidebar: Vec<ColumnSummary>,
}

#[derive(Debug, Serialize)]
struct ColumnSummary {
    id: String,
    label: String,
    #[serde(rename = "type")]
    block_type: String,
}

pub fn run(
    cmd: &BlockCmd,
    session: &mut Session<HttpGateway>,
    output: OutputMode,
) -> anyhow::Result<()> {
    session.load_projects();
    match cmd {
        BlockCmd::List(args) => {
            let headers = session
                .projects
                .table_header_view(&args.project_id)
                .map_err(|err| fail(output, &err.into()))?
                .into_iter()
                .map(summarize)
                .collect();
            let sidebar = session
                .projects
                .sidebar_view(&args.project_id)
                .map_err(|err| fail(output, &err.into()))?
                .into_iter()
                .map(summarize)
                .collect();
            let view = ColumnView { headers, sidebar };
            render(output, &view, |view, w| {
                writeln!(w, "headers:")?;
                for column in &view.headers {
                    writeln!(w, "  {:<14} {:<20} {}", column.id, column.label, column.block_type)?;
                }
                writeln!(w, "sidebar:")?;
                for column in &view.sidebar {
                    writeln!(w, "  {:<14} {:<20} {}", column.id, column.label, column.block_type)?;
                }
                Ok(())
            })
        }
        BlockCmd::Add(args) => {
            let block_type = BlockType::from_str(&args.block_type)
                .map_err(|err| anyhow::anyhow!("{err}"))?;
            let block_id = session
                .projects
                .add_block(
                    &args.project_id,
                    BlockSpec {
                        label: args.label.clone(),
                        block_type,
                        color: args.color.clone(),
                    },
                )
                .map_err(|err| fail(output, &err.into()))?;
            session
                .save_project(&args.project_id)
                .map_err(|err| fail(output, &err))?;
            render_success(output, &format!("added block {block_id} (sidebar)"))
        }
        BlockCmd::Activate(args) => {
            session
                .projects
                .move_block_to_workspace(&args.project_id, &args.block_id)
                .map_err(|err| fail(output, &err.into()))?;
            session
                .save_project(&args.project_id)
                .map_err(|err| fail(output, &err))?;
            render_success(output, &format!("activated block {}", args.block_id))
        }
        BlockCmd::Deactivate(args) => {
            session
                .projects
                .move_block_to_sidebar(&args.project_id, &args.block_id)
                .map_err(|err| fail(output, &err.into()))?;
            session
                .save_project(&args.project_id)
                .map_err(|err| fail(output, &err))?;
            render_success(output, &format!("deactivated block {}", args.block_id))
        }
        BlockCmd::Reorder(args) => {
            session
                .projects
                .reorder_workspace(&args.project_id, &args.block_ids)
                .map_err(|err| fail(output, &err.into()))?;
            session
                .save_project(&args.project_id)
                .map_err(|err| fail(output, &err))?;
            render_success(output, "workspace order updated")
        }
        BlockCmd::Delete(args) => {
            session
                .projects
                .delete_block(&args.project_id, &args.block_id)
                .map_err(|err| fail(output, &err.into()))?;
            session
                .save_project(&args.project_id)
                .map_err(|err| fail(output, &err))?;
            render_success(output, &format!("deleted block {}", args.block_id))
        }
    }
}

fn summarize(block: &tabula_core::model::block::Block) -> ColumnSummary {
    ColumnSummary {
        id: block.id.clone(),
        label: block.label.clone(),
        block_type: block.block_type.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::AddArgs;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: AddArgs,
    }

    #[test]
    fn add_defaults_to_a_text_column() {
        let w = Wrapper::parse_from(["test", "tb-p1", "--label", "Budget"]);
        assert_eq!(w.args.block_type, "text");
        assert_eq!(w.args.color, "#f0f0f0");
    }
}
