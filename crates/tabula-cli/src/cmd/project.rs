//! `tbl project` — project lifecycle.

use clap::{Args, Subcommand};
use serde::Serialize;
use std::io::Write as _;

use crate::cmd::fail;
use crate::output::{OutputMode, render, render_success};
use tabula_client::{HttpGateway, Session};

#[derive(Subcommand, Debug)]
pub enum ProjectCmd {
    /// List the current user's projects.
    List,
    /// Create a project with the starter column set.
    Create(CreateArgs),
    /// Delete a project.
    Delete(ProjectRef),
    /// Re-send a project's full block and task set to the backend.
    Save(ProjectRef),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Project name.
    #[arg(short, long)]
    pub name: String,

    /// Department to attach the project to.
    #[arg(short, long)]
    pub department: Option<String>,
}

#[derive(Args, Debug)]
pub struct ProjectRef {
    /// Project id.
    pub project_id: String,
}

#[derive(Debug, Serialize)]
struct ProjectSummary {
    id: String,
    name: String,
    blocks: usize,
    headers: usize,
    rows: usize,
}

pub fn run(
    cmd: &ProjectCmd,
    session: &mut Session<HttpGateway>,
    output: OutputMode,
) -> anyhow::Result<()> {
    match cmd {
        ProjectCmd::List => {
            session.load_projects();
            let summaries: Vec<ProjectSummary> = session
                .projects
                .projects()
                .iter()
                .map(|p| ProjectSummary {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    blocks: p.blocks.len(),
                    headers: p.workspace_order.len(),
                    rows: p.rows.len(),
                })
                .collect();
            render(output, &summaries, |summaries, w| {
                for s in summaries {
                    writeln!(
                        w,
                        "{:<14} {:<24} {} blocks, {} headers, {} rows",
                        s.id, s.name, s.blocks, s.headers, s.rows
                    )?;
                }
                Ok(())
            })
        }
        ProjectCmd::Create(args) => {
            let project_id = session
                .create_project(&args.name, args.department.as_deref())
                .map_err(|err| fail(output, &err))?;
            render_success(output, &format!("created project {project_id}"))
        }
        ProjectCmd::Delete(args) => {
            session.load_projects();
            session
                .delete_project(&args.project_id)
                .map_err(|err| fail(output, &err))?;
            render_success(output, &format!("deleted project {}", args.project_id))
        }
        ProjectCmd::Save(args) => {
            session.load_projects();
            session
                .save_project(&args.project_id)
                .map_err(|err| fail(output, &err))?;
            render_success(output, &format!("saved project {}", args.project_id))
        }
    }
}
