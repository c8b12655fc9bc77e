//! `tbl dept` — department management.

use clap::{Args, Subcommand};
use std::io::Write as _;

use crate::cmd::fail;
use crate::output::{OutputMode, render, render_success};
use tabula_client::{HttpGateway, Session};

#[derive(Subcommand, Debug)]
pub enum DeptCmd {
    /// List departments.
    List,
    /// Create a department.
    Create(CreateArgs),
    /// Rename a department.
    Rename(RenameArgs),
    /// Delete a department.
    Delete(DeptRef),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Department name.
    #[arg(short, long)]
    pub name: String,
}

#[derive(Args, Debug)]
pub struct RenameArgs {
    /// Department id.
    pub department_id: String,

    /// New name.
    #[arg(short, long)]
    pub name: String,
}

#[derive(Args, Debug)]
pub struct DeptRef {
    /// Department id.
    pub department_id: String,
}

pub fn run(
    cmd: &DeptCmd,
    session: &mut Session<HttpGateway>,
    output: OutputMode,
) -> anyhow::Result<()> {
    match cmd {
        DeptCmd::List => {
            session.load_departments();
            let departments = session.departments.departments().to_vec();
            render(output, &departments, |departments, w| {
                for department in departments {
                    writeln!(
                        w,
                        "{:<14} {:<24} {} members",
                        department.id,
                        department.name,
                        department.users.len()
                    )?;
                }
                Ok(())
            })
        }
        DeptCmd::Create(args) => {
            let department_id = session
                .create_department(&args.name)
                .map_err(|err| fail(output, &err))?;
            render_success(output, &format!("created department {department_id}"))
        }
        DeptCmd::Rename(args) => {
            session
                .update_department(&args.department_id, &args.name)
                .map_err(|err| fail(output, &err))?;
            render_success(output, &format!("renamed department {}", args.department_id))
        }
        DeptCmd::Delete(args) => {
            session
                .delete_department(&args.department_id)
                .map_err(|err| fail(output, &err))?;
            render_success(output, &format!("deleted department {}", args.department_id))
        }
    }
}
