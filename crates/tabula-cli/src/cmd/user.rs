//! `tbl user` — user directory management.

use clap::{Args, Subcommand};
use std::io::Write as _;

use crate::cmd::fail;
use crate::output::{OutputMode, render, render_success};
use tabula_client::gateway::UserPatch;
use tabula_client::{HttpGateway, Session};

#[derive(Subcommand, Debug)]
pub enum UserCmd {
    /// List registered users.
    List,
    /// Assign a user to a department.
    Assign(AssignArgs),
    /// Delete a user.
    Delete(UserRef),
}

#[derive(Args, Debug)]
pub struct AssignArgs {
    /// User id.
    pub user_id: String,

    /// Department id.
    #[arg(short, long)]
    pub department: String,
}

#[derive(Args, Debug)]
pub struct UserRef {
    /// User id.
    pub user_id: String,
}

pub fn run(
    cmd: &UserCmd,
    session: &mut Session<HttpGateway>,
    output: OutputMode,
) -> anyhow::Result<()> {
    match cmd {
        UserCmd::List => {
            session.load_users();
            let users = session.users.users().to_vec();
            render(output, &users, |users, w| {
                for user in users {
                    let roles: Vec<String> = user.roles.iter().map(ToString::to_string).collect();
                    writeln!(
                        w,
                        "{:<14} {:<20} {:<28} {:<14} {}",
                        user.id,
                        user.name,
                        user.email,
                        user.department_id.as_deref().unwrap_or("-"),
                        roles.join(",")
                    )?;
                }
                Ok(())
            })
        }
        UserCmd::Assign(args) => {
            let patch = UserPatch {
                department_id: Some(args.department.clone()),
                ..UserPatch::default()
            };
            session
                .update_user(&args.user_id, &patch)
                .map_err(|err| fail(output, &err))?;
            render_success(
                output,
                &format!("assigned {} to {}", args.user_id, args.department),
            )
        }
        UserCmd::Delete(args) => {
            session
                .delete_user(&args.user_id)
                .map_err(|err| fail(output, &err))?;
            render_success(output, &format!("deleted user {}", args.user_id))
        }
    }
}
