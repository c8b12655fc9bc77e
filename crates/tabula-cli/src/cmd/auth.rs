//! `tbl login|register|logout|whoami` — account commands.

use clap::Args;
use std::io::Write as _;

use crate::cmd::fail;
use crate::config;
use crate::output::{CliError, OutputMode, render, render_error, render_success};
use tabula_client::gateway::RegisterRequest;
use tabula_client::{HttpGateway, Session};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email.
    #[arg(short, long)]
    pub email: String,

    /// Account password.
    #[arg(short, long)]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Display name.
    #[arg(short, long)]
    pub name: String,

    /// Account email.
    #[arg(short, long)]
    pub email: String,

    /// Account password.
    #[arg(short, long)]
    pub password: String,

    /// Role to request (repeatable): admin, manager, employee.
    #[arg(short, long = "role", default_value = "employee")]
    pub roles: Vec<String>,
}

pub fn run_login(
    args: &LoginArgs,
    session: &mut Session<HttpGateway>,
    output: OutputMode,
) -> anyhow::Result<()> {
    let user = session
        .login(&args.email, &args.password)
        .map_err(|err| fail(output, &err))?;
    config::store_session(&user)?;
    render_success(output, &format!("logged in as {} <{}>", user.name, user.email))
}

pub fn run_register(
    args: &RegisterArgs,
    session: &mut Session<HttpGateway>,
    output: OutputMode,
) -> anyhow::Result<()> {
    let request = RegisterRequest {
        name: args.name.clone(),
        email: args.email.clone(),
        password: args.password.clone(),
        role_names: args.roles.clone(),
    };
    let user = session
        .register(&request)
        .map_err(|err| fail(output, &err))?;
    config::store_session(&user)?;
    render_success(output, &format!("registered {} <{}>", user.name, user.email))
}

pub fn run_logout(
    session: &mut Session<HttpGateway>,
    output: OutputMode,
) -> anyhow::Result<()> {
    session.logout();
    config::clear_session()?;
    render_success(output, "logged out")
}

pub fn run_whoami(session: &Session<HttpGateway>, output: OutputMode) -> anyhow::Result<()> {
    match session.auth.current_user() {
        Some(user) => render(output, user, |user, w| {
            writeln!(w, "{} <{}>", user.name, user.email)?;
            let roles: Vec<String> = user.roles.iter().map(ToString::to_string).collect();
            writeln!(w, "roles: {}", roles.join(", "))
        }),
        None => {
            render_error(
                output,
                &CliError::with_details("not logged in", "Run `tbl login` first.", "E4003"),
            )?;
            anyhow::bail!("not logged in");
        }
    }
}
