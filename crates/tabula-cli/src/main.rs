#![forbid(unsafe_code)]

mod cmd;
mod config;
mod output;

use clap::{Parser, Subcommand};
use output::OutputMode;
use std::env;
use tabula_client::{HttpGateway, Session};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "tabula: block-based project boards",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Override the backend API base URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Log in and persist the session")]
    Login(cmd::auth::LoginArgs),

    #[command(about = "Register a new account")]
    Register(cmd::auth::RegisterArgs),

    #[command(about = "Log out and clear the persisted session")]
    Logout,

    #[command(about = "Show the logged-in user")]
    Whoami,

    #[command(subcommand, about = "Manage projects")]
    Project(cmd::project::ProjectCmd),

    #[command(subcommand, about = "Manage a project's columns")]
    Block(cmd::block::BlockCmd),

    #[command(subcommand, about = "Manage a project's task rows")]
    Row(cmd::row::RowCmd),

    #[command(subcommand, about = "Manage departments")]
    Dept(cmd::dept::DeptCmd),

    #[command(subcommand, about = "Manage users")]
    User(cmd::user::UserCmd),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("TABULA_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "debug"
        } else {
            "warn"
        })
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let output = cli.output_mode();

    let mut config = config::load_config()?;
    if let Some(url) = &cli.api_url {
        config.api_url = url.clone();
    }
    let gateway = HttpGateway::new(&config.api_url);

    let mut session = match config::load_session()? {
        Some(user) => Session::resume(gateway, user),
        None => Session::new(gateway),
    };

    match cli.command {
        Commands::Login(ref args) => cmd::auth::run_login(args, &mut session, output),
        Commands::Register(ref args) => cmd::auth::run_register(args, &mut session, output),
        Commands::Logout => cmd::auth::run_logout(&mut session, output),
        Commands::Whoami => cmd::auth::run_whoami(&session, output),
        Commands::Project(ref command) => cmd::project::run(command, &mut session, output),
        Commands::Block(ref command) => cmd::block::run(command, &mut session, output),
        Commands::Row(ref command) => cmd::row::run(command, &mut session, output),
        Commands::Dept(ref command) => cmd::dept::run(command, &mut session, output),
        Commands::User(ref command) => cmd::user::run(command, &mut session, output),
    }
}
