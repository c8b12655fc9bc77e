//! Command handlers, one module per noun.

pub mod auth;
pub mod block;
pub mod dept;
pub mod project;
pub mod row;
pub mod user;

use crate::output::{CliError, OutputMode, render_error};
use tabula_client::ClientError;

/// Render a session failure and convert it into a terminal error.
pub(crate) fn fail(output: OutputMode, err: &ClientError) -> anyhow::Error {
    let mut payload = CliError::new(err.to_string());
    payload.suggestion = suggestion_for(err).map(str::to_string);
    payload.error_code = Some(err.code().to_string());
    if render_error(output, &payload).is_err() {
        tracing::debug!("failed to render error payload");
    }
    anyhow::anyhow!("{err}")
}

fn suggestion_for(err: &ClientError) -> Option<&'static str> {
    match err {
        ClientError::NotAuthenticated => Some("Run `tbl login` first."),
        ClientError::Transport(_) => Some("Check the backend URL (`tbl --api-url` or TABULA_API_URL) and retry."),
        ClientError::Store(_) => None,
    }
}
