//! CLI configuration and persisted login session.
//!
//! Both live under the per-user config directory (`~/.config/tabula` on
//! Linux): `config.toml` for settings, `session.toml` for the logged-in
//! user. `TABULA_API_URL` overrides the configured backend URL.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use tabula_core::model::user::CurrentUser;

const CONFIG_FILE: &str = "config.toml";
const SESSION_FILE: &str = "session.toml";

fn default_api_url() -> String {
    "http://localhost:4000/api".to_string()
}

/// Settings read from `config.toml`. Every field has a default, so a
/// missing file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("tabula"))
        .context("could not determine the user config directory")
}

/// Load the configuration, applying the `TABULA_API_URL` override.
///
/// # Errors
///
/// Fails only on an unreadable or unparsable config file; a missing file
/// yields the defaults.
pub fn load_config() -> Result<CliConfig> {
    let mut config = match config_dir() {
        Ok(dir) => {
            let path = dir.join(CONFIG_FILE);
            if path.exists() {
                let raw = fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("failed to parse {}", path.display()))?
            } else {
                CliConfig::default()
            }
        }
        Err(_) => CliConfig::default(),
    };

    if let Ok(url) = env::var("TABULA_API_URL")
        && !url.is_empty()
    {
        config.api_url = url;
    }
    Ok(config)
}

/// The persisted login, written after a successful `tbl login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SavedSession {
    user: CurrentUser,
}

/// Read the persisted login, if any.
///
/// # Errors
///
/// Fails on an unreadable or unparsable session file.
pub fn load_session() -> Result<Option<CurrentUser>> {
    let path = config_dir()?.join(SESSION_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let saved: SavedSession = toml::from_str(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(Some(saved.user))
}

/// Persist the login for subsequent invocations.
///
/// # Errors
///
/// Fails when the config directory or session file cannot be written.
pub fn store_session(user: &CurrentUser) -> Result<()> {
    let dir = config_dir()?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    let saved = SavedSession { user: user.clone() };
    let raw = toml::to_string_pretty(&saved).context("failed to encode session")?;
    let path = dir.join(SESSION_FILE);
    fs::write(&path, raw).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Drop the persisted login.
///
/// # Errors
///
/// Fails when the session file exists but cannot be removed.
pub fn clear_session() -> Result<()> {
    let path = config_dir()?.join(SESSION_FILE);
    if path.exists() {
        fs::remove_file(&path)
            .with_context(|| format!("failed to remove {}", path.display()))?;
    }
    Ok(())
}
