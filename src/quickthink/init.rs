//! # Data Directory and Wiring
//!
//! Everything quickthink keeps on disk lives in one per-user data directory,
//! resolved with the `directories` crate (e.g. `~/.local/share/quickthink` on
//! Linux). Setting `QUICKTHINK_HOME` replaces it, which is how tests and
//! scripted runs get an isolated copy.
//!
//! Layout:
//!
//! ```text
//! <data dir>/
//!   config.json         QuickThinkConfig
//!   selectedDeck.json   the open deck (absent when none)
//!   session.json        auth session (absent when signed out)
//! ```
//!
//! [`initialize`] loads the config (with environment overrides applied) and
//! builds the [`QuickThinkApi`] the CLI talks to. Auth is only wired in when
//! both an auth URL and key are configured.

use crate::api::QuickThinkApi;
use crate::auth::{SessionStore, SupabaseAuth};
use crate::backend::http::HttpBackend;
use crate::config::QuickThinkConfig;
use crate::error::{QuickThinkError, Result};
use crate::selection::{DeckProvider, SelectedDeckStore};
use crate::storage::fs::FileStorage;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const HOME_ENV: &str = "QUICKTHINK_HOME";

pub struct QuickThinkContext {
    pub api: QuickThinkApi<HttpBackend>,
    pub config: QuickThinkConfig,
    pub data_dir: PathBuf,
}

/// The data directory: `QUICKTHINK_HOME` when set, else the platform default.
pub fn data_dir() -> Result<PathBuf> {
    data_dir_from(std::env::var_os(HOME_ENV).map(PathBuf::from))
}

fn data_dir_from(home: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(home) = home.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(home);
    }
    ProjectDirs::from("com", "quickthink", "quickthink")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| QuickThinkError::Config("Could not determine data directory".to_string()))
}

pub fn initialize() -> Result<QuickThinkContext> {
    let dir = data_dir()?;
    initialize_at(&dir)
}

pub fn initialize_at(data_dir: &Path) -> Result<QuickThinkContext> {
    let config = QuickThinkConfig::load(data_dir)?.with_env_overrides();
    debug!(data_dir = %data_dir.display(), api_url = %config.api_url, "initializing");

    let storage = FileStorage::new(data_dir);
    let provider = DeckProvider::new(SelectedDeckStore::open(Box::new(storage.clone())));
    let backend = HttpBackend::new(&config.api_url, config.timeout())?;

    let mut api = QuickThinkApi::new(backend, provider, data_dir);
    if let Some((url, key)) = config.auth() {
        let sessions = SessionStore::new(Box::new(storage));
        let auth = SupabaseAuth::new(url, key, config.timeout(), sessions)?;
        api = api.with_auth(Box::new(auth));
    }

    Ok(QuickThinkContext {
        api,
        config,
        data_dir: data_dir.to_path_buf(),
    })
}
