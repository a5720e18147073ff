//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every quickthink operation, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (parses deck selectors such as `2`, `d1` or `bio 101`)
//! - **Scopes the selection**: every call runs inside the [`DeckProvider`], so
//!   commands can reach the selected deck through [`crate::selection::use_deck`]
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **Prompts or printing**: confirmation before a delete is the caller's job,
//!   see [`QuickThinkApi::preview_delete`]
//!
//! ## Generic Over Backend
//!
//! `QuickThinkApi<B: Backend>` is generic over the deck service:
//! - Production: `QuickThinkApi<HttpBackend>`
//! - Testing: `QuickThinkApi<InMemoryBackend>`

use crate::auth::AuthService;
use crate::backend::Backend;
use crate::commands;
use crate::commands::auth::AuthAction;
use crate::error::Result;
use crate::index::DeckSelector;
use crate::model::{Deck, DeckDraft, DeckEdit};
use crate::selection::DeckProvider;
use std::path::{Path, PathBuf};

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

pub struct QuickThinkApi<B: Backend> {
    backend: B,
    provider: DeckProvider,
    auth: Option<Box<dyn AuthService>>,
    config_dir: PathBuf,
}

impl<B: Backend> QuickThinkApi<B> {
    pub fn new(backend: B, provider: DeckProvider, config_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            provider,
            auth: None,
            config_dir: config_dir.into(),
        }
    }

    pub fn with_auth(mut self, auth: Box<dyn AuthService>) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn list_decks(&self) -> Result<CmdResult> {
        commands::list::run(&self.backend)
    }

    pub fn create_deck(&mut self, draft: &DeckDraft) -> Result<CmdResult> {
        commands::create::run(&mut self.backend, draft)
    }

    pub fn update_deck(&mut self, selector: &str, edit: &DeckEdit) -> Result<CmdResult> {
        let selector: DeckSelector = selector.parse()?;
        self.provider
            .provide(|| commands::update::run(&mut self.backend, &selector, edit))
    }

    /// Resolve the deck `selector` names so the caller can confirm the delete.
    pub fn preview_delete(&self, selector: &str) -> Result<CmdResult> {
        let selector: DeckSelector = selector.parse()?;
        commands::delete::preview(&self.backend, &selector)
    }

    pub fn delete_deck(&mut self, deck: &Deck) -> Result<CmdResult> {
        self.provider
            .provide(|| commands::delete::run(&mut self.backend, deck))
    }

    pub fn open_deck(&self, selector: &str) -> Result<CmdResult> {
        let selector: DeckSelector = selector.parse()?;
        self.provider
            .provide(|| commands::select::open(&self.backend, &selector))
    }

    pub fn close_deck(&self) -> Result<CmdResult> {
        self.provider.provide(commands::select::close)
    }

    pub fn current_deck(&self) -> Result<CmdResult> {
        self.provider.provide(commands::select::current)
    }

    pub fn list_flashcards(&self) -> Result<CmdResult> {
        self.provider
            .provide(|| commands::cards::list(&self.backend))
    }

    pub fn add_flashcard(&mut self, question: &str, answer: &str) -> Result<CmdResult> {
        self.provider
            .provide(|| commands::cards::add(&mut self.backend, question, answer))
    }

    pub fn upload_files(&mut self, paths: &[PathBuf]) -> Result<CmdResult> {
        self.provider
            .provide(|| commands::upload::run(&mut self.backend, paths))
    }

    pub fn sign_up(&mut self, email: &str, password: &str) -> CmdResult {
        self.auth_action(AuthAction::SignUp {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    pub fn sign_in(&mut self, email: &str, password: &str) -> CmdResult {
        self.auth_action(AuthAction::SignIn {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    pub fn sign_out(&mut self) -> CmdResult {
        self.auth_action(AuthAction::SignOut)
    }

    pub fn current_user(&mut self) -> CmdResult {
        self.auth_action(AuthAction::CurrentUser)
    }

    fn auth_action(&mut self, action: AuthAction) -> CmdResult {
        let auth = self
            .auth
            .as_mut()
            .map(|auth| auth.as_mut() as &mut dyn AuthService);
        commands::auth::run(auth, action)
    }

    pub fn config(&self, action: ConfigAction) -> Result<CmdResult> {
        config(&self.config_dir, action)
    }
}

/// Config needs no backend, so it stays reachable when the configured API
/// URL is unusable.
pub fn config(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    commands::config::run(config_dir, action)
}
