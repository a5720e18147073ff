//! # Backend Layer
//!
//! Decks and flashcards live in a remote service. The [`Backend`] trait is the
//! seam between QuickThink and that service:
//!
//! - [`http::HttpBackend`]: production client speaking the REST contract below.
//! - [`memory::InMemoryBackend`]: in-process fake for tests, with a request log
//!   and per-request failure injection.
//!
//! ## Wire Contract
//!
//! ```text
//! GET    /api/decks                         -> [Deck]
//! POST   /api/decks                         {name, category, description}
//! PATCH  /api/decks/{id}                    {name, category, description}
//! DELETE /api/decks/{id}
//! GET    /api/decks/{id}/flashcards         -> [Flashcard]
//! POST   /api/decks/{id}/flashcards         [{question, answer}]
//! POST   /api/decks/{id}/flashcards/file    multipart, field "file"
//! ```
//!
//! Responses to mutating calls are not interpreted. Callers re-fetch after a
//! confirmed success instead.

use crate::error::Result;
use crate::model::{Deck, DeckDraft, FileUpload, Flashcard, FlashcardDraft};
use reqwest::Method;

pub mod http;
pub mod memory;

pub trait Backend {
    fn list_decks(&self) -> Result<Vec<Deck>>;

    fn create_deck(&mut self, draft: &DeckDraft) -> Result<()>;

    fn update_deck(&mut self, id: &str, draft: &DeckDraft) -> Result<()>;

    fn delete_deck(&mut self, id: &str) -> Result<()>;

    fn list_flashcards(&self, deck_id: &str) -> Result<Vec<Flashcard>>;

    fn create_flashcards(&mut self, deck_id: &str, cards: &[FlashcardDraft]) -> Result<()>;

    /// Hand a document to the service, which turns it into flashcards of the deck.
    fn generate_flashcards(&mut self, deck_id: &str, upload: &FileUpload) -> Result<()>;
}

/// One row of the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    ListDecks,
    CreateDeck,
    UpdateDeck(&'a str),
    DeleteDeck(&'a str),
    ListFlashcards(&'a str),
    CreateFlashcards(&'a str),
    GenerateFlashcards(&'a str),
}

impl<'a> Endpoint<'a> {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::ListDecks | Endpoint::ListFlashcards(_) => Method::GET,
            Endpoint::CreateDeck
            | Endpoint::CreateFlashcards(_)
            | Endpoint::GenerateFlashcards(_) => Method::POST,
            Endpoint::UpdateDeck(_) => Method::PATCH,
            Endpoint::DeleteDeck(_) => Method::DELETE,
        }
    }

    /// Unencoded path segments, e.g. `["api", "decks", id]`.
    pub fn segments(&self) -> Vec<&'a str> {
        match *self {
            Endpoint::ListDecks | Endpoint::CreateDeck => vec!["api", "decks"],
            Endpoint::UpdateDeck(id) | Endpoint::DeleteDeck(id) => vec!["api", "decks", id],
            Endpoint::ListFlashcards(id) | Endpoint::CreateFlashcards(id) => {
                vec!["api", "decks", id, "flashcards"]
            }
            Endpoint::GenerateFlashcards(id) => vec!["api", "decks", id, "flashcards", "file"],
        }
    }

    pub fn path(&self) -> String {
        format!("/{}", self.segments().join("/"))
    }

    pub fn is_mutating(&self) -> bool {
        self.method() != Method::GET
    }

    /// The user-facing name of the action, as in "Failed to {action}".
    pub fn action(&self) -> &'static str {
        match self {
            Endpoint::ListDecks => "fetch decks",
            Endpoint::CreateDeck => "create deck",
            Endpoint::UpdateDeck(_) => "update deck",
            Endpoint::DeleteDeck(_) => "delete deck",
            Endpoint::ListFlashcards(_) => "fetch flashcards",
            Endpoint::CreateFlashcards(_) => "add flashcard",
            Endpoint::GenerateFlashcards(_) => "generate flashcards from PDF",
        }
    }
}

impl std::fmt::Display for Endpoint<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}
