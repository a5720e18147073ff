use crate::config::QuickThinkConfig;
use crate::index::DisplayDeck;
use crate::model::{Deck, Flashcard};
use serde_json::Value;

pub mod auth;
pub mod cards;
pub mod config;
pub mod create;
pub mod delete;
pub mod helpers;
pub mod list;
pub mod select;
pub mod update;
pub mod upload;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed_decks: Vec<DisplayDeck>,
    pub listed_flashcards: Vec<Flashcard>,
    /// The deck the flashcards (or the selection) refer to.
    pub deck: Option<Deck>,
    pub config: Option<QuickThinkConfig>,
    pub user: Option<Value>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_decks(mut self, decks: Vec<DisplayDeck>) -> Self {
        self.listed_decks = decks;
        self
    }

    pub fn with_deck(mut self, deck: Deck) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn with_config(mut self, config: QuickThinkConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }

    pub fn error_messages(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|m| m.level == MessageLevel::Error)
            .map(|m| m.content.as_str())
            .collect()
    }
}
