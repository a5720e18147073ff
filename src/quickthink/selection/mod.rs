//! # Selected-Deck Store
//!
//! Remembers which deck the user last opened. The value is either absent or a
//! full copy of the [`Deck`] captured when it was opened, so it can go stale
//! until the deck is re-fetched.
//!
//! The in-memory value and its durable copy (key [`SELECTED_DECK_KEY`]) always
//! agree: `set` writes storage first and only then updates memory, and clearing
//! removes the key. Opening a store over storage that holds a missing or
//! unparsable value yields an absent selection.
//!
//! Commands never touch the store directly. They go through [`use_deck`], which
//! only succeeds inside a [`DeckProvider::provide`] scope.

use crate::error::Result;
use crate::model::Deck;
use crate::storage::KeyValueStorage;
use tracing::{debug, warn};

mod provider;

pub use provider::{use_deck, DeckHandle, DeckProvider};

pub const SELECTED_DECK_KEY: &str = "selectedDeck";

pub struct SelectedDeckStore {
    storage: Box<dyn KeyValueStorage>,
    current: Option<Deck>,
}

impl SelectedDeckStore {
    /// Open the store, restoring any previously persisted selection.
    pub fn open(storage: Box<dyn KeyValueStorage>) -> Self {
        let current = match storage.get(SELECTED_DECK_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Deck>(&raw) {
                Ok(deck) => Some(deck),
                Err(e) => {
                    warn!(error = %e, "ignoring unreadable stored deck selection");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "could not read stored deck selection");
                None
            }
        };

        Self { storage, current }
    }

    pub fn get(&self) -> Option<&Deck> {
        self.current.as_ref()
    }

    pub fn set(&mut self, deck: Option<Deck>) -> Result<()> {
        match &deck {
            Some(deck) => {
                let raw = serde_json::to_string(deck)?;
                self.storage.set(SELECTED_DECK_KEY, &raw)?;
                debug!(deck_id = %deck.id, "deck selected");
            }
            None => {
                self.storage.remove(SELECTED_DECK_KEY)?;
                debug!("deck selection cleared");
            }
        }
        self.current = deck;
        Ok(())
    }
}
