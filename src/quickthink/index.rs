//! # Deck Indexing
//!
//! Deck ids are opaque service-assigned strings, which are unpleasant to type.
//! Listings therefore number decks `1..=n`, and every command that takes a deck
//! accepts a [`DeckSelector`]:
//!
//! - a number: the deck's position in the listing, or a deck whose id is that
//!   same digit string. When both exist and differ the selector is ambiguous.
//! - anything else: an exact deck id, or failing that a case-insensitive name
//!   that matches exactly one deck
//!
//! Numbers are only stable as long as the service returns the same decks, so
//! selectors are always resolved against a fresh listing.

use crate::error::{QuickThinkError, Result};
use crate::model::Deck;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckSelector {
    Index(usize),
    Term(String),
}

impl FromStr for DeckSelector {
    type Err = QuickThinkError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(QuickThinkError::Api("Empty deck selector".to_string()));
        }
        match s.parse::<usize>() {
            Ok(n) if n > 0 && s.chars().all(|c| c.is_ascii_digit()) => {
                Ok(DeckSelector::Index(n))
            }
            _ => Ok(DeckSelector::Term(s.to_string())),
        }
    }
}

impl std::fmt::Display for DeckSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeckSelector::Index(i) => write!(f, "{}", i),
            DeckSelector::Term(t) => write!(f, "\"{}\"", t),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayDeck {
    pub index: usize,
    pub deck: Deck,
}

/// Number decks for display, oldest first. Decks without a creation time keep
/// the order the service returned them in, ahead of timestamped ones.
pub fn index_decks(mut decks: Vec<Deck>) -> Vec<DisplayDeck> {
    decks.sort_by_key(|d| d.created_at);
    decks
        .into_iter()
        .enumerate()
        .map(|(i, deck)| DisplayDeck { index: i + 1, deck })
        .collect()
}

pub fn resolve(indexed: &[DisplayDeck], selector: &DeckSelector) -> Result<Deck> {
    match selector {
        DeckSelector::Index(n) => {
            let digits = n.to_string();
            let by_position = indexed.iter().find(|dd| dd.index == *n);
            let by_id = indexed.iter().find(|dd| dd.deck.id == digits);
            match (by_position, by_id) {
                (Some(a), Some(b)) if a.deck.id != b.deck.id => {
                    Err(QuickThinkError::AmbiguousDeck {
                        selector: digits,
                        count: 2,
                    })
                }
                (Some(dd), _) | (None, Some(dd)) => Ok(dd.deck.clone()),
                (None, None) => Err(QuickThinkError::DeckNotFound(selector.to_string())),
            }
        }
        DeckSelector::Term(term) => {
            if let Some(dd) = indexed.iter().find(|dd| &dd.deck.id == term) {
                return Ok(dd.deck.clone());
            }

            let needle = term.to_lowercase();
            let named: Vec<&DisplayDeck> = indexed
                .iter()
                .filter(|dd| dd.deck.name.to_lowercase() == needle)
                .collect();

            match named.as_slice() {
                [only] => Ok(only.deck.clone()),
                [] => Err(QuickThinkError::DeckNotFound(selector.to_string())),
                many => Err(QuickThinkError::AmbiguousDeck {
                    selector: term.clone(),
                    count: many.len(),
                }),
            }
        }
    }
}
