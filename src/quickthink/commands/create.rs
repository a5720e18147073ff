use crate::backend::{Backend, Endpoint};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::DeckDraft;

use super::helpers::{absorb_failure, refresh_decks};

pub fn run<B: Backend>(backend: &mut B, draft: &DeckDraft) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    match backend.create_deck(draft) {
        Ok(()) => {
            result.add_message(CmdMessage::success("Deck created successfully"));
            refresh_decks(backend, &mut result)?;
        }
        Err(e) => absorb_failure(&mut result, Endpoint::CreateDeck, e)?,
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::InMemoryBackend;

    #[test]
    fn created_deck_appears_in_refetched_list() {
        let mut backend = InMemoryBackend::new();
        let draft = DeckDraft::new("Bio 101", "Science", "midterm");

        let result = run(&mut backend, &draft).unwrap();

        assert_eq!(
            backend.requests(),
            vec!["POST /api/decks".to_string(), "GET /api/decks".to_string()]
        );
        assert_eq!(result.listed_decks.len(), 1);
        let deck = &result.listed_decks[0].deck;
        assert_eq!(deck.name, "Bio 101");
        assert_eq!(deck.category, "Science");
        assert_eq!(deck.description, "midterm");
        assert!(!result.has_errors());
    }

    #[test]
    fn failure_skips_refetch() {
        let mut backend = InMemoryBackend::new();
        backend.fail("POST /api/decks", 400);

        let result = run(&mut backend, &DeckDraft::new("Bio", "Science", "")).unwrap();

        assert_eq!(backend.requests(), vec!["POST /api/decks".to_string()]);
        assert_eq!(result.error_messages(), vec!["Failed to create deck"]);
        assert!(backend.decks().is_empty());
    }
}
