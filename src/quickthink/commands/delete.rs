use crate::backend::{Backend, Endpoint};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::DeckSelector;
use crate::model::Deck;
use crate::selection::use_deck;
use tracing::warn;

use super::helpers::{absorb_failure, find_deck, refresh_decks};

/// Resolves the deck a delete would remove, without removing it.
///
/// The CLI shows the result in a confirmation prompt before calling [`run`].
/// `result.deck` is `None` when the deck list could not be fetched.
pub fn preview<B: Backend>(backend: &B, selector: &DeckSelector) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    result.deck = find_deck(backend, selector, &mut result)?;
    Ok(result)
}

/// Deletes an already resolved deck. This does NOT prompt: call [`preview`]
/// first. Deleting the open deck also clears the selection. Once the service
/// confirms the delete, a failure to clear the stored selection is reported
/// as a warning and the deck list is still re-fetched.
pub fn run<B: Backend>(backend: &mut B, deck: &Deck) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if let Err(e) = backend.delete_deck(&deck.id) {
        absorb_failure(&mut result, Endpoint::DeleteDeck(&deck.id), e)?;
        return Ok(result);
    }

    result.add_message(CmdMessage::success("Deck deleted successfully"));

    let handle = use_deck()?;
    if handle.selected().is_some_and(|s| s.id == deck.id) {
        match handle.set_selected(None) {
            Ok(()) => {
                result.add_message(CmdMessage::info(format!("Closed deck: {}", deck.name)));
            }
            Err(e) => {
                warn!(deck_id = %deck.id, error = %e, "could not clear selection of deleted deck");
                result.add_message(CmdMessage::warning(format!(
                    "Could not close deleted deck {}: {}",
                    deck.name, e
                )));
            }
        }
    }

    refresh_decks(backend, &mut result)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::fixtures::{memory_provider, BackendFixture};
    use crate::selection::SELECTED_DECK_KEY;

    #[test]
    fn preview_resolves_without_deleting() {
        let fixture = BackendFixture::new()
            .with_deck("d1", "Bio", "Science")
            .with_deck("d2", "Chem", "Science");

        let result = preview(&fixture.backend, &DeckSelector::Term("CHEM".into())).unwrap();

        assert_eq!(result.deck.unwrap().id, "d2");
        assert_eq!(fixture.backend.requests(), vec!["GET /api/decks"]);
        assert_eq!(fixture.backend.decks().len(), 2);
    }

    #[test]
    fn preview_of_unknown_deck_is_an_error() {
        let fixture = BackendFixture::new().with_deck("d1", "Bio", "Science");
        assert!(preview(&fixture.backend, &DeckSelector::Index(4)).is_err());
    }

    #[test]
    fn issues_delete_and_refetches() {
        let mut fixture = BackendFixture::new()
            .with_deck("d1", "Bio", "Science")
            .with_deck("d2", "Chem", "Science");
        let (provider, _) = memory_provider();
        let deck = fixture.backend.decks()[0].clone();

        let result = provider.provide(|| run(&mut fixture.backend, &deck)).unwrap();

        assert_eq!(
            fixture.backend.requests(),
            vec!["DELETE /api/decks/d1", "GET /api/decks"]
        );
        assert_eq!(result.listed_decks.len(), 1);
        assert_eq!(result.listed_decks[0].deck.id, "d2");
    }

    #[test]
    fn failure_keeps_deck_list_unchanged() {
        let mut fixture = BackendFixture::new().with_deck("d1", "Bio", "Science");
        fixture.backend.fail("DELETE /api/decks/d1", 500);
        let (provider, _) = memory_provider();
        let deck = fixture.backend.decks()[0].clone();

        let result = provider.provide(|| run(&mut fixture.backend, &deck)).unwrap();

        assert_eq!(fixture.backend.requests(), vec!["DELETE /api/decks/d1"]);
        assert_eq!(result.error_messages(), vec!["Failed to delete deck"]);
        assert!(result.listed_decks.is_empty());
        assert_eq!(fixture.backend.decks().len(), 1);
    }

    #[test]
    fn deleting_open_deck_clears_selection() {
        let mut fixture = BackendFixture::new().with_deck("d1", "Bio", "Science");
        let (provider, storage) = memory_provider();
        let deck = fixture.backend.decks()[0].clone();

        provider.provide(|| {
            use_deck().unwrap().set_selected(Some(deck.clone())).unwrap();
            run(&mut fixture.backend, &deck).unwrap();
            assert_eq!(use_deck().unwrap().selected(), None);
        });
        assert!(!storage.contains(SELECTED_DECK_KEY));
    }

    #[test]
    fn failed_selection_clear_still_reports_delete() {
        let mut fixture = BackendFixture::new()
            .with_deck("d1", "Bio", "Science")
            .with_deck("d2", "Chem", "Science");
        let (provider, storage) = memory_provider();
        let deck = fixture.backend.decks()[0].clone();

        let result = provider.provide(|| {
            use_deck().unwrap().set_selected(Some(deck.clone())).unwrap();
            storage.set_simulate_write_error(true);
            run(&mut fixture.backend, &deck).unwrap()
        });

        assert_eq!(
            fixture.backend.requests(),
            vec!["DELETE /api/decks/d1", "GET /api/decks"]
        );
        let notes: Vec<&str> = result.messages.iter().map(|m| m.content.as_str()).collect();
        assert!(!result.has_errors());
        assert_eq!(notes[0], "Deck deleted successfully");
        assert!(notes[1].starts_with("Could not close deleted deck Bio"));
        assert_eq!(result.listed_decks.len(), 1);
        assert_eq!(result.listed_decks[0].deck.id, "d2");
    }

    #[test]
    fn deleting_other_deck_keeps_selection() {
        let mut fixture = BackendFixture::new()
            .with_deck("d1", "Bio", "Science")
            .with_deck("d2", "Chem", "Science");
        let (provider, _) = memory_provider();
        let open = fixture.backend.decks()[0].clone();
        let other = fixture.backend.decks()[1].clone();

        provider.provide(|| {
            use_deck().unwrap().set_selected(Some(open.clone())).unwrap();
            run(&mut fixture.backend, &other).unwrap();
            assert_eq!(use_deck().unwrap().selected(), Some(open.clone()));
        });
    }
}
