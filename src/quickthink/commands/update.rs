use crate::backend::{Backend, Endpoint};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{QuickThinkError, Result};
use crate::index::DeckSelector;
use crate::model::DeckEdit;
use crate::selection::use_deck;

use super::helpers::{absorb_failure, find_deck, refresh_decks};

/// Update a deck. All three fields are always sent; the ones not in `edit`
/// keep the values from the freshly fetched deck.
pub fn run<B: Backend>(
    backend: &mut B,
    selector: &DeckSelector,
    edit: &DeckEdit,
) -> Result<CmdResult> {
    if edit.is_empty() {
        return Err(QuickThinkError::Api(
            "Nothing to update: pass --name, --category or --description".to_string(),
        ));
    }

    let mut result = CmdResult::default();
    let Some(deck) = find_deck(backend, selector, &mut result)? else {
        return Ok(result);
    };

    let draft = edit.apply_to(&deck);
    if let Err(e) = backend.update_deck(&deck.id, &draft) {
        absorb_failure(&mut result, Endpoint::UpdateDeck(&deck.id), e)?;
        return Ok(result);
    }

    result.add_message(CmdMessage::success("Deck updated successfully"));
    refresh_decks(backend, &mut result)?;

    // Keep an open copy of this deck in step with the service.
    let handle = use_deck()?;
    if handle.selected().is_some_and(|s| s.id == deck.id) {
        if let Some(fresh) = result.listed_decks.iter().find(|dd| dd.deck.id == deck.id) {
            handle.set_selected(Some(fresh.deck.clone()))?;
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::fixtures::{memory_provider, BackendFixture};
    use crate::model::{Deck, DeckDraft};

    fn rename(name: &str) -> DeckEdit {
        DeckEdit {
            name: Some(name.to_string()),
            ..DeckEdit::default()
        }
    }

    #[test]
    fn sends_all_fields() {
        let mut fixture = BackendFixture::new();
        fixture
            .backend
            .insert_deck(Deck::new("d1", "Bio", "Science").with_description("midterm"));
        let (provider, _) = memory_provider();

        let result = provider
            .provide(|| run(&mut fixture.backend, &DeckSelector::Index(1), &rename("Bio 101")))
            .unwrap();

        assert_eq!(
            fixture.backend.decks()[0].draft(),
            DeckDraft::new("Bio 101", "Science", "midterm")
        );
        assert_eq!(
            fixture.backend.requests(),
            vec!["GET /api/decks", "PATCH /api/decks/d1", "GET /api/decks"]
        );
        assert_eq!(result.listed_decks[0].deck.name, "Bio 101");
    }

    #[test]
    fn refreshes_open_copy_of_edited_deck() {
        let mut fixture = BackendFixture::new().with_deck("d1", "Bio", "Science");
        let (provider, _) = memory_provider();

        provider.provide(|| {
            use_deck()
                .unwrap()
                .set_selected(Some(Deck::new("d1", "Bio", "Science")))
                .unwrap();
            run(&mut fixture.backend, &DeckSelector::Term("d1".into()), &rename("Biology"))
                .unwrap();
            assert_eq!(use_deck().unwrap().selected().unwrap().name, "Biology");
        });
    }

    #[test]
    fn failure_leaves_everything_unchanged() {
        let mut fixture = BackendFixture::new().with_deck("d1", "Bio", "Science");
        fixture.backend.fail("PATCH /api/decks/d1", 404);
        let (provider, _) = memory_provider();

        let result = provider
            .provide(|| run(&mut fixture.backend, &DeckSelector::Index(1), &rename("X")))
            .unwrap();

        assert_eq!(result.error_messages(), vec!["Failed to update deck"]);
        assert_eq!(fixture.backend.decks()[0].name, "Bio");
        assert_eq!(fixture.backend.requests().len(), 2);
    }

    #[test]
    fn empty_edit_is_rejected() {
        let mut fixture = BackendFixture::new().with_deck("d1", "Bio", "Science");
        let err = run(&mut fixture.backend, &DeckSelector::Index(1), &DeckEdit::default())
            .unwrap_err();
        assert!(matches!(err, QuickThinkError::Api(_)));
        assert!(fixture.backend.requests().is_empty());
    }
}
