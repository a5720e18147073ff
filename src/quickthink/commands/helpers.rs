use crate::backend::{Backend, Endpoint};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{QuickThinkError, Result};
use crate::index::{index_decks, resolve, DeckSelector};
use crate::model::Deck;
use crate::selection::use_deck;
use tracing::warn;

/// Turn a failed remote call into an error notification.
///
/// Only remote failures are absorbed; anything else (bad local input, I/O)
/// still propagates to the caller.
pub fn absorb_failure(
    result: &mut CmdResult,
    endpoint: Endpoint,
    err: QuickThinkError,
) -> Result<()> {
    if !is_remote_failure(&err) {
        return Err(err);
    }
    warn!(%endpoint, error = %err, "request failed");
    result.add_message(CmdMessage::error(format!("Failed to {}", endpoint.action())));
    Ok(())
}

// Undecodable response bodies count as remote failures too.
fn is_remote_failure(err: &QuickThinkError) -> bool {
    err.is_remote() || matches!(err, QuickThinkError::Serialization(_))
}

/// Fetch and number the deck list into `result`. Returns false when the fetch
/// failed (the failure is already reported in `result`).
pub fn refresh_decks<B: Backend>(backend: &B, result: &mut CmdResult) -> Result<bool> {
    match backend.list_decks() {
        Ok(decks) => {
            result.listed_decks = index_decks(decks);
            Ok(true)
        }
        Err(e) => {
            absorb_failure(result, Endpoint::ListDecks, e)?;
            Ok(false)
        }
    }
}

/// Fetch the flashcards of `deck` into `result`.
pub fn refresh_flashcards<B: Backend>(
    backend: &B,
    deck: &Deck,
    result: &mut CmdResult,
) -> Result<bool> {
    match backend.list_flashcards(&deck.id) {
        Ok(cards) => {
            result.listed_flashcards = cards;
            Ok(true)
        }
        Err(e) => {
            absorb_failure(result, Endpoint::ListFlashcards(&deck.id), e)?;
            Ok(false)
        }
    }
}

/// Resolve `selector` against a fresh listing. `Ok(None)` means the listing
/// could not be fetched, which `result` already reports.
pub fn find_deck<B: Backend>(
    backend: &B,
    selector: &DeckSelector,
    result: &mut CmdResult,
) -> Result<Option<Deck>> {
    if !refresh_decks(backend, result)? {
        return Ok(None);
    }
    let deck = resolve(&result.listed_decks, selector)?;
    Ok(Some(deck))
}

/// The selected deck, or an info message asking the user to open one.
pub fn selected_deck(result: &mut CmdResult) -> Result<Option<Deck>> {
    let deck = use_deck()?.selected();
    if deck.is_none() {
        result.add_message(CmdMessage::info(
            "No deck selected. Open one with `quickthink open <deck>`.",
        ));
    }
    Ok(deck)
}
