use crate::backend::Backend;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::DeckSelector;
use crate::selection::use_deck;

use super::helpers::find_deck;

/// Open a deck: store a full copy of it as the selected deck.
pub fn open<B: Backend>(backend: &B, selector: &DeckSelector) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(deck) = find_deck(backend, selector, &mut result)? else {
        return Ok(result);
    };

    use_deck()?.set_selected(Some(deck.clone()))?;
    result.add_message(CmdMessage::success(format!("Opened deck: {}", deck.name)));
    Ok(result.with_deck(deck))
}

pub fn close() -> Result<CmdResult> {
    let handle = use_deck()?;
    let mut result = CmdResult::default();
    match handle.selected() {
        Some(deck) => {
            handle.set_selected(None)?;
            result.add_message(CmdMessage::success(format!("Closed deck: {}", deck.name)));
        }
        None => result.add_message(CmdMessage::info("No deck was open.")),
    }
    Ok(result)
}

pub fn current() -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match use_deck()?.selected() {
        Some(deck) => result.deck = Some(deck),
        None => result.add_message(CmdMessage::info("No deck selected.")),
    }
    Ok(result)
}
