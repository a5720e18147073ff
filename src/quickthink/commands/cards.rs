use crate::backend::{Backend, Endpoint};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{QuickThinkError, Result};
use crate::model::FlashcardDraft;

use super::helpers::{absorb_failure, refresh_flashcards, selected_deck};

/// List the flashcards of the open deck.
pub fn list<B: Backend>(backend: &B) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(deck) = selected_deck(&mut result)? else {
        return Ok(result);
    };

    refresh_flashcards(backend, &deck, &mut result)?;
    Ok(result.with_deck(deck))
}

/// Add one flashcard to the open deck.
pub fn add<B: Backend>(backend: &mut B, question: &str, answer: &str) -> Result<CmdResult> {
    if question.trim().is_empty() || answer.trim().is_empty() {
        return Err(QuickThinkError::Api(
            "Question and answer cannot be empty".to_string(),
        ));
    }

    let mut result = CmdResult::default();
    let Some(deck) = selected_deck(&mut result)? else {
        return Ok(result);
    };

    let draft = [FlashcardDraft::new(question, answer)];
    match backend.create_flashcards(&deck.id, &draft) {
        Ok(()) => {
            result.add_message(CmdMessage::success("Flashcard added successfully"));
            refresh_flashcards(backend, &deck, &mut result)?;
        }
        Err(e) => absorb_failure(&mut result, Endpoint::CreateFlashcards(&deck.id), e)?,
    }

    Ok(result.with_deck(deck))
}
