use crate::backend::{Backend, Endpoint};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{QuickThinkError, Result};
use crate::model::FileUpload;
use std::path::PathBuf;
use tracing::{info, warn};

use super::helpers::{absorb_failure, refresh_flashcards, selected_deck};

/// Send documents to the service for flashcard generation, one request per
/// file. Files that are not acceptable PDFs are skipped with a warning and
/// never sent. When at least one upload succeeds the deck's flashcards are
/// fetched again.
pub fn run<B: Backend>(backend: &mut B, paths: &[PathBuf]) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let Some(deck) = selected_deck(&mut result)? else {
        return Ok(result);
    };

    let mut uploaded = 0;
    for path in paths {
        let upload = match FileUpload::from_path(path) {
            Ok(upload) => upload,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping file");
                let reason = match e {
                    QuickThinkError::Api(reason) => reason,
                    other => format!("{}: {}", path.display(), other),
                };
                result.add_message(CmdMessage::warning(format!("Skipped: {}", reason)));
                continue;
            }
        };

        info!(file = %upload.file_name, deck_id = %deck.id, "uploading document");
        match backend.generate_flashcards(&deck.id, &upload) {
            Ok(()) => {
                uploaded += 1;
                result.add_message(CmdMessage::success(format!(
                    "Flashcards generated from PDF: {}",
                    upload.file_name
                )));
            }
            Err(e) => {
                absorb_failure(&mut result, Endpoint::GenerateFlashcards(&deck.id), e)?;
            }
        }
    }

    if uploaded > 0 {
        refresh_flashcards(backend, &deck, &mut result)?;
    } else if paths.is_empty() {
        result.add_message(CmdMessage::info("No files selected."));
    }

    Ok(result.with_deck(deck))
}
