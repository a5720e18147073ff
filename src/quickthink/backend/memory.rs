use super::{Backend, Endpoint};
use crate::error::{QuickThinkError, Result};
use crate::model::{Deck, DeckDraft, FileUpload, Flashcard, FlashcardDraft};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-process stand-in for the deck service, for testing.
///
/// Every call is recorded as `"METHOD /path"` (see [`InMemoryBackend::requests`]),
/// and any request can be made to fail with a status via [`InMemoryBackend::fail`].
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    decks: Vec<Deck>,
    flashcards: HashMap<String, Vec<Flashcard>>,
    next_id: usize,
    failures: HashMap<String, u16>,
    requests: RefCell<Vec<String>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every future request matching `request` (e.g. `"DELETE /api/decks/d1"`)
    /// fail with `status`.
    pub fn fail(&mut self, request: &str, status: u16) {
        self.failures.insert(request.to_string(), status);
    }

    pub fn recover(&mut self, request: &str) {
        self.failures.remove(request);
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn clear_requests(&self) {
        self.requests.borrow_mut().clear();
    }

    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    pub fn flashcards(&self, deck_id: &str) -> &[Flashcard] {
        self.flashcards
            .get(deck_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn insert_deck(&mut self, deck: Deck) {
        self.decks.push(deck);
    }

    pub fn insert_flashcard(&mut self, deck_id: &str, card: Flashcard) {
        self.flashcards
            .entry(deck_id.to_string())
            .or_default()
            .push(card);
    }

    fn record(&self, endpoint: Endpoint) -> Result<()> {
        let line = endpoint.to_string();
        self.requests.borrow_mut().push(line.clone());
        match self.failures.get(&line) {
            Some(status) => Err(QuickThinkError::Status {
                status: *status,
                detail: "injected failure".to_string(),
            }),
            None => Ok(()),
        }
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}{}", prefix, self.next_id)
    }

    fn deck_index(&self, id: &str) -> Result<usize> {
        self.decks
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| QuickThinkError::Status {
                status: 404,
                detail: "Deck not found or not owned by user.".to_string(),
            })
    }

    fn add_cards(&mut self, deck_id: &str, drafts: Vec<(String, String)>) {
        let mut created = Vec::with_capacity(drafts.len());
        for (question, answer) in drafts {
            let id = self.fresh_id("c");
            created.push(Flashcard::new(id, question, answer));
        }
        self.flashcards
            .entry(deck_id.to_string())
            .or_default()
            .extend(created);
    }
}

impl Backend for InMemoryBackend {
    fn list_decks(&self) -> Result<Vec<Deck>> {
        self.record(Endpoint::ListDecks)?;
        Ok(self.decks.clone())
    }

    fn create_deck(&mut self, draft: &DeckDraft) -> Result<()> {
        self.record(Endpoint::CreateDeck)?;
        let id = self.fresh_id("d");
        self.decks.push(
            Deck::new(id, draft.name.clone(), draft.category.clone())
                .with_description(draft.description.clone()),
        );
        Ok(())
    }

    fn update_deck(&mut self, id: &str, draft: &DeckDraft) -> Result<()> {
        self.record(Endpoint::UpdateDeck(id))?;
        let idx = self.deck_index(id)?;
        let deck = &mut self.decks[idx];
        deck.name = draft.name.clone();
        deck.category = draft.category.clone();
        deck.description = draft.description.clone();
        Ok(())
    }

    fn delete_deck(&mut self, id: &str) -> Result<()> {
        self.record(Endpoint::DeleteDeck(id))?;
        let idx = self.deck_index(id)?;
        self.decks.remove(idx);
        self.flashcards.remove(id);
        Ok(())
    }

    fn list_flashcards(&self, deck_id: &str) -> Result<Vec<Flashcard>> {
        self.record(Endpoint::ListFlashcards(deck_id))?;
        self.deck_index(deck_id)?;
        Ok(self.flashcards(deck_id).to_vec())
    }

    fn create_flashcards(&mut self, deck_id: &str, cards: &[FlashcardDraft]) -> Result<()> {
        self.record(Endpoint::CreateFlashcards(deck_id))?;
        self.deck_index(deck_id)?;
        let drafts = cards
            .iter()
            .map(|c| (c.question.clone(), c.answer.clone()))
            .collect();
        self.add_cards(deck_id, drafts);
        Ok(())
    }

    fn generate_flashcards(&mut self, deck_id: &str, upload: &FileUpload) -> Result<()> {
        self.record(Endpoint::GenerateFlashcards(deck_id))?;
        self.deck_index(deck_id)?;
        if upload.bytes.is_empty() {
            return Err(QuickThinkError::Status {
                status: 400,
                detail: "File content is empty.".to_string(),
            });
        }
        let question = format!("What does {} cover?", upload.file_name);
        let answer = format!("{} bytes of study material", upload.bytes.len());
        self.add_cards(deck_id, vec![(question, answer)]);
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::selection::{DeckProvider, SelectedDeckStore};
    use crate::storage::memory::MemoryStorage;

    pub struct BackendFixture {
        pub backend: InMemoryBackend,
    }

    impl Default for BackendFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl BackendFixture {
        pub fn new() -> Self {
            Self {
                backend: InMemoryBackend::new(),
            }
        }

        pub fn with_deck(mut self, id: &str, name: &str, category: &str) -> Self {
            self.backend.insert_deck(Deck::new(id, name, category));
            self
        }

        pub fn with_cards(mut self, deck_id: &str, count: usize) -> Self {
            for i in 0..count {
                self.backend.insert_flashcard(
                    deck_id,
                    Flashcard::new(
                        format!("{}-c{}", deck_id, i + 1),
                        format!("Question {}", i + 1),
                        format!("Answer {}", i + 1),
                    ),
                );
            }
            self
        }
    }

    /// A provider over fresh in-memory storage, returned with the storage so
    /// tests can inspect what was persisted.
    pub fn memory_provider() -> (DeckProvider, MemoryStorage) {
        let storage = MemoryStorage::new();
        let provider = DeckProvider::new(SelectedDeckStore::open(Box::new(storage.clone())));
        (provider, storage)
    }
}
