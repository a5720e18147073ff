use crate::model::Flashcard;

/// Walks through a deck one card at a time.
///
/// The cursor starts on the first card and never moves past either end.
/// Moving to another card hides its answer again.
#[derive(Debug, Clone, Default)]
pub struct StudySession {
    cards: Vec<Flashcard>,
    position: usize,
    revealed: bool,
}

impl StudySession {
    pub fn new(cards: Vec<Flashcard>) -> Self {
        Self {
            cards,
            position: 0,
            revealed: false,
        }
    }

    /// Replace the cards, e.g. after a re-fetch. Resets to the first card.
    pub fn reload(&mut self, cards: Vec<Flashcard>) {
        *self = Self::new(cards);
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn current(&self) -> Option<&Flashcard> {
        self.cards.get(self.position)
    }

    /// 1-based position and total, as shown to the user ("3 / 10").
    pub fn progress(&self) -> (usize, usize) {
        if self.cards.is_empty() {
            (0, 0)
        } else {
            (self.position + 1, self.cards.len())
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn reveal(&mut self) {
        self.revealed = !self.cards.is_empty();
    }

    pub fn has_next(&self) -> bool {
        self.position + 1 < self.cards.len()
    }

    pub fn has_previous(&self) -> bool {
        self.position > 0
    }

    /// Advance one card. Returns false (and stays put) on the last card.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.position += 1;
        self.revealed = false;
        true
    }

    /// Go back one card. Returns false (and stays put) on the first card.
    pub fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.position -= 1;
        self.revealed = false;
        true
    }
}
