use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuickThinkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed with status {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("Storage error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Deck not found: {0}")]
    DeckNotFound(String),

    #[error("\"{selector}\" matches {count} decks, pick one by another number, id or name")]
    AmbiguousDeck { selector: String, count: usize },

    #[error("deck selection accessed outside of a DeckProvider scope")]
    MissingDeckProvider,

    #[error("Api Error: {0}")]
    Api(String),
}

impl QuickThinkError {
    /// True for failures reported by (or on the way to) the remote service.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            QuickThinkError::Http(_) | QuickThinkError::Status { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, QuickThinkError>;
