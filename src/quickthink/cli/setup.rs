use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quickthink", bin_name = "quickthink", version)]
#[command(about = "Study flashcard decks from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List decks
    #[command(alias = "ls")]
    Decks,

    /// Create, edit or delete decks
    Deck {
        #[command(subcommand)]
        command: DeckCommands,
    },

    /// Open a deck for the card commands
    #[command(alias = "o")]
    Open {
        /// Deck number, id or name
        #[arg(required = true, num_args = 1..)]
        deck: Vec<String>,
    },

    /// Close the open deck
    Close,

    /// Show the open deck
    Current,

    /// List the flashcards of the open deck
    Cards,

    /// Add flashcards to the open deck
    Card {
        #[command(subcommand)]
        command: CardCommands,
    },

    /// Generate flashcards for the open deck from PDF documents
    Upload {
        /// PDF files, at most 5 MB each
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,
    },

    /// Study the open deck card by card
    Study,

    /// Create an account
    Signup {
        email: String,

        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign in
    Login {
        email: String,

        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Get or set configuration
    Config {
        /// Configuration key (api-url, auth-url, auth-key, timeout)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DeckCommands {
    /// List decks
    #[command(alias = "ls")]
    List,

    /// Create a deck
    #[command(alias = "n")]
    Create {
        /// Name of the deck
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,

        /// Category, e.g. "Science"
        #[arg(short, long)]
        category: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Change a deck's name, category or description
    #[command(alias = "e")]
    Edit {
        /// Deck number, id or name
        deck: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a deck and its flashcards
    #[command(alias = "rm")]
    Delete {
        /// Deck number, id or name
        deck: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum CardCommands {
    /// Add one flashcard
    Add { question: String, answer: String },
}
