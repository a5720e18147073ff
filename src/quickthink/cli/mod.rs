//! # CLI Behavior
//!
//! This is **one possible UI client** for quickthink, not the application
//! itself. It is the only place that knows about terminal I/O, prompts, exit
//! codes and output formatting. For the overall architecture see the library
//! docs.
//!
//! ## Naked Execution
//!
//! Running `quickthink` with no arguments lists decks, the same as
//! `quickthink decks`.
//!
//! ## Decks by Number, Id or Name
//!
//! Every command that takes a deck accepts its number in the listing, its id,
//! or its name (case-insensitive, must be unique): `quickthink open 2`,
//! `quickthink open "bio 101"`.
//!
//! ## The Open Deck
//!
//! `open` remembers a deck across runs. `cards`, `card add`, `upload` and
//! `study` work on the open deck; `close` forgets it.
//!
//! ## Confirmation
//!
//! `deck delete` asks before deleting unless `--yes` is given. Without a
//! terminal to answer, the answer is "no".
//!
//! ## Module Structure
//!
//! - `commands`: dispatch and per-command handlers
//! - `print`: output formatting (deck list, cards, messages)
//! - `setup`: argument parsing via clap
//! - `study`: the interactive study loop

mod commands;
mod print;
pub mod setup;
mod study;

pub use commands::run;
