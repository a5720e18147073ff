//! # QuickThink Architecture
//!
//! QuickThink is a flashcard study client. Users sign in, organize study
//! material into decks, and fill decks with question/answer flashcards, either
//! by hand or by uploading a PDF that the deck service turns into flashcards.
//! Decks and flashcards live in a remote REST service; this crate holds the
//! client side of that conversation plus the little state a client keeps
//! locally (which deck is open, the auth session, configuration).
//!
//! Like any client library with a CLI on top, the library is UI agnostic and
//! the binary is one possible front end.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prompts, study loop, colored output    │
//! │  - The ONLY place that knows about stdout/stdin/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Parses deck selectors, scopes the deck provider          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Calls the backend, turns failures into notifications     │
//! │  - Re-fetches after every confirmed change                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────┬──────────────────────────────┐
//! │  Backend (backend/)          │  Selection + Storage         │
//! │  - HttpBackend (reqwest)     │  - SelectedDeckStore         │
//! │  - InMemoryBackend (tests)   │  - FileStorage / Memory      │
//! └──────────────────────────────┴──────────────────────────────┘
//! ```
//!
//! ## No Optimistic Updates
//!
//! A command never edits its local copy of the deck list to reflect a change
//! it just asked for. It waits for the service to confirm, then fetches the
//! list again. A failed request leaves every piece of local state as it was
//! and adds a single error notification ("Failed to delete deck").
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns
//! `Result<CmdResult>`, and never writes to stdout/stderr or exits the process.
//! Diagnostics go through `tracing`; whoever embeds the library decides where
//! they end up.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): unit tests against [`backend::memory::InMemoryBackend`],
//!    which records every request and can be told to fail any of them.
//! 2. **API** (`api.rs`): dispatch and selector parsing.
//! 3. **CLI** (`tests/`): the binary run against a temporary data directory,
//!    plus the real HTTP backend against a local listener.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Logic for each user action
//! - [`backend`]: The deck service contract and its implementations
//! - [`selection`]: The Selected-Deck Store and its provider
//! - [`storage`]: Durable key/value storage
//! - [`auth`]: Sign-up, sign-in and sessions
//! - [`model`]: Decks, flashcards and uploads
//! - [`index`]: Deck numbering and selectors
//! - [`study`]: Study session navigation
//! - [`config`]: Configuration management
//! - [`init`]: Data directory resolution and wiring
//! - [`error`]: Error types

pub mod api;
pub mod auth;
pub mod backend;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod init;
pub mod model;
pub mod selection;
pub mod storage;
pub mod study;
