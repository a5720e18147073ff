//! # QuickThink CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, and this file
//! only invokes `cli::run()` and turns its outcome into an exit status.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/)                                           │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - dispatch, prompts and context wiring (commands.rs)       │
//! │  - terminal output (print.rs), study loop (study.rs)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!               API facade (quickthink::api) and below
//! ```
//!
//! Exit status is 0 when a command finished without error notifications,
//! 1 when it reported one (e.g. "Failed to fetch decks") or failed outright.

use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    match cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
