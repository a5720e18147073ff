use super::print::{print_cards, print_config, print_deck, print_decks, print_messages, print_user};
use super::setup::{CardCommands, Cli, Commands, DeckCommands};
use super::study::run_study;
use clap::Parser;
use quickthink::api::{self, CmdResult, ConfigAction, QuickThinkApi};
use quickthink::backend::http::HttpBackend;
use quickthink::error::Result;
use quickthink::init::{data_dir, initialize};
use quickthink::model::{DeckDraft, DeckEdit};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

struct AppContext {
    api: QuickThinkApi<HttpBackend>,
}

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Config is handled before the context exists so a broken api-url can
    // still be fixed.
    let command = match cli.command {
        Some(Commands::Config { key, value }) => {
            return handle_config(key, value).map(exit_code);
        }
        other => other,
    };

    let mut ctx = init_context()?;

    let result = match command {
        None | Some(Commands::Decks) => handle_decks(&mut ctx)?,
        Some(Commands::Deck { command }) => match command {
            DeckCommands::List => handle_decks(&mut ctx)?,
            DeckCommands::Create {
                name,
                category,
                description,
            } => handle_create(&mut ctx, name.join(" "), category, description)?,
            DeckCommands::Edit {
                deck,
                name,
                category,
                description,
            } => {
                let edit = DeckEdit {
                    name,
                    category,
                    description,
                };
                handle_edit(&mut ctx, deck, edit)?
            }
            DeckCommands::Delete { deck, yes } => handle_delete(&mut ctx, deck, yes)?,
        },
        Some(Commands::Open { deck }) => handle_open(&mut ctx, deck.join(" "))?,
        Some(Commands::Close) => handle_close(&mut ctx)?,
        Some(Commands::Current) => handle_current(&mut ctx)?,
        Some(Commands::Cards) => handle_cards(&mut ctx)?,
        Some(Commands::Card { command }) => match command {
            CardCommands::Add { question, answer } => {
                handle_card_add(&mut ctx, question, answer)?
            }
        },
        Some(Commands::Upload { files }) => handle_upload(&mut ctx, files)?,
        Some(Commands::Study) => handle_study(&mut ctx)?,
        Some(Commands::Signup { email, password }) => {
            let password = password_or_prompt(password)?;
            show(ctx.api.sign_up(&email, &password))
        }
        Some(Commands::Login { email, password }) => {
            let password = password_or_prompt(password)?;
            show(ctx.api.sign_in(&email, &password))
        }
        Some(Commands::Logout) => show(ctx.api.sign_out()),
        Some(Commands::Whoami) => show(ctx.api.current_user()),
        Some(Commands::Config { key, value }) => handle_config(key, value)?,
    };

    Ok(exit_code(result))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "quickthink=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn init_context() -> Result<AppContext> {
    let ctx = initialize()?;
    Ok(AppContext { api: ctx.api })
}

fn exit_code(result: CmdResult) -> ExitCode {
    if result.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn show(result: CmdResult) -> CmdResult {
    print_messages(&result.messages);
    if let Some(user) = &result.user {
        print_user(user);
    }
    result
}

fn handle_decks(ctx: &mut AppContext) -> Result<CmdResult> {
    let result = ctx.api.list_decks()?;
    if !result.has_errors() {
        let open = ctx.api.current_deck()?.deck;
        print_decks(&result.listed_decks, open.as_ref());
    }
    print_messages(&result.messages);
    Ok(result)
}

/// Messages first, then the re-fetched deck list when there is one.
fn show_refreshed_decks(ctx: &mut AppContext, result: CmdResult) -> Result<CmdResult> {
    print_messages(&result.messages);
    if !result.has_errors() {
        let open = ctx.api.current_deck()?.deck;
        print_decks(&result.listed_decks, open.as_ref());
    }
    Ok(result)
}

fn handle_create(
    ctx: &mut AppContext,
    name: String,
    category: String,
    description: String,
) -> Result<CmdResult> {
    let draft = DeckDraft::new(name, category, description);
    let result = ctx.api.create_deck(&draft)?;
    show_refreshed_decks(ctx, result)
}

fn handle_edit(ctx: &mut AppContext, deck: String, edit: DeckEdit) -> Result<CmdResult> {
    let result = ctx.api.update_deck(&deck, &edit)?;
    show_refreshed_decks(ctx, result)
}

fn handle_delete(ctx: &mut AppContext, deck: String, yes: bool) -> Result<CmdResult> {
    let preview = ctx.api.preview_delete(&deck)?;
    let Some(target) = preview.deck.clone() else {
        print_messages(&preview.messages);
        return Ok(preview);
    };

    if !yes {
        let question = format!("Delete deck \"{}\" and all its flashcards? [y/N] ", target.name);
        if !confirm(&question)? {
            println!("Aborted.");
            return Ok(CmdResult::default());
        }
    }

    let result = ctx.api.delete_deck(&target)?;
    show_refreshed_decks(ctx, result)
}

fn handle_open(ctx: &mut AppContext, deck: String) -> Result<CmdResult> {
    let result = ctx.api.open_deck(&deck)?;
    print_messages(&result.messages);
    Ok(result)
}

fn handle_close(ctx: &mut AppContext) -> Result<CmdResult> {
    let result = ctx.api.close_deck()?;
    print_messages(&result.messages);
    Ok(result)
}

fn handle_current(ctx: &mut AppContext) -> Result<CmdResult> {
    let result = ctx.api.current_deck()?;
    if let Some(deck) = &result.deck {
        print_deck(deck);
    }
    print_messages(&result.messages);
    Ok(result)
}

fn handle_cards(ctx: &mut AppContext) -> Result<CmdResult> {
    let result = ctx.api.list_flashcards()?;
    if let (Some(deck), false) = (&result.deck, result.has_errors()) {
        println!("{}", deck.name);
        println!();
        print_cards(&result.listed_flashcards);
    }
    print_messages(&result.messages);
    Ok(result)
}

fn handle_card_add(ctx: &mut AppContext, question: String, answer: String) -> Result<CmdResult> {
    let result = ctx.api.add_flashcard(&question, &answer)?;
    print_messages(&result.messages);
    Ok(result)
}

fn handle_upload(ctx: &mut AppContext, files: Vec<PathBuf>) -> Result<CmdResult> {
    let result = ctx.api.upload_files(&files)?;
    print_messages(&result.messages);
    if result.deck.is_some() && !result.listed_flashcards.is_empty() {
        println!();
        print_cards(&result.listed_flashcards);
    }
    Ok(result)
}

fn handle_study(ctx: &mut AppContext) -> Result<CmdResult> {
    let mut result = ctx.api.list_flashcards()?;
    print_messages(&result.messages);
    if let (Some(deck), false) = (&result.deck, result.has_errors()) {
        let cards = std::mem::take(&mut result.listed_flashcards);
        run_study(deck, cards, || {
            let fresh = ctx.api.list_flashcards()?;
            if fresh.has_errors() {
                print_messages(&fresh.messages);
                return Ok(None);
            }
            Ok(Some(fresh.listed_flashcards))
        })?;
    }
    Ok(result)
}

fn handle_config(key: Option<String>, value: Option<String>) -> Result<CmdResult> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let show_all = matches!(action, ConfigAction::ShowAll);
    let result = api::config(&data_dir()?, action)?;
    if let (true, Some(config)) = (show_all, &result.config) {
        print_config(config);
    }
    print_messages(&result.messages);
    Ok(result)
}

/// Ask a yes/no question on stdin. Anything but "y"/"yes", including no
/// input at all, is a no.
fn confirm(question: &str) -> Result<bool> {
    let answer = prompt(question)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    match password {
        Some(password) => Ok(password),
        None => prompt("Password: "),
    }
}

fn prompt(question: &str) -> Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{}", question)?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
