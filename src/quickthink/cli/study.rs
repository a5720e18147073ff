use colored::Colorize;
use quickthink::error::Result;
use quickthink::model::{Deck, Flashcard};
use quickthink::study::StudySession;
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    /// Enter: show the answer, or move on once it is shown
    Advance,
    Next,
    Previous,
    Reload,
    Quit,
    Unknown,
}

impl Key {
    fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "" | "a" => Key::Advance,
            "n" => Key::Next,
            "p" => Key::Previous,
            "r" => Key::Reload,
            "q" => Key::Quit,
            _ => Key::Unknown,
        }
    }
}

/// Step through `cards` reading one key per line from stdin. Ends on `q`
/// or when input runs out. `r` calls `reload` for a fresh copy of the cards,
/// which yields `None` when they could not be fetched.
pub(super) fn run_study<F>(deck: &Deck, cards: Vec<Flashcard>, reload: F) -> Result<()>
where
    F: FnMut() -> Result<Option<Vec<Flashcard>>>,
{
    let stdin = io::stdin();
    study_loop(deck, cards, reload, stdin.lock(), &mut io::stdout())
}

fn study_loop<R, W, F>(
    deck: &Deck,
    cards: Vec<Flashcard>,
    mut reload: F,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut() -> Result<Option<Vec<Flashcard>>>,
{
    let mut session = StudySession::new(cards);
    if session.is_empty() {
        writeln!(out, "No flashcards available for study")?;
        return Ok(());
    }

    writeln!(out, "{}", format!("Studying {}", deck.name).bold())?;
    writeln!(
        out,
        "{}",
        "Enter: show answer / next card, n: next, p: previous, r: reload, q: quit".dimmed()
    )?;
    show_card(&session, out)?;

    for line in input.lines() {
        match Key::parse(&line?) {
            Key::Quit => break,
            Key::Advance if !session.is_revealed() => {
                session.reveal();
                show_answer(&session, out)?;
                continue;
            }
            Key::Advance | Key::Next => {
                if !session.next() {
                    writeln!(out, "{}", "Last card. Press p to go back or q to quit.".dimmed())?;
                    continue;
                }
            }
            Key::Previous => {
                if !session.previous() {
                    writeln!(out, "{}", "Already at the first card.".dimmed())?;
                    continue;
                }
            }
            Key::Reload => match reload()? {
                Some(cards) => {
                    session.reload(cards);
                    if session.is_empty() {
                        writeln!(out, "No flashcards available for study")?;
                        break;
                    }
                    writeln!(out, "{}", format!("Reloaded {} cards.", session.len()).dimmed())?;
                }
                None => {
                    writeln!(out, "{}", "Could not reload flashcards.".yellow())?;
                    continue;
                }
            },
            Key::Unknown => {
                writeln!(out, "{}", "Use Enter, n, p, r or q.".yellow())?;
                continue;
            }
        }
        show_card(&session, out)?;
    }

    Ok(())
}

fn show_card<W: Write>(session: &StudySession, out: &mut W) -> Result<()> {
    let Some(card) = session.current() else {
        return Ok(());
    };
    let (position, total) = session.progress();
    writeln!(out)?;
    writeln!(out, "{}", format!("{} / {}", position, total).yellow())?;
    writeln!(out, "{}", card.question.bold())?;
    Ok(())
}

fn show_answer<W: Write>(session: &StudySession, out: &mut W) -> Result<()> {
    if let Some(card) = session.current() {
        writeln!(out, "{}", card.answer.green())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(n: usize, prefix: &str) -> Vec<Flashcard> {
        (1..=n)
            .map(|i| {
                Flashcard::new(
                    format!("c{}", i),
                    format!("{}Q{}", prefix, i),
                    format!("{}A{}", prefix, i),
                )
            })
            .collect()
    }

    fn run_with<F>(keys: &str, start: Vec<Flashcard>, reload: F) -> String
    where
        F: FnMut() -> Result<Option<Vec<Flashcard>>>,
    {
        colored::control::set_override(false);
        let deck = Deck::new("d1", "Bio", "Science");
        let mut out = Vec::new();
        study_loop(&deck, start, reload, keys.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn run(keys: &str, n: usize) -> String {
        run_with(keys, cards(n, ""), || Ok(None))
    }

    #[test]
    fn empty_deck_has_nothing_to_study() {
        assert_eq!(run("", 0), "No flashcards available for study\n");
    }

    #[test]
    fn enter_reveals_then_advances() {
        let out = run("\n\nq\n", 2);
        assert!(out.contains("1 / 2"));
        assert!(out.contains("A1"));
        assert!(out.contains("2 / 2"));
        assert!(!out.contains("A2"));
    }

    #[test]
    fn navigation_stops_at_both_ends() {
        let out = run("p\nn\nn\n", 2);
        assert!(out.contains("Already at the first card."));
        assert!(out.contains("Last card."));
    }

    #[test]
    fn reload_returns_to_first_card() {
        let out = run_with("n\nr\n", cards(2, ""), || Ok(Some(cards(3, "new "))));
        let after = out.split("Reloaded 3 cards.").nth(1).unwrap();
        assert!(after.contains("1 / 3"));
        assert!(after.contains("new Q1"));
    }

    #[test]
    fn failed_reload_keeps_position() {
        let out = run_with("n\nr\n", cards(2, ""), || Ok(None));
        assert!(out.contains("Could not reload flashcards."));
        assert!(!out.contains("Reloaded"));
    }

    #[test]
    fn reload_to_empty_deck_ends_study() {
        let out = run_with("r\nn\n", cards(2, ""), || Ok(Some(Vec::new())));
        assert!(out.ends_with("No flashcards available for study\n"));
    }

    #[test]
    fn keys_are_case_insensitive() {
        assert_eq!(Key::parse("Q"), Key::Quit);
        assert_eq!(Key::parse(" n "), Key::Next);
        assert_eq!(Key::parse("R"), Key::Reload);
        assert_eq!(Key::parse("x"), Key::Unknown);
    }
}
