use chrono::{DateTime, Utc};
use colored::Colorize;
use quickthink::api::{CmdMessage, MessageLevel};
use quickthink::config::{QuickThinkConfig, KEYS};
use quickthink::index::DisplayDeck;
use quickthink::model::{Deck, Flashcard};
use serde_json::Value;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const CATEGORY_WIDTH: usize = 20;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_decks(decks: &[DisplayDeck], open: Option<&Deck>) {
    if decks.is_empty() {
        println!("No decks found.");
        return;
    }

    for dd in decks {
        let is_open = open.is_some_and(|o| o.id == dd.deck.id);
        let marker = if is_open { "> " } else { "  " };
        let idx_str = format!("{}. ", dd.index);

        let category = pad_to_width(
            &truncate_to_width(&dd.deck.category, CATEGORY_WIDTH),
            CATEGORY_WIDTH,
        );
        let time_ago = dd
            .deck
            .last_modified()
            .map(format_time_ago)
            .unwrap_or_else(|| " ".repeat(TIME_WIDTH));

        let fixed_width = marker.width() + idx_str.width() + CATEGORY_WIDTH + 2 + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let name = pad_to_width(&truncate_to_width(&dd.deck.name, available), available);

        let name_colored = if is_open {
            name.bold()
        } else {
            name.normal()
        };

        println!(
            "{}{}{}  {}{}",
            marker,
            idx_str.yellow(),
            name_colored,
            category.cyan(),
            time_ago.dimmed()
        );
    }
}

pub(super) fn print_deck(deck: &Deck) {
    println!("{} {}", deck.name.bold(), format!("[{}]", deck.category).cyan());
    if !deck.description.is_empty() {
        println!("{}", deck.description);
    }
    println!("{}", format!("id: {}", deck.id).dimmed());
}

pub(super) fn print_cards(cards: &[Flashcard]) {
    if cards.is_empty() {
        println!("No flashcards yet.");
        return;
    }

    for (i, card) in cards.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{} {}", format!("{}.", i + 1).yellow(), card.question.bold());
        println!("   {}", card.answer);
    }
}

pub(super) fn print_config(config: &QuickThinkConfig) {
    for key in KEYS {
        let value = config.get(key).unwrap_or_default();
        println!("{} = {}", key, value);
    }
}

pub(super) fn print_user(user: &Value) {
    if let Some(id) = user.get("id").and_then(Value::as_str) {
        println!("{}", format!("user id: {}", id).dimmed());
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn pad_to_width(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);

    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("Bio 101", 20), "Bio 101");
    }

    #[test]
    fn long_text_gets_ellipsis_within_width() {
        let out = truncate_to_width("Molecular Biology of the Cell", 10);
        assert!(out.ends_with('…'));
        assert!(out.width() <= 10);
    }

    #[test]
    fn wide_characters_count_double() {
        let out = truncate_to_width("生物学の基礎講座", 7);
        assert!(out.width() <= 7);
    }

    #[test]
    fn padding_fills_to_width() {
        assert_eq!(pad_to_width("ab", 5), "ab   ");
        assert_eq!(pad_to_width("abcdef", 3), "abcdef");
    }

    #[test]
    fn time_ago_is_right_aligned() {
        let out = format_time_ago(Utc::now() - chrono::Duration::hours(3));
        assert_eq!(out.width(), TIME_WIDTH);
        assert!(out.trim_start().starts_with('3'));
    }
}
