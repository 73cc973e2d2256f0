//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use chrono::{Local, TimeZone};
use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::journal::{Board, Entry};

/// Longest entry preview shown in the entries table, in characters.
const PREVIEW_CHARS: usize = 60;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Format epoch milliseconds as local time.
pub fn format_millis(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

/// First line of `content`, cut to the preview width.
fn preview(content: &str) -> String {
    let line = content.lines().next().unwrap_or_default();
    if line.chars().count() > PREVIEW_CHARS || content.lines().nth(1).is_some() {
        let cut: String = line.chars().take(PREVIEW_CHARS).collect();
        format!("{}\u{2026}", cut.trim_end())
    } else {
        line.to_string()
    }
}

/// Print a table of boards (Id, Prompt, Entries, Created).
pub fn print_boards_table(boards: &[(&Board, usize)]) {
    if boards.is_empty() {
        info("No boards yet.");
        tip("Run `quill board add <PROMPT>` to add one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Prompt", "Entries", "Created"]);

    for (board, count) in boards {
        table.add_row(vec![
            board.id.clone(),
            board.prompt.clone(),
            count.to_string(),
            format_millis(board.created_at),
        ]);
    }

    println!("{table}");
}

/// Print a table of entries (Id, Board, Written, Entry, People, Places).
pub fn print_entries_table(entries: &[&Entry]) {
    if entries.is_empty() {
        info("No entries yet.");
        tip("Run `quill write --board <ID>` to write one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Board", "Written", "Entry", "People", "Places"]);

    for entry in entries {
        let (people, places) = match &entry.entities {
            Some(e) => (join_or_dash(&e.people), join_or_dash(&e.places)),
            None => ("-".to_string(), "-".to_string()),
        };
        table.add_row(vec![
            entry.id.clone(),
            entry.board_id.clone(),
            format_millis(entry.timestamp),
            preview(&entry.content),
            people,
            places,
        ]);
    }

    println!("{table}");
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_single_line_is_unchanged() {
        assert_eq!(preview("Grateful for tea"), "Grateful for tea");
    }

    #[test]
    fn long_line_is_cut_with_ellipsis() {
        let text = "a".repeat(100);
        let p = preview(&text);
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 1);
        assert!(p.ends_with('\u{2026}'));
    }

    #[test]
    fn multiline_shows_first_line() {
        assert_eq!(preview("first line\nsecond"), "first line\u{2026}");
    }

    #[test]
    fn empty_lists_show_dash() {
        assert_eq!(join_or_dash(&[]), "-");
        assert_eq!(join_or_dash(&["Ana".into(), "Ben".into()]), "Ana, Ben");
    }
}
