//! `quill write` — answer a board's prompt with a new entry.
//!
//! Usage:
//!   quill write --board board_k3j5h2m9x4a "Coffee with Ana at the harbor"
//!   quill write --board board_k3j5h2m9x4a      # prompts for the text

use console::style;
use dialoguer::Input;
use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::{QuillError, Result};
use crate::extract;
use crate::journal::{validate_content, StoreBackend};

/// Execute the `write` command.
pub fn execute(cli: &Cli, board_id: &str, content: Option<&str>) -> Result<()> {
    let ctx = Context::load(cli)?;
    let (backend, mut store) = ctx.load_journal()?;

    // 1. The board must exist and not be deleted.
    let prompt = match store.active_board(board_id) {
        Some(board) => board.prompt.clone(),
        None => {
            output::tip("Run `quill board list` to see your boards.");
            return Err(QuillError::BoardNotFound(board_id.to_string()));
        }
    };

    // 2. Take the text from the argument, or ask for it.
    let content = match content {
        Some(c) => Zeroizing::new(c.to_string()),
        None => {
            println!("{}", style(&prompt).bold());
            Zeroizing::new(
                Input::<String>::new()
                    .with_prompt("Your answer")
                    .interact_text()
                    .map_err(|e| QuillError::CommandFailed(format!("failed to read entry: {e}")))?,
            )
        }
    };
    validate_content(&content)?;

    // 3. Best-effort entity extraction; never blocks the save.
    let entities = extract::from_settings(ctx.settings.extractor_url.as_deref())
        .and_then(|extractor| extract::extract_best_effort(extractor.as_ref(), &content));

    // 4. Save.
    let entry_id = store.create_entry(board_id, &content, entities)?.id.clone();
    backend.save(&store)?;

    ctx.audit("write", Some(&entry_id), Some(&format!("board {board_id}")));
    output::success(&format!("Saved entry {entry_id}"));

    Ok(())
}
