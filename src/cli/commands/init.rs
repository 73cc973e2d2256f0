//! `quill init` — create a new journal holding one default board.

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::{QuillError, Result};
use crate::journal::JournalStore;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let ctx = Context::load(cli)?;
    let backend = ctx.backend();

    // 1. Refuse to overwrite an existing journal.
    if backend.exists() {
        output::tip("Use `quill write` to add entries to the existing journal.");
        return Err(QuillError::JournalAlreadyExists(backend.path().to_path_buf()));
    }

    // 2. Create the journal with the configured default board.
    let store = JournalStore::with_default_board(&ctx.settings.default_prompt);
    backend.create(&store)?;

    let board_id = store.boards[0].id.clone();
    output::success(&format!("Journal created at {}", backend.path().display()));
    output::info(&format!(
        "Default board {board_id}: {}",
        ctx.settings.default_prompt
    ));

    // 3. Audit log.
    ctx.audit("init", Some(&board_id), Some("journal created"));

    // 4. Show helpful tips.
    output::tip(&format!("Run `quill write --board {board_id}` to write your first entry."));
    output::tip("Run `quill export` to make an encrypted backup.");

    Ok(())
}
