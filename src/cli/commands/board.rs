//! `quill board` — add, list, and delete boards.
//!
//! Usage:
//!   quill board add "What made you smile today?"
//!   quill board list
//!   quill board delete board_k3j5h2m9x4a

use crate::cli::output;
use crate::cli::{BoardAction, Cli, Context};
use crate::errors::{QuillError, Result};
use crate::journal::StoreBackend;

/// Execute the `board` command.
pub fn execute(cli: &Cli, action: &BoardAction) -> Result<()> {
    let ctx = Context::load(cli)?;
    match action {
        BoardAction::Add { prompt } => add(&ctx, prompt),
        BoardAction::List => list(&ctx),
        BoardAction::Delete { id } => delete(&ctx, id),
    }
}

fn add(ctx: &Context, prompt: &str) -> Result<()> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(QuillError::Validation("A board needs a prompt".into()));
    }

    let (backend, mut store) = ctx.load_journal()?;
    let board_id = store.create_board(prompt).id.clone();
    backend.save(&store)?;

    ctx.audit("board-add", Some(&board_id), None);
    output::success(&format!("Added board {board_id}"));
    Ok(())
}

fn list(ctx: &Context) -> Result<()> {
    let (_, store) = ctx.load_journal()?;
    let rows: Vec<_> = store
        .active_boards()
        .map(|b| (b, store.entries_for_board(&b.id).count()))
        .collect();
    output::print_boards_table(&rows);
    Ok(())
}

fn delete(ctx: &Context, id: &str) -> Result<()> {
    let (backend, mut store) = ctx.load_journal()?;
    let was_live = store.active_board(id).is_some();

    if !store.soft_delete_board(id) {
        output::info(&format!("Nothing to delete: no board {id}."));
        output::tip("Run `quill board list` to see your boards.");
        return Ok(());
    }
    if !was_live {
        output::info(&format!("Board {id} was already deleted."));
        return Ok(());
    }

    backend.save(&store)?;

    ctx.audit("board-delete", Some(id), None);
    output::success(&format!("Deleted board {id}"));
    Ok(())
}
