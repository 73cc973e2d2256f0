//! `quill entries` — list entries, newest first.

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::{QuillError, Result};

/// Execute the `entries` command.
pub fn execute(cli: &Cli, board: Option<&str>) -> Result<()> {
    let ctx = Context::load(cli)?;
    let (_, store) = ctx.load_journal()?;

    let entries: Vec<_> = match board {
        Some(id) => {
            if store.active_board(id).is_none() {
                return Err(QuillError::BoardNotFound(id.to_string()));
            }
            store.entries_for_board(id).collect()
        }
        None => store.active_entries().collect(),
    };

    output::print_entries_table(&entries);
    Ok(())
}
