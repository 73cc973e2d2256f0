//! `quill delete` — delete an entry.
//!
//! The entry is tombstoned, not erased: it disappears from listings but
//! still travels in backups with `isDeleted` set.  Deleting an unknown or
//! already-deleted id is a no-op.

use crate::cli::output;
use crate::cli::{Cli, Context};
use crate::errors::Result;
use crate::journal::StoreBackend;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, id: &str) -> Result<()> {
    let ctx = Context::load(cli)?;
    let (backend, mut store) = ctx.load_journal()?;

    let was_live = store.active_entries().any(|e| e.id == id);

    if !store.soft_delete_entry(id) {
        output::info(&format!("Nothing to delete: no entry {id}."));
        output::tip("Run `quill entries` to see entry ids.");
        return Ok(());
    }
    if !was_live {
        output::info(&format!("Entry {id} was already deleted."));
        return Ok(());
    }

    backend.save(&store)?;

    ctx.audit("delete", Some(id), None);
    output::success(&format!("Deleted entry {id}"));

    Ok(())
}
