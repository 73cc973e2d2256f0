//! `quill import` — restore the journal from an encrypted backup.
//!
//! Import replaces the current journal; nothing is merged.  The user is
//! warned and asked to confirm first (skip with `--yes`).  A wrong
//! passphrase can be retried a few times against the same file.

use std::fs;
use std::path::Path;

use dialoguer::Confirm;

use crate::backup::ImportFlow;
use crate::cli::output;
use crate::cli::{passphrase_in_env, prompt_import_passphrase, Cli, Context};
use crate::errors::{QuillError, Result};
use crate::journal::{JournalStore, StoreBackend};

/// How many passphrases the user may try before we give up.
const MAX_ATTEMPTS: usize = 3;

/// Execute the `import` command.
pub fn execute(cli: &Cli, file_path: &str, yes: bool) -> Result<()> {
    let ctx = Context::load(cli)?;
    let source = Path::new(file_path);

    // 1. Read the backup file.
    if !source.exists() {
        return Err(QuillError::CommandFailed(format!(
            "backup file not found: {}",
            source.display()
        )));
    }
    let contents = fs::read_to_string(source).map_err(|e| {
        QuillError::MalformedEnvelope(format!("{} is not a text file: {e}", source.display()))
    })?;

    let mut flow = ImportFlow::new();
    flow.select_file(file_path, contents);

    // 2. Load the current journal.  A missing one starts empty; a damaged
    //    one is replaced like any other, which is what a restore is for.
    let backend = ctx.backend();
    let mut damaged = false;
    let mut store = match backend.load() {
        Ok(store) => store,
        Err(QuillError::JournalNotFound(_)) => JournalStore::new(),
        Err(e @ QuillError::InvalidJournalFile(_)) => {
            output::warning(&format!("{e}"));
            damaged = true;
            JournalStore::new()
        }
        Err(e) => return Err(e),
    };

    // 3. Warn and confirm before anything is replaced.
    if damaged || !store.is_empty() {
        output::warning("Importing replaces your current journal. Nothing is merged.");
        if !yes {
            let proceed = Confirm::new()
                .with_prompt("Replace the current journal with this backup?")
                .default(false)
                .interact()
                .map_err(|e| {
                    QuillError::CommandFailed(format!("failed to read confirmation: {e}"))
                })?;
            if !proceed {
                flow.cancel();
                output::info("Import cancelled.");
                return Err(QuillError::UserCancelled);
            }
        }
    }

    // 4. Decrypt and validate, retrying on a wrong passphrase.
    let from_env = passphrase_in_env();
    let mut attempt = 0;
    let summary = loop {
        attempt += 1;
        let passphrase = prompt_import_passphrase(attempt == 1)?;
        flow.enter_passphrase(&passphrase)?;

        match flow.confirm(&mut store) {
            Ok(summary) => break summary,
            Err(e) if e.is_retryable() && attempt < MAX_ATTEMPTS && !from_env => {
                output::warning(&format!("{e}. Try again."));
            }
            Err(e) => {
                ctx.audit("import-failed", None, Some(&failure_kind(&e)));
                return Err(e);
            }
        }
    };

    // 5. Persist the restored journal.
    if backend.exists() {
        backend.save(&store)?;
    } else {
        backend.create(&store)?;
    }

    ctx.audit(
        "import",
        None,
        Some(&format!(
            "{} boards, {} entries",
            summary.boards, summary.entries
        )),
    );

    output::success(&format!(
        "Restored {} boards and {} entries from {}",
        summary.boards,
        summary.entries,
        source.display()
    ));

    Ok(())
}

/// Short description of a failed import for the audit log (no file contents).
fn failure_kind(err: &QuillError) -> String {
    match err {
        QuillError::MalformedEnvelope(_) => "malformed envelope".into(),
        QuillError::AuthenticationFailure => "authentication failure".into(),
        QuillError::MalformedPayload(_) => "malformed payload".into(),
        QuillError::DanglingReference { .. } => "dangling reference".into(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_kind_hides_details() {
        let kind = failure_kind(&QuillError::MalformedPayload("missing field `boards`".into()));
        assert_eq!(kind, "malformed payload");
    }

    #[test]
    fn dangling_reference_is_named() {
        let err = QuillError::DanglingReference {
            entry_id: "entry_a".into(),
            board_id: "board_gone".into(),
        };
        assert_eq!(failure_kind(&err), "dangling reference");
    }
}
