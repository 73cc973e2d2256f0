//! `quill export` — write an encrypted backup of the whole journal.
//!
//! The backup is a single base64 text file named after the export time,
//! e.g. `backup-oct-17-2026-1430.txt`.  A memorable passphrase is
//! suggested; the user can keep it or type their own.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use console::style;

use crate::backup::{ExportFlow, ExportOutcome};
use crate::cli::output;
use crate::cli::{passphrase_in_env, prompt_export_passphrase, Cli, Context};
use crate::crypto::generate_passphrase;
use crate::errors::{QuillError, Result};

/// Execute the `export` command.
pub fn execute(cli: &Cli, output_dir: Option<&str>) -> Result<()> {
    let ctx = Context::load(cli)?;
    let (_, store) = ctx.load_journal()?;

    // 1. Nothing to back up: say so and stop before asking for a passphrase.
    if store.is_empty() {
        output::info("Nothing to export: the journal has no boards or entries.");
        return Ok(());
    }

    // 2. Choose the passphrase.
    let mut flow = ExportFlow::new(&ctx.settings.backup_extension);
    let suggested = generate_passphrase();
    if !passphrase_in_env() {
        println!("Suggested passphrase: {}", style(&suggested).cyan().bold());
        output::tip("Press Enter to keep it, or type your own.");
    }
    let passphrase = prompt_export_passphrase(&suggested)?;
    flow.choose_passphrase(&passphrase)?;

    // 3. Encrypt.
    let artifact = match flow.run(&store, &Local::now())? {
        ExportOutcome::Done(artifact) => artifact,
        ExportOutcome::NothingToExport => {
            output::info("Nothing to export: the journal has no boards or entries.");
            return Ok(());
        }
    };

    // 4. Write the file.
    let dir = match output_dir {
        Some(d) => ctx.cwd.join(d),
        None => ctx.settings.backup_dir_path(&ctx.cwd),
    };
    let dest = write_backup(&dir, &artifact.file_name, &artifact.contents)?;

    ctx.audit(
        "export",
        None,
        Some(&format!(
            "{} boards, {} entries -> {}",
            store.boards.len(),
            store.entries.len(),
            artifact.file_name
        )),
    );

    output::success(&format!("Backup written to {}", dest.display()));
    output::warning(
        "Keep your passphrase safe. No one, including us, can recover a backup without it.",
    );

    Ok(())
}

/// Write `contents` to `dir/file_name`, refusing to overwrite.
fn write_backup(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let dest = dir.join(file_name);

    if dest.exists() {
        return Err(QuillError::CommandFailed(format!(
            "{} already exists; wait a minute or choose another --output-dir",
            dest.display()
        )));
    }

    fs::write(&dest, contents)
        .map_err(|e| QuillError::CommandFailed(format!("failed to write backup file: {e}")))?;
    Ok(dest)
}
