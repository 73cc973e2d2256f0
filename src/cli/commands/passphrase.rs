//! `quill passphrase` — suggest a memorable backup passphrase.

use crate::cli::output;
use crate::crypto::generate_passphrase;
use crate::errors::{QuillError, Result};

/// Execute the `passphrase` command.
pub fn execute(copy: bool) -> Result<()> {
    let passphrase = generate_passphrase();

    if copy {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| QuillError::CommandFailed(format!("clipboard unavailable: {e}")))?;
        clipboard
            .set_text(passphrase.clone())
            .map_err(|e| QuillError::CommandFailed(format!("failed to copy: {e}")))?;
        output::success("Passphrase copied to clipboard.");
    } else {
        println!("{passphrase}");
    }

    output::tip("Write it down: no one can recover a backup without it.");
    Ok(())
}
