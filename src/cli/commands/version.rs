//! `quill version` — display version and backup format details.

use console::style;

use crate::backup::ENVELOPE_VERSION;
use crate::crypto::PBKDF2_ITERATIONS;
use crate::errors::Result;

/// Execute the `version` command.
pub fn execute() -> Result<()> {
    println!("quill {}", env!("CARGO_PKG_VERSION"));
    println!(
        "{}",
        style(format!(
            "backup format v{ENVELOPE_VERSION}: AES-256-GCM, PBKDF2-SHA256 ({PBKDF2_ITERATIONS} rounds)"
        ))
        .dim()
    );
    Ok(())
}
