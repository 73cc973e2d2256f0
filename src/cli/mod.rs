//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::crypto::MIN_PASSPHRASE_LEN;
use crate::errors::{QuillError, Result};
use crate::journal::{JournalStore, JsonFileBackend, StoreBackend};

/// Environment variable that supplies the backup passphrase non-interactively.
pub const PASSPHRASE_ENV: &str = "QUILL_PASSPHRASE";

/// Quill CLI: a private journal with encrypted backups.
#[derive(Parser)]
#[command(
    name = "quill",
    about = "A private journal with encrypted, portable backups",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Journal directory (default from .quill.toml, else .quill)
    #[arg(long, global = true)]
    pub journal_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new journal with a default board
    Init,

    /// Manage boards (journaling prompts)
    Board {
        #[command(subcommand)]
        action: BoardAction,
    },

    /// Write an entry on a board
    Write {
        /// Board id (see `quill board list`)
        #[arg(short, long)]
        board: String,
        /// Entry text (omit for interactive prompt)
        content: Option<String>,
    },

    /// List entries, newest first
    Entries {
        /// Only show entries of this board
        #[arg(short, long)]
        board: Option<String>,
    },

    /// Delete an entry
    Delete {
        /// Entry id
        id: String,
    },

    /// Suggest a memorable backup passphrase
    Passphrase {
        /// Copy the passphrase to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Export an encrypted backup of the whole journal
    Export {
        /// Directory to write the backup into (default from .quill.toml)
        #[arg(short, long)]
        output_dir: Option<String>,
    },

    /// Restore the journal from an encrypted backup (replaces current contents)
    Import {
        /// Path to the backup file
        file: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// View the audit log of journal operations
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Show version
    Version,
}

/// Board subcommands.
#[derive(clap::Subcommand)]
pub enum BoardAction {
    /// Add a board with a new prompt
    Add {
        /// The question to answer in entries
        prompt: String,
    },

    /// List boards
    List,

    /// Delete a board (its entries are kept)
    Delete {
        /// Board id
        id: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Working context resolved from the CLI flags and `.quill.toml`.
pub struct Context {
    pub cwd: PathBuf,
    pub settings: Settings,
    pub journal_dir: PathBuf,
}

impl Context {
    /// Load settings from the working directory and apply CLI overrides.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let settings = Settings::load(&cwd)?;
        let journal_dir = match &cli.journal_dir {
            Some(dir) => cwd.join(dir),
            None => settings.journal_dir_path(&cwd),
        };
        Ok(Self {
            cwd,
            settings,
            journal_dir,
        })
    }

    /// The journal file backend.
    pub fn backend(&self) -> JsonFileBackend {
        JsonFileBackend::in_dir(&self.journal_dir)
    }

    /// Load the journal, with a hint if it has not been created yet.
    pub fn load_journal(&self) -> Result<(JsonFileBackend, JournalStore)> {
        let backend = self.backend();
        match backend.load() {
            Ok(store) => Ok((backend, store)),
            Err(e @ QuillError::JournalNotFound(_)) => {
                output::tip("Run `quill init` to create a journal.");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Record an operation in the audit log (never fails).
    pub fn audit(&self, op: &str, target: Option<&str>, details: Option<&str>) {
        crate::audit::log_audit(&self.journal_dir, op, target, details);
    }
}

/// Read the passphrase from `QUILL_PASSPHRASE`, if set and non-empty.
fn passphrase_from_env() -> Option<Zeroizing<String>> {
    std::env::var(PASSPHRASE_ENV)
        .ok()
        .filter(|pw| !pw.is_empty())
        .map(Zeroizing::new)
}

/// Get the passphrase for a new backup, trying in order:
/// 1. `QUILL_PASSPHRASE` env var (scripts)
/// 2. Interactive prompt, pre-filled with `suggested`
///
/// The user can keep the suggestion or type their own; anything shorter
/// than the minimum is asked again.
pub fn prompt_export_passphrase(suggested: &str) -> Result<Zeroizing<String>> {
    if let Some(pw) = passphrase_from_env() {
        return Ok(pw);
    }

    loop {
        let passphrase: String = dialoguer::Input::new()
            .with_prompt("Backup passphrase")
            .default(suggested.to_string())
            .interact_text()
            .map_err(|e| QuillError::CommandFailed(format!("passphrase prompt: {e}")))?;

        if passphrase.chars().count() < MIN_PASSPHRASE_LEN {
            output::warning(&format!(
                "Passphrase must be at least {MIN_PASSPHRASE_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(passphrase));
    }
}

/// Get the passphrase of an existing backup.
///
/// `QUILL_PASSPHRASE` is used only when `allow_env` is set (first attempt);
/// retries always ask interactively.
pub fn prompt_import_passphrase(allow_env: bool) -> Result<Zeroizing<String>> {
    if allow_env {
        if let Some(pw) = passphrase_from_env() {
            return Ok(pw);
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter your backup passphrase")
        .interact()
        .map_err(|e| QuillError::CommandFailed(format!("passphrase prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Whether the passphrase is coming from the environment.
pub fn passphrase_in_env() -> bool {
    passphrase_from_env().is_some()
}
