//! Export and import as explicit state machines.
//!
//! ```text
//! export: Idle -> PassphraseChosen -> Encrypting -> Done | Failed
//! import: Idle -> FileSelected -> PassphraseEntered -> Decrypting -> Validating -> Done | Failed
//! ```
//!
//! Neither flow touches the journal until the very end: export never
//! mutates it, and import swaps it wholesale only after the backup has
//! decrypted and validated.  A wrong passphrase sends the import back to
//! `PassphraseEntered` with the file still selected, so the caller can
//! retry.

use chrono::{DateTime, TimeZone};
use tracing::{info, warn};
use zeroize::Zeroizing;

use super::codec;
use crate::crypto::{validate_export_passphrase, validate_import_passphrase};
use crate::errors::{QuillError, Result};
use crate::journal::JournalStore;

/// Build a backup file name such as `backup-oct-17-2026-1430.txt`.
pub fn backup_file_name<Tz>(now: &DateTime<Tz>, extension: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let month = now.format("%b").to_string().to_lowercase();
    format!("backup-{month}-{}.{extension}", now.format("%d-%Y-%H%M"))
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Where an export currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    PassphraseChosen,
    Encrypting,
    Done,
    Failed,
}

/// A finished backup, ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupArtifact {
    pub file_name: String,
    /// Base64 envelope text.
    pub contents: String,
}

/// Result of running an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Done(BackupArtifact),
    /// The journal has no boards and no entries; nothing was written.
    NothingToExport,
}

/// Drives one export.
pub struct ExportFlow {
    state: ExportState,
    passphrase: Option<Zeroizing<String>>,
    extension: String,
}

impl ExportFlow {
    /// Start an export that names its file with `extension`.
    pub fn new(extension: &str) -> Self {
        Self {
            state: ExportState::Idle,
            passphrase: None,
            extension: extension.to_string(),
        }
    }

    pub fn state(&self) -> ExportState {
        self.state
    }

    /// Choose (or replace) the passphrase.  Too short or empty is a
    /// `Validation` error and leaves the state unchanged.
    pub fn choose_passphrase(&mut self, passphrase: &str) -> Result<()> {
        validate_export_passphrase(passphrase)?;
        self.passphrase = Some(Zeroizing::new(passphrase.to_string()));
        self.state = ExportState::PassphraseChosen;
        Ok(())
    }

    /// Encrypt `store` and produce the artifact, named after `now`.
    ///
    /// The passphrase is dropped once this returns, whatever the result.
    pub fn run<Tz>(&mut self, store: &JournalStore, now: &DateTime<Tz>) -> Result<ExportOutcome>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        if store.is_empty() {
            info!("export skipped: journal is empty");
            self.passphrase = None;
            self.state = ExportState::Idle;
            return Ok(ExportOutcome::NothingToExport);
        }

        let passphrase = match (self.state, self.passphrase.take()) {
            (ExportState::PassphraseChosen, Some(p)) => p,
            _ => {
                return Err(QuillError::Validation(
                    "Choose a passphrase before exporting".into(),
                ))
            }
        };

        self.state = ExportState::Encrypting;
        match codec::seal(store, &passphrase) {
            Ok(contents) => {
                let file_name = backup_file_name(now, &self.extension);
                info!(
                    file = %file_name,
                    boards = store.boards.len(),
                    entries = store.entries.len(),
                    "export complete"
                );
                self.state = ExportState::Done;
                Ok(ExportOutcome::Done(BackupArtifact {
                    file_name,
                    contents,
                }))
            }
            Err(e) => {
                warn!(error = %e, "export failed");
                self.state = ExportState::Failed;
                Err(e)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// Where an import currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportState {
    Idle,
    FileSelected,
    PassphraseEntered,
    Decrypting,
    Validating,
    Done,
    Failed,
}

/// Counts of what a successful import brought in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub boards: usize,
    pub entries: usize,
}

/// A backup file the user picked.
struct SelectedFile {
    name: String,
    contents: String,
}

/// Drives one import.
pub struct ImportFlow {
    state: ImportState,
    file: Option<SelectedFile>,
    passphrase: Option<Zeroizing<String>>,
}

impl Default for ImportFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportFlow {
    pub fn new() -> Self {
        Self {
            state: ImportState::Idle,
            file: None,
            passphrase: None,
        }
    }

    pub fn state(&self) -> ImportState {
        self.state
    }

    /// Name of the selected backup file, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.file.as_ref().map(|f| f.name.as_str())
    }

    /// The passphrase entered so far (kept across failed attempts).
    pub fn passphrase(&self) -> Option<&str> {
        self.passphrase.as_ref().map(|p| p.as_str())
    }

    /// Select the backup file to restore from.
    pub fn select_file(&mut self, name: &str, contents: String) {
        self.file = Some(SelectedFile {
            name: name.to_string(),
            contents,
        });
        self.state = if self.passphrase.is_some() {
            ImportState::PassphraseEntered
        } else {
            ImportState::FileSelected
        };
    }

    /// Enter (or correct) the passphrase.
    pub fn enter_passphrase(&mut self, passphrase: &str) -> Result<()> {
        if self.file.is_none() {
            return Err(QuillError::Validation(
                "Select a backup file before entering its passphrase".into(),
            ));
        }
        validate_import_passphrase(passphrase)?;
        self.passphrase = Some(Zeroizing::new(passphrase.to_string()));
        self.state = ImportState::PassphraseEntered;
        Ok(())
    }

    /// Decrypt, validate, and on success replace `store` with the backup.
    ///
    /// The caller must have warned the user that the current journal is
    /// discarded; nothing is merged.  On any error `store` is untouched.
    /// `AuthenticationFailure` leaves the flow in `PassphraseEntered` for
    /// a retry; every other failure ends in `Failed`.
    pub fn confirm(&mut self, store: &mut JournalStore) -> Result<ImportSummary> {
        if self.state != ImportState::PassphraseEntered {
            return Err(QuillError::Validation(
                "Select a backup file and enter its passphrase first".into(),
            ));
        }
        let (Some(file), Some(passphrase)) = (self.file.as_ref(), self.passphrase.as_ref()) else {
            return Err(QuillError::Validation(
                "Select a backup file and enter its passphrase first".into(),
            ));
        };

        // 1. Decrypting
        self.state = ImportState::Decrypting;
        let plaintext = match codec::decrypt_backup(&file.contents, passphrase) {
            Ok(p) => p,
            Err(QuillError::AuthenticationFailure) => {
                warn!(file = %file.name, "import: authentication failed");
                self.state = ImportState::PassphraseEntered;
                return Err(QuillError::AuthenticationFailure);
            }
            Err(e) => {
                warn!(file = %file.name, error = %e, "import: unreadable backup");
                self.state = ImportState::Failed;
                return Err(e);
            }
        };

        // 2. Validating
        self.state = ImportState::Validating;
        let restored = match codec::parse_payload(&plaintext) {
            Ok(s) => s,
            Err(e) => {
                warn!(file = %file.name, error = %e, "import: invalid payload");
                self.state = ImportState::Failed;
                return Err(e);
            }
        };

        // 3. Replace
        let summary = ImportSummary {
            boards: restored.boards.len(),
            entries: restored.entries.len(),
        };
        store.replace_all(restored);
        info!(
            file = %file.name,
            boards = summary.boards,
            entries = summary.entries,
            "import complete"
        );

        self.state = ImportState::Done;
        self.passphrase = None;
        Ok(summary)
    }

    /// Abandon the import, forgetting the file and passphrase.
    pub fn cancel(&mut self) {
        self.file = None;
        self.passphrase = None;
        self.state = ImportState::Idle;
    }
}
