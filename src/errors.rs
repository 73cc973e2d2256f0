use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in Quill.
#[derive(Debug, Error)]
pub enum QuillError {
    // --- Input errors ---
    #[error("{0}")]
    Validation(String),

    // --- Backup errors ---
    #[error("Not a valid backup file: {0}")]
    MalformedEnvelope(String),

    #[error("Could not decrypt the backup — the passphrase may be incorrect, or the file is damaged")]
    AuthenticationFailure,

    #[error("Not a valid backup: {0}")]
    MalformedPayload(String),

    #[error("Entry '{entry_id}' refers to board '{board_id}', which does not exist")]
    DanglingReference { entry_id: String, board_id: String },

    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Journal errors ---
    #[error("Journal not found at {0}")]
    JournalNotFound(PathBuf),

    #[error("Journal already exists at {0}")]
    JournalAlreadyExists(PathBuf),

    #[error("Invalid journal file: {0}")]
    InvalidJournalFile(String),

    #[error("Board '{0}' not found")]
    BoardNotFound(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- Collaborators ---
    #[error("Entity extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Audit error: {0}")]
    AuditError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

impl QuillError {
    /// Whether an import that failed with this error may be retried with
    /// another passphrase against the same file.
    pub fn is_retryable(&self) -> bool {
        matches!(self, QuillError::AuthenticationFailure)
    }
}

/// Convenience type alias for Quill results.
pub type Result<T> = std::result::Result<T, QuillError>;
