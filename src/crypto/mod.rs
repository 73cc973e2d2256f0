//! Cryptographic primitives for Quill backups.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - PBKDF2-HMAC-SHA256 passphrase-based key derivation (`kdf`)
//! - The zeroize-on-drop `BackupKey` wrapper (`keys`)
//! - Suggested passphrases and passphrase validation (`passphrase`)

pub mod encryption;
pub mod kdf;
pub mod keys;
pub mod passphrase;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_backup_key, ...};
pub use encryption::{decrypt, encrypt, generate_nonce, NONCE_LEN, TAG_LEN};
pub use kdf::{derive_backup_key, generate_salt, PBKDF2_ITERATIONS, SALT_LEN};
pub use keys::{BackupKey, KEY_LEN};
pub use passphrase::{
    generate_passphrase, generate_passphrase_with, validate_export_passphrase,
    validate_import_passphrase, MIN_PASSPHRASE_LEN,
};
