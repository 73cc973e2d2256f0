//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The iteration count, hash, and key length are protocol constants of
//! backup format version 1.  Only the salt travels inside the envelope,
//! so an importer must derive with exactly these values.

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;
use hmac::Hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use super::keys::{BackupKey, KEY_LEN};
use crate::errors::{QuillError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// PBKDF2 rounds for backup format version 1.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Derive the 256-bit backup key from a passphrase and salt.
///
/// The same passphrase + salt always produce the same key.  An empty
/// passphrase is rejected; callers validate before getting here.
pub fn derive_backup_key(passphrase: &[u8], salt: &[u8; SALT_LEN]) -> Result<BackupKey> {
    if passphrase.is_empty() {
        return Err(QuillError::KeyDerivationFailed(
            "passphrase must not be empty".into(),
        ));
    }

    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::pbkdf2::<Hmac<Sha256>>(passphrase, salt, PBKDF2_ITERATIONS, &mut key[..])
        .map_err(|e| QuillError::KeyDerivationFailed(format!("PBKDF2 failed: {e}")))?;

    Ok(BackupKey::new(*key))
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}
