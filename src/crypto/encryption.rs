//! AES-256-GCM authenticated encryption.
//!
//! Unlike a self-describing blob, the nonce is handed in and out
//! explicitly: the backup envelope stores it in its own fixed slot
//! next to the salt.  The returned ciphertext carries the 16-byte
//! authentication tag appended, as GCM does conventionally.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};

use super::keys::BackupKey;
use crate::errors::{QuillError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Generate a fresh random 12-byte nonce.
///
/// Every encryption gets its own nonce; never reuse one under the same key.
pub fn generate_nonce() -> [u8; NONCE_LEN] {
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let mut out = [0u8; NONCE_LEN];
    out.copy_from_slice(&nonce);
    out
}

/// Encrypt `plaintext` under `key` with the given `nonce`.
///
/// Returns ciphertext || tag.
pub fn encrypt(key: &BackupKey, nonce: &[u8; NONCE_LEN], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| QuillError::EncryptionFailed(format!("invalid key length: {e}")))?;

    cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|e| QuillError::EncryptionFailed(format!("encryption error: {e}")))
}

/// Decrypt ciphertext || tag produced by `encrypt`.
///
/// A wrong key and a tampered ciphertext both surface as
/// `AuthenticationFailure`; GCM cannot tell them apart.
pub fn decrypt(key: &BackupKey, nonce: &[u8; NONCE_LEN], ciphertext: &[u8]) -> Result<Vec<u8>> {
    let cipher =
        Aes256Gcm::new_from_slice(key.as_bytes()).map_err(|_| QuillError::AuthenticationFailure)?;

    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| QuillError::AuthenticationFailure)
}
