//! Backup passphrases: a memorable suggested default, and the minimum
//! checks a passphrase must pass before any crypto work happens.
//!
//! A suggested passphrase is two words from a small dictionary joined by
//! a hyphen (`calm-ocean`).  It is low entropy and only offered as a
//! default; the user may keep it or type their own.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::errors::{QuillError, Result};

/// Minimum passphrase length accepted for an export.
pub const MIN_PASSPHRASE_LEN: usize = 5;

/// Short, lowercase words that are hard to mishear or mistype.
const WORDS: &[&str] = &[
    "calm", "ocean", "river", "maple", "cloud", "amber", "quiet", "stone", "meadow", "cedar",
    "frost", "lantern", "willow", "harbor", "sunny", "pebble",
];

/// Suggest a passphrase using the thread-local RNG.
pub fn generate_passphrase() -> String {
    generate_passphrase_with(&mut rand::rng())
}

/// Suggest a passphrase of the form `word1-word2`, drawing each word
/// independently (with replacement) from the dictionary.
pub fn generate_passphrase_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = WORDS.choose(rng).copied().unwrap_or("calm");
    let second = WORDS.choose(rng).copied().unwrap_or("ocean");
    format!("{first}-{second}")
}

/// Validate a passphrase chosen for an export.
///
/// Must be non-empty and at least `MIN_PASSPHRASE_LEN` characters.
pub fn validate_export_passphrase(passphrase: &str) -> Result<()> {
    if passphrase.is_empty() {
        return Err(QuillError::Validation("Passphrase cannot be empty".into()));
    }

    let len = passphrase.chars().count();
    if len < MIN_PASSPHRASE_LEN {
        return Err(QuillError::Validation(format!(
            "Passphrase must be at least {MIN_PASSPHRASE_LEN} characters (got {len})"
        )));
    }

    Ok(())
}

/// Validate a passphrase typed in for an import.
///
/// Only emptiness is checked: a wrong passphrase of any length is
/// reported by decryption, not here.
pub fn validate_import_passphrase(passphrase: &str) -> Result<()> {
    if passphrase.is_empty() {
        return Err(QuillError::Validation("Passphrase cannot be empty".into()));
    }
    Ok(())
}
