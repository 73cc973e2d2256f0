//! Sealing a journal into backup text, and opening it again.
//!
//! Export: journal JSON -> PBKDF2 key (fresh salt) -> AES-256-GCM
//! (fresh nonce) -> envelope -> base64.
//!
//! Import runs the same steps backwards in two phases, so callers can
//! tell the failure kinds apart:
//! 1. `decrypt_backup`: `MalformedEnvelope` or `AuthenticationFailure`.
//! 2. `parse_payload`: `MalformedPayload` or `DanglingReference`.

use serde_json::Value;
use tracing::debug;
use zeroize::Zeroizing;

use super::envelope::Envelope;
use crate::crypto::{
    decrypt, derive_backup_key, encrypt, generate_nonce, generate_salt,
    validate_export_passphrase, validate_import_passphrase,
};
use crate::errors::{QuillError, Result};
use crate::journal::JournalStore;

/// Encrypt the whole journal under `passphrase` and return the backup text.
///
/// Each call draws a new salt and nonce, so sealing the same journal
/// twice never yields the same output.
pub fn seal(store: &JournalStore, passphrase: &str) -> Result<String> {
    validate_export_passphrase(passphrase)?;

    let plaintext = Zeroizing::new(
        serde_json::to_vec(store)
            .map_err(|e| QuillError::SerializationError(format!("journal: {e}")))?,
    );

    let salt = generate_salt();
    let nonce = generate_nonce();
    let key = derive_backup_key(passphrase.as_bytes(), &salt)?;
    let ciphertext = encrypt(&key, &nonce, &plaintext)?;

    let envelope = Envelope {
        salt,
        nonce,
        ciphertext,
    };
    debug!(
        plaintext_len = plaintext.len(),
        envelope_len = envelope.ciphertext.len() + super::envelope::HEADER_LEN,
        "sealed backup"
    );

    Ok(envelope.encode())
}

/// Decode and decrypt backup text, returning the raw payload bytes.
pub fn decrypt_backup(text: &str, passphrase: &str) -> Result<Zeroizing<Vec<u8>>> {
    validate_import_passphrase(passphrase)?;

    let envelope = Envelope::decode(text)?;
    let key = derive_backup_key(passphrase.as_bytes(), &envelope.salt)?;
    let plaintext = decrypt(&key, &envelope.nonce, &envelope.ciphertext)?;

    debug!(plaintext_len = plaintext.len(), "decrypted backup");
    Ok(Zeroizing::new(plaintext))
}

/// Turn decrypted bytes into a journal, or explain why they are not one.
///
/// The payload must be a JSON object with both `boards` and `entries`
/// (either may be empty), the records must have the journal's shape, and
/// no live entry may point at a missing board.  A dangling reference
/// rejects the whole backup rather than dropping entries.
pub fn parse_payload(bytes: &[u8]) -> Result<JournalStore> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| QuillError::MalformedPayload(format!("not JSON: {e}")))?;

    let object = value
        .as_object()
        .ok_or_else(|| QuillError::MalformedPayload("expected a JSON object".into()))?;
    for field in ["boards", "entries"] {
        if !object.contains_key(field) {
            return Err(QuillError::MalformedPayload(format!(
                "missing `{field}` field"
            )));
        }
    }

    let store: JournalStore = serde_json::from_value(value)
        .map_err(|e| QuillError::MalformedPayload(format!("unexpected record shape: {e}")))?;

    store.validate_references()?;
    Ok(store)
}

/// `decrypt_backup` followed by `parse_payload`.
pub fn open(text: &str, passphrase: &str) -> Result<JournalStore> {
    let plaintext = decrypt_backup(text, passphrase)?;
    parse_payload(&plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_must_be_an_object() {
        assert!(matches!(
            parse_payload(b"[1,2,3]"),
            Err(QuillError::MalformedPayload(_))
        ));
        assert!(matches!(
            parse_payload(b"\x00\x01garbage"),
            Err(QuillError::MalformedPayload(_))
        ));
    }

    #[test]
    fn payload_needs_both_fields() {
        assert!(matches!(
            parse_payload(br#"{"foo":1}"#),
            Err(QuillError::MalformedPayload(_))
        ));
        assert!(matches!(
            parse_payload(br#"{"boards":[]}"#),
            Err(QuillError::MalformedPayload(_))
        ));
        assert!(matches!(
            parse_payload(br#"{"entries":[]}"#),
            Err(QuillError::MalformedPayload(_))
        ));
    }

    #[test]
    fn empty_collections_are_accepted() {
        let store = parse_payload(br#"{"boards":[],"entries":[]}"#).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn wrong_record_shape_is_malformed() {
        assert!(matches!(
            parse_payload(br#"{"boards":[{"id":1}],"entries":[]}"#),
            Err(QuillError::MalformedPayload(_))
        ));
    }

    #[test]
    fn dangling_entry_rejects_payload() {
        let json = br#"{
            "boards": [],
            "entries": [{
                "id": "entry_1", "boardId": "board_gone", "content": "lost words here",
                "timestamp": 1, "isDeleted": false
            }]
        }"#;
        assert!(matches!(
            parse_payload(json),
            Err(QuillError::DanglingReference { .. })
        ));
    }

    #[test]
    fn seal_rejects_short_passphrase_before_crypto() {
        let store = JournalStore::with_default_board("Gratitude");
        assert!(matches!(
            seal(&store, "abcd"),
            Err(QuillError::Validation(_))
        ));
    }

    #[test]
    fn open_rejects_empty_passphrase() {
        assert!(matches!(open("AAAA", ""), Err(QuillError::Validation(_))));
    }
}
