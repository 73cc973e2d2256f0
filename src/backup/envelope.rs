//! Binary backup envelope and its base64 text form.
//!
//! A backup file holds the base64 (standard alphabet, padded) encoding of:
//!
//! ```text
//! [salt: 16 bytes][nonce: 12 bytes][AES-256-GCM ciphertext + 16-byte tag]
//! ```
//!
//! - **Salt**: PBKDF2 salt, fresh for every export.
//! - **Nonce**: GCM nonce, fresh for every export.
//! - **Ciphertext**: the encrypted journal JSON with the tag appended.
//!
//! The layout carries no magic or version byte.  It is format version 1,
//! and the KDF and cipher parameters are implied by it; any change to
//! them needs a new, explicitly tagged layout.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::crypto::{NONCE_LEN, SALT_LEN};
use crate::errors::{QuillError, Result};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// The implicit format version of the layout above.
pub const ENVELOPE_VERSION: u8 = 1;

/// Fixed-size prefix: 16 (salt) + 12 (nonce).
pub const HEADER_LEN: usize = SALT_LEN + NONCE_LEN;

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// One encrypted backup, split into its three fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    /// Ciphertext with the GCM tag appended, treated as one opaque blob.
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Concatenate salt || nonce || ciphertext.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_LEN + self.ciphertext.len());
        buf.extend_from_slice(&self.salt); // 16 bytes
        buf.extend_from_slice(&self.nonce); // 12 bytes
        buf.extend_from_slice(&self.ciphertext);
        buf
    }

    /// Split raw envelope bytes: `[0,16)` salt, `[16,28)` nonce, the rest ciphertext.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_LEN {
            return Err(QuillError::MalformedEnvelope(format!(
                "backup is {} bytes, expected at least {HEADER_LEN}",
                data.len()
            )));
        }

        let (header, ciphertext) = data.split_at(HEADER_LEN);
        let (salt_bytes, nonce_bytes) = header.split_at(SALT_LEN);

        let salt: [u8; SALT_LEN] = salt_bytes
            .try_into()
            .map_err(|_| QuillError::MalformedEnvelope("bad salt length".into()))?;
        let nonce: [u8; NONCE_LEN] = nonce_bytes
            .try_into()
            .map_err(|_| QuillError::MalformedEnvelope("bad nonce length".into()))?;

        Ok(Self {
            salt,
            nonce,
            ciphertext: ciphertext.to_vec(),
        })
    }

    /// Transport-encode the envelope for writing to a backup file.
    pub fn encode(&self) -> String {
        BASE64.encode(self.to_bytes())
    }

    /// Decode the text of a backup file.  Surrounding whitespace (a
    /// trailing newline added by an editor) is ignored.
    pub fn decode(text: &str) -> Result<Self> {
        let raw = BASE64
            .decode(text.trim())
            .map_err(|e| QuillError::MalformedEnvelope(format!("invalid base64: {e}")))?;
        Self::from_bytes(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Envelope {
        Envelope {
            salt: [1u8; SALT_LEN],
            nonce: [2u8; NONCE_LEN],
            ciphertext: vec![3u8; 20],
        }
    }

    #[test]
    fn layout_is_salt_nonce_ciphertext() {
        let bytes = sample().to_bytes();
        assert_eq!(bytes.len(), HEADER_LEN + 20);
        assert!(bytes[..16].iter().all(|&b| b == 1));
        assert!(bytes[16..28].iter().all(|&b| b == 2));
        assert!(bytes[28..].iter().all(|&b| b == 3));
    }

    #[test]
    fn decode_reverses_encode() {
        let env = sample();
        assert_eq!(Envelope::decode(&env.encode()).unwrap(), env);
    }

    #[test]
    fn decode_tolerates_trailing_newline() {
        let env = sample();
        let text = format!("{}\n", env.encode());
        assert_eq!(Envelope::decode(&text).unwrap(), env);
    }

    #[test]
    fn invalid_base64_is_malformed() {
        assert!(matches!(
            Envelope::decode("not-base64!!"),
            Err(QuillError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn undersized_envelope_is_malformed() {
        let short = BASE64.encode([0u8; HEADER_LEN - 1]);
        assert!(matches!(
            Envelope::decode(&short),
            Err(QuillError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn header_only_envelope_splits_with_empty_ciphertext() {
        let env = Envelope::from_bytes(&[9u8; HEADER_LEN]).unwrap();
        assert!(env.ciphertext.is_empty());
    }
}
