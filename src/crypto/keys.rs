//! Key material wrapper for backup encryption.

use zeroize::Zeroize;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// A wrapper around a 32-byte backup key that automatically zeroes
/// its memory when dropped.
///
/// A `BackupKey` only lives for the duration of one export or import.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct BackupKey {
    bytes: [u8; KEY_LEN],
}

impl BackupKey {
    /// Create a new `BackupKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to build the cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for BackupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BackupKey([REDACTED])")
    }
}
