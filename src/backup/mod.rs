//! Backup module — encrypted, portable copies of the whole journal.
//!
//! This module provides:
//! - The salt/nonce/ciphertext envelope and its base64 form (`envelope`)
//! - `seal` / `open` between a journal and backup text (`codec`)
//! - Export and import state machines and file naming (`workflow`)

pub mod codec;
pub mod envelope;
pub mod workflow;

// Re-export the most commonly used items.
pub use codec::{decrypt_backup, open, parse_payload, seal};
pub use envelope::{Envelope, ENVELOPE_VERSION, HEADER_LEN};
pub use workflow::{
    backup_file_name, BackupArtifact, ExportFlow, ExportOutcome, ExportState, ImportFlow,
    ImportState, ImportSummary,
};
