//! One module per `quill` subcommand.

#[cfg(feature = "audit-log")]
pub mod audit_cmd;
pub mod board;
pub mod completions;
pub mod delete;
pub mod entries;
pub mod export;
pub mod import_cmd;
pub mod init;
pub mod passphrase;
pub mod version;
pub mod write;
