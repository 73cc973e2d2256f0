//! Journal module — boards, entries, and where they are kept.
//!
//! This module provides:
//! - `Board`, `Entry`, and `Entities` records (`model`)
//! - `JournalStore` with soft-delete and reference checks (`store`)
//! - The load/save boundary: `StoreBackend` and its backends (`persist`)

pub mod model;
pub mod persist;
pub mod store;

// Re-export the most commonly used items.
pub use model::{Board, Entities, Entry};
pub use persist::{JsonFileBackend, MemoryBackend, StoreBackend, JOURNAL_FILE};
pub use store::JournalStore;

/// Bounds on entry content length, in characters, checked where the
/// text comes in (the CLI), not by the store.
pub const MIN_CONTENT_CHARS: usize = 10;
pub const MAX_CONTENT_CHARS: usize = 3000;

/// Check that entry content is between 10 and 3000 characters.
pub fn validate_content(content: &str) -> crate::errors::Result<()> {
    let len = content.chars().count();
    if len < MIN_CONTENT_CHARS {
        return Err(crate::errors::QuillError::Validation(format!(
            "Your answer must be at least {MIN_CONTENT_CHARS} characters."
        )));
    }
    if len > MAX_CONTENT_CHARS {
        return Err(crate::errors::QuillError::Validation(format!(
            "Your answer must be at most {MAX_CONTENT_CHARS} characters."
        )));
    }
    Ok(())
}
