//! The journal data store and its mutation contract.
//!
//! `JournalStore` is the whole unit of persistence and of backup: there
//! is no partial export or merge.  Boards are appended, entries are
//! prepended (listing views rely on newest-first order), and nothing is
//! ever physically removed: deletion sets the `is_deleted` tombstone.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::model::{generate_board_id, generate_entry_id, now_millis, Board, Entities, Entry};
use crate::errors::{QuillError, Result};

/// All boards and entries of one journal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalStore {
    pub boards: Vec<Board>,
    pub entries: Vec<Entry>,
}

impl JournalStore {
    /// An empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// A journal holding a single board with `prompt`, as created on first run.
    pub fn with_default_board(prompt: &str) -> Self {
        let mut store = Self::new();
        store.create_board(prompt);
        store
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Append a new board with a fresh id and the current timestamp.
    pub fn create_board(&mut self, prompt: &str) -> &Board {
        let board = Board {
            id: generate_board_id(),
            prompt: prompt.to_string(),
            created_at: now_millis(),
            is_deleted: false,
        };
        debug!(board_id = %board.id, "created board");

        let idx = self.boards.len();
        self.boards.push(board);
        &self.boards[idx]
    }

    /// Prepend a new entry to the board `board_id`.
    ///
    /// The board must exist and not be deleted, otherwise the entry would
    /// dangle and `DanglingReference` is returned.  Content length is
    /// checked by the caller, not here.
    pub fn create_entry(
        &mut self,
        board_id: &str,
        content: &str,
        entities: Option<Entities>,
    ) -> Result<&Entry> {
        let id = generate_entry_id();

        if self.active_board(board_id).is_none() {
            return Err(QuillError::DanglingReference {
                entry_id: id,
                board_id: board_id.to_string(),
            });
        }

        let entry = Entry {
            id,
            board_id: board_id.to_string(),
            content: content.to_string(),
            timestamp: now_millis(),
            is_deleted: false,
            entities,
        };
        debug!(entry_id = %entry.id, board_id, "created entry");

        self.entries.insert(0, entry);
        Ok(&self.entries[0])
    }

    /// Mark the entry `id` as deleted.
    ///
    /// Idempotent: an unknown or already-deleted id is a no-op.  Returns
    /// whether an entry with this id exists.
    pub fn soft_delete_entry(&mut self, id: &str) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.is_deleted = true;
                debug!(entry_id = id, "soft-deleted entry");
                true
            }
            None => false,
        }
    }

    /// Mark the board `id` as deleted.  Same semantics as `soft_delete_entry`.
    ///
    /// The board's entries keep pointing at it; a tombstoned board still
    /// satisfies their reference.
    pub fn soft_delete_board(&mut self, id: &str) -> bool {
        match self.boards.iter_mut().find(|b| b.id == id) {
            Some(board) => {
                board.is_deleted = true;
                debug!(board_id = id, "soft-deleted board");
                true
            }
            None => false,
        }
    }

    /// Replace the whole journal with `new_store`.  Used only by import,
    /// after the backup has been validated.  Nothing is merged.
    pub fn replace_all(&mut self, new_store: JournalStore) {
        debug!(
            boards = new_store.boards.len(),
            entries = new_store.entries.len(),
            "replacing journal contents"
        );
        *self = new_store;
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// `true` if there are no boards and no entries.
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty() && self.entries.is_empty()
    }

    /// Look up a non-deleted board.
    pub fn active_board(&self, id: &str) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == id && !b.is_deleted)
    }

    /// Non-deleted boards in creation order.
    pub fn active_boards(&self) -> impl Iterator<Item = &Board> {
        self.boards.iter().filter(|b| !b.is_deleted)
    }

    /// Non-deleted entries, newest first.
    pub fn active_entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| !e.is_deleted)
    }

    /// Non-deleted entries of one board, newest first.
    pub fn entries_for_board<'a>(&'a self, board_id: &'a str) -> impl Iterator<Item = &'a Entry> {
        self.active_entries().filter(move |e| e.board_id == board_id)
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    /// Check that every non-deleted entry points at a board that exists
    /// (deleted or not).  Reports the first offending entry.
    pub fn validate_references(&self) -> Result<()> {
        let board_ids: HashSet<&str> = self.boards.iter().map(|b| b.id.as_str()).collect();

        match self
            .active_entries()
            .find(|e| !board_ids.contains(e.board_id.as_str()))
        {
            Some(entry) => Err(QuillError::DanglingReference {
                entry_id: entry.id.clone(),
                board_id: entry.board_id.clone(),
            }),
            None => Ok(()),
        }
    }
}
