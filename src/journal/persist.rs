//! Loading and saving the journal.
//!
//! This is the one place the journal touches storage.  Everything else
//! works on a `JournalStore` value passed by reference.
//!
//! The file backend keeps the journal as plain JSON
//! (`{"boards": [...], "entries": [...]}`) at `<journal_dir>/journal.json`,
//! written atomically via temp file + rename.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::store::JournalStore;
use crate::errors::{QuillError, Result};

/// File name of the journal inside the journal directory.
pub const JOURNAL_FILE: &str = "journal.json";

/// A place a journal can be loaded from and saved to.
pub trait StoreBackend {
    /// Load the journal.  A backend with nothing saved yet returns
    /// `JournalNotFound`.
    fn load(&self) -> Result<JournalStore>;

    /// Persist the whole journal, replacing what was there.
    fn save(&self, store: &JournalStore) -> Result<()>;
}

/// JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend for `<journal_dir>/journal.json`.
    pub fn in_dir(journal_dir: &Path) -> Self {
        Self::new(journal_dir.join(JOURNAL_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create a new journal file holding `store`.  Fails if one exists.
    pub fn create(&self, store: &JournalStore) -> Result<()> {
        if self.exists() {
            return Err(QuillError::JournalAlreadyExists(self.path.clone()));
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        self.save(store)
    }
}

impl StoreBackend for JsonFileBackend {
    fn load(&self) -> Result<JournalStore> {
        if !self.path.exists() {
            return Err(QuillError::JournalNotFound(self.path.clone()));
        }

        let data = fs::read(&self.path)?;
        let store: JournalStore = serde_json::from_slice(&data)
            .map_err(|e| QuillError::InvalidJournalFile(format!("{}: {e}", self.path.display())))?;
        store
            .validate_references()
            .map_err(|e| QuillError::InvalidJournalFile(format!("{}: {e}", self.path.display())))?;

        debug!(
            path = %self.path.display(),
            boards = store.boards.len(),
            entries = store.entries.len(),
            "loaded journal"
        );
        Ok(store)
    }

    /// Write the journal atomically: temp file in the same directory,
    /// then rename over the target so readers never see a half-written file.
    fn save(&self, store: &JournalStore) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(store)
            .map_err(|e| QuillError::SerializationError(format!("journal: {e}")))?;

        let parent = self.path.parent().unwrap_or(Path::new("."));
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ));

        fs::write(&tmp_path, &bytes)?;

        // Journal text is private; owner-only on Unix.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp_path, &self.path)?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "saved journal");
        Ok(())
    }
}

/// In-memory backend, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slot: RefCell<Option<JournalStore>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: JournalStore) -> Self {
        Self {
            slot: RefCell::new(Some(store)),
        }
    }
}

impl StoreBackend for MemoryBackend {
    fn load(&self) -> Result<JournalStore> {
        self.slot
            .borrow()
            .clone()
            .ok_or_else(|| QuillError::JournalNotFound(PathBuf::from("<memory>")))
    }

    fn save(&self, store: &JournalStore) -> Result<()> {
        *self.slot.borrow_mut() = Some(store.clone());
        Ok(())
    }
}
