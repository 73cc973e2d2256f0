use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{QuillError, Result};

/// Project-level configuration, loaded from `.quill.toml`.
///
/// Every field has a sensible default so Quill works out-of-the-box
/// without any config file at all.  The backup protocol constants
/// (PBKDF2 rounds, salt and nonce sizes) are deliberately not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the working directory) holding the journal.
    #[serde(default = "default_journal_dir")]
    pub journal_dir: String,

    /// Directory where exported backups are written.
    #[serde(default = "default_backup_dir")]
    pub backup_dir: String,

    /// File extension for backups (without the dot).
    #[serde(default = "default_backup_extension")]
    pub backup_extension: String,

    /// Prompt of the board created by `quill init`.
    #[serde(default = "default_prompt")]
    pub default_prompt: String,

    /// Endpoint of the entity extraction service, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extractor_url: Option<String>,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_journal_dir() -> String {
    ".quill".to_string()
}

fn default_backup_dir() -> String {
    ".".to_string()
}

fn default_backup_extension() -> String {
    "txt".to_string()
}

fn default_prompt() -> String {
    "What are you grateful for today?".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            journal_dir: default_journal_dir(),
            backup_dir: default_backup_dir(),
            backup_extension: default_backup_extension(),
            default_prompt: default_prompt(),
            extractor_url: None,
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".quill.toml";

    /// Load settings from `<project_dir>/.quill.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            QuillError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        if settings.backup_extension.is_empty() || settings.backup_extension.contains(['.', '/']) {
            return Err(QuillError::ConfigError(format!(
                "backup_extension '{}' must be a bare extension such as \"txt\"",
                settings.backup_extension
            )));
        }

        Ok(settings)
    }

    /// Full path of the journal directory.
    ///
    /// Example: `project_dir/.quill`
    pub fn journal_dir_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.journal_dir)
    }

    /// Full path of the backup output directory.
    pub fn backup_dir_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.backup_dir)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
