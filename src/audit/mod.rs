//! Audit log — SQLite-based operation history.
//!
//! Stores a record of every journal operation (write, delete, export,
//! import, ...) in a local SQLite database at `<journal_dir>/audit.db`.
//! Records hold ids and counts only, never entry text or passphrases.
//!
//! If the database can't be opened or written to, operations silently
//! continue without logging.  Behind the `audit-log` feature (on by default).

use std::path::{Path, PathBuf};

#[cfg(feature = "audit-log")]
use chrono::{DateTime, Utc};
#[cfg(feature = "audit-log")]
use rusqlite::Connection;

#[cfg(feature = "audit-log")]
use crate::errors::{QuillError, Result};

/// A single audit log entry.
#[cfg(feature = "audit-log")]
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub operation: String,
    /// Board or entry id the operation acted on, if any.
    pub target: Option<String>,
    pub details: Option<String>,
}

/// SQLite-backed audit log.
#[cfg(feature = "audit-log")]
pub struct AuditLog {
    conn: Connection,
}

#[cfg(feature = "audit-log")]
impl AuditLog {
    /// Open (or create) the audit database at `<journal_dir>/audit.db`.
    ///
    /// Returns `None` if the database can't be opened; callers should
    /// treat this as "audit logging unavailable" and continue normally.
    pub fn open(journal_dir: &Path) -> Option<Self> {
        let db_path = db_path(journal_dir);
        let conn = Connection::open(&db_path).ok()?;

        // Set restrictive permissions on the audit database (owner-only).
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(&db_path, perms);
        }

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS audit_log (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp   TEXT NOT NULL,
                operation   TEXT NOT NULL,
                target      TEXT,
                details     TEXT
            );",
        )
        .ok()?;

        Some(Self { conn })
    }

    /// Record an operation. Errors are ignored.
    pub fn log(&self, operation: &str, target: Option<&str>, details: Option<&str>) {
        let now = Utc::now().to_rfc3339();
        let _ = self.conn.execute(
            "INSERT INTO audit_log (timestamp, operation, target, details)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![now, operation, target, details],
        );
    }

    /// Query recent audit entries.
    ///
    /// - `limit`: maximum number of entries to return (most recent first).
    /// - `since`: if provided, only return entries newer than this timestamp.
    pub fn query(&self, limit: usize, since: Option<DateTime<Utc>>) -> Result<Vec<AuditEntry>> {
        let limit_i64 = i64::try_from(limit).unwrap_or(i64::MAX);
        let since_str = since.map(|ts| ts.to_rfc3339());

        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, timestamp, operation, target, details
                 FROM audit_log
                 WHERE ?1 IS NULL OR timestamp >= ?1
                 ORDER BY id DESC
                 LIMIT ?2",
            )
            .map_err(|e| QuillError::AuditError(format!("query prepare: {e}")))?;

        let rows = stmt
            .query_map(rusqlite::params![since_str, limit_i64], |row| {
                let ts_str: String = row.get(1)?;
                let timestamp = DateTime::parse_from_rfc3339(&ts_str)
                    .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

                Ok(AuditEntry {
                    id: row.get(0)?,
                    timestamp,
                    operation: row.get(2)?,
                    target: row.get(3)?,
                    details: row.get(4)?,
                })
            })
            .map_err(|e| QuillError::AuditError(format!("query exec: {e}")))?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(|e| QuillError::AuditError(format!("row parse: {e}")))?);
        }

        Ok(entries)
    }
}

/// Convenience helper: log an audit event in `journal_dir`.
///
/// Opens the audit database, logs the event, and silently ignores any errors.
/// Never fails the calling command.
pub fn log_audit(journal_dir: &Path, op: &str, target: Option<&str>, details: Option<&str>) {
    #[cfg(feature = "audit-log")]
    if let Some(audit) = AuditLog::open(journal_dir) {
        audit.log(op, target, details);
    }

    #[cfg(not(feature = "audit-log"))]
    let _ = (journal_dir, op, target, details);
}

/// Return the path to the audit database (for testing/display).
pub fn db_path(journal_dir: &Path) -> PathBuf {
    journal_dir.join("audit.db")
}
