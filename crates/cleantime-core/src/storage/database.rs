//! SQLite-backed key-value storage.
//!
//! A single `kv` table holds whole serialized documents: the journal entry
//! list and the meditation stopwatch state.

use std::path::Path;

use rusqlite::{params, Connection};
use tracing::debug;

use crate::error::StorageError;
use crate::journal::{decode_entries, encode_entries, JournalEntry, JournalStore, JOURNAL_KEY};
use crate::timer::MeditationSession;

use super::data_dir;

/// Key of the slot holding the serialized meditation stopwatch.
pub const MEDITATION_KEY: &str = "meditation_session";

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/cleantime.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let dir = data_dir().map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Self::open_at(dir.join("cleantime.db"))
    }

    /// Open (or create) the database file at `path`.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let conn = Connection::open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "database opened");
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(indoc::indoc! {"
            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
        "})?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a key. Missing keys are fine.
    pub fn kv_delete(&self, key: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// The persisted stopwatch, or a fresh one when nothing is stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the slot holds something that
    /// does not decode, so the caller never overwrites it with a fresh session.
    pub fn load_meditation(&self) -> Result<MeditationSession, StorageError> {
        match self.kv_get(MEDITATION_KEY)? {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| StorageError::Unavailable(format!("{MEDITATION_KEY}: {e}"))),
            None => Ok(MeditationSession::default()),
        }
    }

    pub fn save_meditation(&self, session: &MeditationSession) -> Result<(), StorageError> {
        let json = serde_json::to_string(session).map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        self.kv_set(MEDITATION_KEY, &json)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))
    }
}

impl JournalStore for Database {
    fn load(&self) -> Result<Vec<JournalEntry>, StorageError> {
        let raw = self.kv_get(JOURNAL_KEY)?;
        decode_entries(raw.as_deref())
    }

    fn save_all(&self, entries: &[JournalEntry]) -> Result<(), StorageError> {
        let json = encode_entries(entries)?;
        self.kv_set(JOURNAL_KEY, &json)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))
    }
}
