//! Whole-document journal persistence.
//!
//! A store holds the complete entry list in one slot. There are no partial
//! updates: every write replaces the whole list.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::error::StorageError;

use super::entry::JournalEntry;

/// Key of the slot holding the serialized entry list.
pub const JOURNAL_KEY: &str = "journal_entries";

pub trait JournalStore {
    /// The persisted list, newest first. An empty slot is an empty list.
    fn load(&self) -> Result<Vec<JournalEntry>, StorageError>;

    /// Replace the persisted list with `entries`.
    fn save_all(&self, entries: &[JournalEntry]) -> Result<(), StorageError>;
}

impl<S: JournalStore + ?Sized> JournalStore for &S {
    fn load(&self) -> Result<Vec<JournalEntry>, StorageError> {
        (**self).load()
    }

    fn save_all(&self, entries: &[JournalEntry]) -> Result<(), StorageError> {
        (**self).save_all(entries)
    }
}

pub(crate) fn decode_entries(raw: Option<&str>) -> Result<Vec<JournalEntry>, StorageError> {
    match raw {
        None => Ok(Vec::new()),
        Some(json) => {
            serde_json::from_str(json).map_err(|e| StorageError::Unavailable(e.to_string()))
        }
    }
}

pub(crate) fn encode_entries(entries: &[JournalEntry]) -> Result<String, StorageError> {
    serde_json::to_string(entries).map_err(|e| StorageError::WriteFailed(e.to_string()))
}

/// In-process store, with switches to simulate device storage failures.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with raw slot contents.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
            ..Self::default()
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl JournalStore for MemoryStore {
    fn load(&self) -> Result<Vec<JournalEntry>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("simulated read failure".into()));
        }
        let slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        decode_entries(slot.as_deref())
    }

    fn save_all(&self, entries: &[JournalEntry]) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::WriteFailed("simulated write failure".into()));
        }
        let json = encode_entries(entries)?;
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(json);
        Ok(())
    }
}
