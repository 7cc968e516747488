//! Read-modify-write journal over a [`JournalStore`].
//!
//! The journal keeps the last loaded snapshot in memory. Each mutation builds
//! the complete new list from that snapshot, hands it to `save_all`, and only
//! adopts it once the write succeeded. A single active editor is assumed.

use chrono::{DateTime, TimeZone};
use tracing::{debug, info, warn};

use crate::error::{Result, StorageError, ValidationError};

use super::entry::{EntryDraft, JournalEntry};
use super::store::JournalStore;

pub struct Journal<S> {
    store: S,
    entries: Vec<JournalEntry>,
}

impl<S: JournalStore> Journal<S> {
    /// A journal with an empty snapshot. Call [`Journal::reload`] to read the
    /// store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            entries: Vec::new(),
        }
    }

    /// Open and load in one step.
    pub fn open(store: S) -> Result<Self, StorageError> {
        let mut journal = Self::new(store);
        journal.reload()?;
        Ok(journal)
    }

    /// Replace the snapshot with the store's contents. On failure the
    /// snapshot is left empty.
    pub fn reload(&mut self) -> Result<(), StorageError> {
        match self.store.load() {
            Ok(entries) => {
                debug!(count = entries.len(), "journal loaded");
                self.entries = entries;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "journal could not be loaded");
                self.entries.clear();
                Err(e)
            }
        }
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Save from the editor: updates `editing` when it names an existing
    /// entry, otherwise creates a new one.
    pub fn save<Tz: TimeZone>(
        &mut self,
        editing: Option<&str>,
        draft: EntryDraft,
        now: &DateTime<Tz>,
    ) -> Result<&JournalEntry> {
        match editing {
            Some(id) if self.get(id).is_some() => self.edit(id, draft),
            _ => self.add(draft, now),
        }
    }

    /// Create an entry at the top of the list.
    ///
    /// The id is the creation time in epoch milliseconds, bumped past any id
    /// already taken; the date is `now`'s calendar date in its own timezone.
    pub fn add<Tz: TimeZone>(&mut self, draft: EntryDraft, now: &DateTime<Tz>) -> Result<&JournalEntry> {
        let draft = draft.validate()?;
        let entry = JournalEntry {
            id: self.next_id(now.timestamp_millis()),
            date: now.date_naive(),
            content: draft.content,
            mood: draft.mood,
            symptoms: draft.symptoms,
        };

        let mut next = Vec::with_capacity(self.entries.len() + 1);
        next.push(entry);
        next.extend(self.entries.iter().cloned());
        self.commit(next)?;

        info!(id = %self.entries[0].id, "journal entry added");
        Ok(&self.entries[0])
    }

    /// Replace content, mood and symptoms of entry `id` in place. Id, date and
    /// position are kept.
    pub fn edit(&mut self, id: &str, draft: EntryDraft) -> Result<&JournalEntry> {
        let draft = draft.validate()?;
        let index = self.position(id)?;

        let mut next = self.entries.clone();
        let entry = &mut next[index];
        entry.content = draft.content;
        entry.mood = draft.mood;
        entry.symptoms = draft.symptoms;
        self.commit(next)?;

        info!(id, "journal entry edited");
        Ok(&self.entries[index])
    }

    /// Remove entry `id`, keeping the order of the rest.
    pub fn delete(&mut self, id: &str) -> Result<JournalEntry> {
        let index = self.position(id)?;
        let removed = self.entries[index].clone();

        let next = self
            .entries
            .iter()
            .filter(|e| e.id != id)
            .cloned()
            .collect();
        self.commit(next)?;

        info!(id, "journal entry deleted");
        Ok(removed)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn position(&self, id: &str) -> Result<usize, ValidationError> {
        self.entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| ValidationError::UnknownEntry(id.to_string()))
    }

    fn next_id(&self, mut millis: i64) -> String {
        while self.get(&millis.to_string()).is_some() {
            millis += 1;
        }
        millis.to_string()
    }

    fn commit(&mut self, next: Vec<JournalEntry>) -> Result<(), StorageError> {
        if let Err(e) = self.store.save_all(&next) {
            warn!(error = %e, "journal write failed, keeping previous snapshot");
            return Err(e);
        }
        self.entries = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::journal::{MemoryStore, Mood};
    use chrono::{Duration, NaiveDate, Utc};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 21, 15, 0).unwrap()
    }

    fn seeded(store: &MemoryStore) -> Journal<&MemoryStore> {
        let mut journal = Journal::open(store).unwrap();
        for (i, text) in ["first", "second", "third"].iter().enumerate() {
            journal
                .add(EntryDraft::new(*text, Mood::Neutral), &(t0() + Duration::minutes(i as i64)))
                .unwrap();
        }
        journal
    }

    #[test]
    fn first_entry_lands_at_index_zero() {
        let store = MemoryStore::new();
        let mut journal = Journal::open(&store).unwrap();
        journal
            .add(EntryDraft::new("test", Mood::Good).with_symptoms(["חרדה"]), &t0())
            .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].content, "test");
        assert_eq!(loaded[0].mood, Mood::Good);
        assert_eq!(loaded[0].symptoms, vec!["חרדה".to_string()]);
        assert_eq!(loaded[0].id, t0().timestamp_millis().to_string());
        assert_eq!(loaded[0].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn newest_first() {
        let store = MemoryStore::new();
        let journal = seeded(&store);
        let contents: Vec<_> = journal.entries().iter().map(|e| e.content.as_str()).collect();
        assert_eq!(contents, vec!["third", "second", "first"]);
    }

    #[test]
    fn ids_stay_unique_within_one_millisecond() {
        let store = MemoryStore::new();
        let mut journal = Journal::open(&store).unwrap();
        let a = journal.add(EntryDraft::new("a", Mood::Bad), &t0()).unwrap().id.clone();
        let b = journal.add(EntryDraft::new("b", Mood::Bad), &t0()).unwrap().id.clone();
        assert_ne!(a, b);
        assert_eq!(b, (t0().timestamp_millis() + 1).to_string());
    }

    #[test]
    fn edit_keeps_identity_and_position() {
        let store = MemoryStore::new();
        let mut journal = seeded(&store);
        let before = journal.entries()[1].clone();

        journal
            .edit(
                &before.id,
                EntryDraft::new("rewritten", Mood::Great).with_symptoms(["הזעה"]),
            )
            .unwrap();

        let after = store.load().unwrap();
        assert_eq!(after.len(), 3);
        assert_eq!(after[1].id, before.id);
        assert_eq!(after[1].date, before.date);
        assert_eq!(after[1].content, "rewritten");
        assert_eq!(after[1].mood, Mood::Great);
        assert_eq!(after[1].symptoms, vec!["הזעה".to_string()]);
    }

    #[test]
    fn save_routes_to_edit_or_add() {
        let store = MemoryStore::new();
        let mut journal = seeded(&store);
        let id = journal.entries()[2].id.clone();

        journal
            .save(Some(&id), EntryDraft::new("edited", Mood::Bad), &t0())
            .unwrap();
        assert_eq!(journal.entries().len(), 3);
        assert_eq!(journal.entries()[2].content, "edited");

        journal
            .save(Some("no-such-id"), EntryDraft::new("fresh", Mood::Bad), &(t0() + Duration::hours(1)))
            .unwrap();
        assert_eq!(journal.entries().len(), 4);
        assert_eq!(journal.entries()[0].content, "fresh");
    }

    #[test]
    fn delete_removes_exactly_one() {
        let store = MemoryStore::new();
        let mut journal = seeded(&store);
        let ids: Vec<String> = journal.entries().iter().map(|e| e.id.clone()).collect();

        let removed = journal.delete(&ids[1]).unwrap();
        assert_eq!(removed.content, "second");

        let remaining: Vec<String> = store.load().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(remaining, vec![ids[0].clone(), ids[2].clone()]);
    }

    #[test]
    fn empty_content_mutates_nothing() {
        let store = MemoryStore::new();
        let mut journal = seeded(&store);
        let raw_before = store.raw();

        let err = journal.add(EntryDraft::new("  ", Mood::Good), &t0()).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ValidationError::EmptyContent)));
        assert_eq!(journal.entries().len(), 3);
        assert_eq!(store.raw(), raw_before);
    }

    #[test]
    fn unknown_id_is_rejected() {
        let store = MemoryStore::new();
        let mut journal = seeded(&store);
        assert!(matches!(
            journal.delete("missing"),
            Err(CoreError::Validation(ValidationError::UnknownEntry(_)))
        ));
    }

    #[test]
    fn failed_write_keeps_snapshot() {
        let store = MemoryStore::new();
        let mut journal = seeded(&store);
        store.set_fail_writes(true);

        let id = journal.entries()[0].id.clone();
        let err = journal.delete(&id).unwrap_err();
        assert!(matches!(err, CoreError::Storage(StorageError::WriteFailed(_))));
        assert_eq!(journal.entries().len(), 3);
    }

    #[test]
    fn failed_read_leaves_list_empty() {
        let store = MemoryStore::new();
        let mut journal = seeded(&store);
        store.set_fail_reads(true);

        assert!(matches!(journal.reload(), Err(StorageError::Unavailable(_))));
        assert!(journal.entries().is_empty());
    }
}
