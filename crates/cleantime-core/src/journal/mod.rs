//! Mood and symptom journal.
//!
//! Entries live in a single key-value slot as one JSON list, newest first.
//! [`Journal`] owns id generation, ordering and the read-modify-write cycle;
//! a [`JournalStore`] only loads and replaces the whole list.
//!
//! ```rust,ignore
//! let db = Database::open()?;
//! let mut journal = Journal::open(&db)?;
//! journal.add(EntryDraft::new("Rough morning", Mood::Bad).with_symptoms(["חרדה"]), &Local::now())?;
//! ```

mod book;
mod entry;
mod store;

pub use book::Journal;
pub use entry::{EntryDraft, JournalEntry, Mood, SYMPTOMS};
pub use store::{JournalStore, MemoryStore, JOURNAL_KEY};
pub(crate) use store::{decode_entries, encode_entries};
