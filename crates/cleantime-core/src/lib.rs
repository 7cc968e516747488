//! # cleantime Core Library
//!
//! Business logic for a recovery companion: a clean-time counter with money
//! saved, a guided breathing timer for moments of craving, a meditation
//! stopwatch and a mood/symptom journal. The `cleantime` CLI is a thin layer
//! over this crate.
//!
//! ## Architecture
//!
//! - **Timers**: pure, wall-clock-based calculations. Nothing here owns a
//!   thread; callers sample them with the current instant.
//! - **Views and ticker**: per-view state advanced once per second by a
//!   tokio schedule whose handle cancels it on drop.
//! - **Journal**: read-modify-write over a whole-document store.
//! - **Storage**: SQLite key-value slots and TOML configuration.
//!
//! ## Key Components
//!
//! - [`compute`]: clean time between two instants
//! - [`PhaseTimer`]: Inhale/Hold/Exhale cycle
//! - [`Journal`]: journal entries over a [`JournalStore`]
//! - [`mount`]: drive a [`View`] from a [`Clock`]

pub mod clock;
pub mod content;
pub mod error;
pub mod events;
pub mod journal;
pub mod sos;
pub mod storage;
pub mod ticker;
pub mod timer;
pub mod view;

pub use clock::{Clock, ManualClock, SystemClock, TokioClock};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use journal::{EntryDraft, Journal, JournalEntry, JournalStore, MemoryStore, Mood};
pub use sos::MessageRotator;
pub use storage::{Config, Database};
pub use ticker::{every, mount, Mounted, TickHandle, View};
pub use timer::{compute, BreathPhase, CleanTime, MeditationSession, PhaseTimer, SessionState};
pub use view::{HomeView, SosView};
