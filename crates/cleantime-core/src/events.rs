use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{BreathPhase, CleanTime};

/// Every state change in a view produces an Event.
/// The CLI prints them; tests assert on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    ViewMounted {
        view: String,
        at: DateTime<Utc>,
    },
    ViewUnmounted {
        view: String,
        at: DateTime<Utc>,
    },
    CleanTimeUpdated {
        clean_time: CleanTime,
        at: DateTime<Utc>,
    },
    BreathPhaseChanged {
        phase: BreathPhase,
        instruction: String,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    CalmingMessage {
        message: String,
        at: DateTime<Utc>,
    },
    MeditationStarted {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    MeditationPaused {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    MeditationReset {
        at: DateTime<Utc>,
    },
}
