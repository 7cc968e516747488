//! Guided breathing phase timer.
//!
//! A cyclic state machine with no terminal state:
//!
//! ```text
//! Inhale (4s) -> Hold (4s) -> Exhale (6s) -> Inhale ...
//! ```
//!
//! Two ways to drive it:
//!
//! - [`PhaseTimer::tick`] counts one second down per call, the way a plain
//!   interval callback would. Delayed or coalesced ticks make it fall behind.
//! - [`PhaseTimer::sync`] recomputes phase and remaining time from the instant
//!   the current phase was entered, carrying any overshoot into the following
//!   phases. This is what the SOS view uses.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_SCALE: f64 = 1.0;
pub const MAX_SCALE: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
}

impl BreathPhase {
    pub fn duration_secs(self) -> u64 {
        match self {
            BreathPhase::Inhale => 4,
            BreathPhase::Hold => 4,
            BreathPhase::Exhale => 6,
        }
    }

    pub fn duration_ms(self) -> i64 {
        self.duration_secs() as i64 * 1000
    }

    pub fn next(self) -> Self {
        match self {
            BreathPhase::Inhale => BreathPhase::Hold,
            BreathPhase::Hold => BreathPhase::Exhale,
            BreathPhase::Exhale => BreathPhase::Inhale,
        }
    }

    /// Prompt shown to the user during this phase.
    pub fn instruction(self) -> &'static str {
        match self {
            BreathPhase::Inhale => "נשום פנימה...",
            BreathPhase::Hold => "החזק...",
            BreathPhase::Exhale => "נשוף החוצה...",
        }
    }

    /// Breathing-circle scale `elapsed_ms` into this phase.
    ///
    /// Inhale grows 1.0 -> 1.5 over its 4s, Hold stays at 1.5, Exhale shrinks
    /// 1.5 -> 1.0 over its 6s. Linear and clamped at both ends.
    pub fn scale_at(self, elapsed_ms: i64) -> f64 {
        let progress = (elapsed_ms.max(0) as f64 / self.duration_ms() as f64).min(1.0);
        match self {
            BreathPhase::Inhale => MIN_SCALE + (MAX_SCALE - MIN_SCALE) * progress,
            BreathPhase::Hold => MAX_SCALE,
            BreathPhase::Exhale => MAX_SCALE - (MAX_SCALE - MIN_SCALE) * progress,
        }
    }
}

/// Length of one Inhale/Hold/Exhale cycle in milliseconds.
pub fn cycle_ms() -> i64 {
    BreathPhase::Inhale.duration_ms() + BreathPhase::Hold.duration_ms() + BreathPhase::Exhale.duration_ms()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseTimer {
    phase: BreathPhase,
    remaining_secs: u64,
    /// When the current phase began. Only set once the timer is bound to a
    /// clock through [`PhaseTimer::start_at`] or [`PhaseTimer::sync`].
    #[serde(default)]
    phase_entered_at: Option<DateTime<Utc>>,
    active: bool,
}

impl Default for PhaseTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseTimer {
    /// A running timer at Inhale with the full 4 seconds left.
    pub fn new() -> Self {
        Self {
            phase: BreathPhase::Inhale,
            remaining_secs: BreathPhase::Inhale.duration_secs(),
            phase_entered_at: None,
            active: true,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> BreathPhase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn phase_entered_at(&self) -> Option<DateTime<Utc>> {
        self.phase_entered_at
    }

    /// Circle scale at `now`. Falls back to whole-second resolution when the
    /// timer is not bound to a clock.
    pub fn scale(&self, now: DateTime<Utc>) -> f64 {
        let elapsed_ms = match self.phase_entered_at {
            Some(entered) => (now - entered).num_milliseconds(),
            None => (self.phase.duration_secs() - self.remaining_secs) as i64 * 1000,
        };
        self.phase.scale_at(elapsed_ms)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start fresh at Inhale/4, anchored at `now`.
    pub fn start_at(&mut self, now: DateTime<Utc>) {
        *self = Self::new();
        self.phase_entered_at = Some(now);
    }

    /// Halt the timer. Later `tick`/`sync` calls change nothing until
    /// [`PhaseTimer::start_at`] is called again.
    pub fn stop(&mut self) {
        self.active = false;
        self.phase_entered_at = None;
    }

    /// Count one second down. Returns the new phase when this tick finished
    /// the current one.
    pub fn tick(&mut self) -> Option<BreathPhase> {
        if !self.active {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            let finished = self.phase;
            self.enter(finished.next());
            if let Some(entered) = self.phase_entered_at {
                self.phase_entered_at = Some(entered + Duration::milliseconds(finished.duration_ms()));
            }
            return Some(self.phase);
        }
        None
    }

    /// Bring phase and remaining time up to `now` from absolute time.
    ///
    /// Returns the phase the timer ended up in when at least one transition
    /// happened. An unanchored timer is anchored at `now` instead.
    pub fn sync(&mut self, now: DateTime<Utc>) -> Option<BreathPhase> {
        if !self.active {
            return None;
        }
        let Some(mut entered) = self.phase_entered_at else {
            self.phase_entered_at = Some(now);
            return None;
        };

        let mut elapsed = (now - entered).num_milliseconds().max(0);
        let mut transitioned = false;

        // Skip whole cycles at once after long stalls.
        let cycle = cycle_ms();
        if elapsed >= cycle {
            let skipped = elapsed / cycle;
            entered += Duration::milliseconds(skipped * cycle);
            elapsed -= skipped * cycle;
            transitioned = true;
        }

        while elapsed >= self.phase.duration_ms() {
            elapsed -= self.phase.duration_ms();
            entered += Duration::milliseconds(self.phase.duration_ms());
            self.phase = self.phase.next();
            transitioned = true;
        }

        self.phase_entered_at = Some(entered);
        self.remaining_secs = self.phase.duration_secs() - (elapsed / 1000) as u64;
        transitioned.then_some(self.phase)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn enter(&mut self, phase: BreathPhase) {
        self.phase = phase;
        self.remaining_secs = phase.duration_secs();
    }
}
