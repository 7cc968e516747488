//! Meditation stopwatch.
//!
//! Counts up while running. Like the breathing timer it has no internal
//! thread: elapsed time is derived from wall-clock deltas whenever it is read.
//!
//! ```text
//! Idle -> Running <-> Paused
//!   ^________reset________|
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeditationSession {
    state: SessionState,
    /// Time banked by earlier running stretches.
    accumulated_ms: u64,
    /// Start of the current running stretch.
    #[serde(default)]
    running_since: Option<DateTime<Utc>>,
}

impl Default for MeditationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl MeditationSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            accumulated_ms: 0,
            running_since: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn elapsed_ms(&self, now: DateTime<Utc>) -> u64 {
        let running = self
            .running_since
            .map(|since| (now - since).num_milliseconds().max(0) as u64)
            .unwrap_or(0);
        self.accumulated_ms + running
    }

    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> u64 {
        self.elapsed_ms(now) / 1000
    }

    /// `mm:ss` display of the elapsed time.
    pub fn display(&self, now: DateTime<Utc>) -> String {
        format_mm_ss(self.elapsed_secs(now))
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self, now: DateTime<Utc>) -> Option<Event> {
        match self.state {
            SessionState::Idle | SessionState::Paused => {
                self.state = SessionState::Running;
                self.running_since = Some(now);
                Some(Event::MeditationStarted {
                    elapsed_secs: self.elapsed_secs(now),
                    at: now,
                })
            }
            SessionState::Running => None,
        }
    }

    pub fn pause(&mut self, now: DateTime<Utc>) -> Option<Event> {
        match self.state {
            SessionState::Running => {
                self.accumulated_ms = self.elapsed_ms(now);
                self.running_since = None;
                self.state = SessionState::Paused;
                Some(Event::MeditationPaused {
                    elapsed_secs: self.elapsed_secs(now),
                    at: now,
                })
            }
            _ => None,
        }
    }

    /// Start when stopped, pause when running.
    pub fn toggle(&mut self, now: DateTime<Utc>) -> Option<Event> {
        match self.state {
            SessionState::Running => self.pause(now),
            _ => self.start(now),
        }
    }

    /// Back to Idle at 00:00. Nothing happens while no time has elapsed.
    pub fn reset(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if self.elapsed_secs(now) == 0 && self.state != SessionState::Running {
            return None;
        }
        *self = Self::new();
        Some(Event::MeditationReset { at: now })
    }
}

/// Format whole seconds as zero-padded `mm:ss`. Minutes are not capped.
pub fn format_mm_ss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 2, 7, 0, 0).unwrap()
    }

    #[test]
    fn start_pause_resume() {
        let mut session = MeditationSession::new();
        assert_eq!(session.state(), SessionState::Idle);

        assert!(session.start(t0()).is_some());
        assert_eq!(session.state(), SessionState::Running);
        assert!(session.start(t0()).is_none());

        assert!(session.pause(t0() + Duration::seconds(65)).is_some());
        assert_eq!(session.state(), SessionState::Paused);
        assert_eq!(session.elapsed_secs(t0() + Duration::hours(1)), 65);

        assert!(session.start(t0() + Duration::seconds(100)).is_some());
        assert_eq!(session.elapsed_secs(t0() + Duration::seconds(110)), 75);
        assert_eq!(session.display(t0() + Duration::seconds(110)), "01:15");
    }

    #[test]
    fn toggle_alternates() {
        let mut session = MeditationSession::new();
        session.toggle(t0());
        assert_eq!(session.state(), SessionState::Running);
        session.toggle(t0() + Duration::seconds(3));
        assert_eq!(session.state(), SessionState::Paused);
    }

    #[test]
    fn reset_goes_to_beginning() {
        let mut session = MeditationSession::new();
        assert!(session.reset(t0()).is_none());

        session.start(t0());
        session.pause(t0() + Duration::seconds(30));
        match session.reset(t0() + Duration::seconds(31)) {
            Some(Event::MeditationReset { .. }) => {}
            other => panic!("Expected MeditationReset, got {other:?}"),
        }
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.elapsed_secs(t0() + Duration::seconds(60)), 0);
    }

    #[test]
    fn survives_serialization_while_running() {
        let mut session = MeditationSession::new();
        session.start(t0());
        let json = serde_json::to_string(&session).unwrap();
        let restored: MeditationSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.state(), SessionState::Running);
        assert_eq!(restored.elapsed_secs(t0() + Duration::seconds(42)), 42);
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_mm_ss(0), "00:00");
        assert_eq!(format_mm_ss(59), "00:59");
        assert_eq!(format_mm_ss(600), "10:00");
        assert_eq!(format_mm_ss(6_000), "100:00");
    }
}
