//! Per-view state for the ticking screens.
//!
//! Each view owns its own state and is advanced only through
//! [`View::on_tick`]; nothing here is shared between views.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::events::Event;
use crate::sos::MessageRotator;
use crate::ticker::View;
use crate::timer::{compute, BreathPhase, CleanTime, PhaseTimer};

/// Clean-time counter and money saved.
#[derive(Debug, Clone)]
pub struct HomeView {
    start: DateTime<Utc>,
    rate_per_day: u64,
    current: CleanTime,
    ticks: u64,
}

impl HomeView {
    pub fn new(start: DateTime<Utc>, rate_per_day: u64) -> Self {
        Self {
            start,
            rate_per_day,
            current: CleanTime::default(),
            ticks: 0,
        }
    }

    pub fn clean_time(&self) -> CleanTime {
        self.current
    }

    /// Number of recomputations so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl View for HomeView {
    fn name(&self) -> &'static str {
        "home"
    }

    fn on_tick(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        self.current = compute(self.start, now, self.rate_per_day);
        self.ticks += 1;
        vec![Event::CleanTimeUpdated {
            clean_time: self.current,
            at: now,
        }]
    }
}

/// Breathing exercise plus rotating calming messages.
#[derive(Debug, Clone)]
pub struct SosView<R = StdRng> {
    breathing: PhaseTimer,
    messages: MessageRotator<R>,
    scale: f64,
}

impl SosView<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for SosView<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> SosView<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            breathing: PhaseTimer::new(),
            messages: MessageRotator::new(rng),
            scale: crate::timer::MIN_SCALE,
        }
    }

    pub fn phase(&self) -> BreathPhase {
        self.breathing.phase()
    }

    pub fn remaining_secs(&self) -> u64 {
        self.breathing.remaining_secs()
    }

    pub fn instruction(&self) -> &'static str {
        self.breathing.phase().instruction()
    }

    pub fn message(&self) -> &'static str {
        self.messages.current()
    }

    /// Breathing-circle scale as of the last tick.
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl<R: Rng + Send + 'static> View for SosView<R> {
    fn name(&self) -> &'static str {
        "sos"
    }

    fn on_mount(&mut self, now: DateTime<Utc>) {
        self.breathing.start_at(now);
        self.messages.start_at(now);
        self.scale = self.breathing.scale(now);
    }

    fn on_tick(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        let mut events = Vec::new();
        if let Some(phase) = self.breathing.sync(now) {
            debug!(?phase, "breathing phase changed");
            events.push(Event::BreathPhaseChanged {
                phase,
                instruction: phase.instruction().to_string(),
                remaining_secs: self.breathing.remaining_secs(),
                at: now,
            });
        }
        if let Some(message) = self.messages.poll(now) {
            events.push(Event::CalmingMessage {
                message: message.to_string(),
                at: now,
            });
        }
        self.scale = self.breathing.scale(now);
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rand_pcg::Mcg128Xsl64;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 3, 0, 0).unwrap()
    }

    #[test]
    fn home_view_recomputes_from_absolute_time() {
        let mut view = HomeView::new(t0() - Duration::days(2), 50);
        view.on_tick(t0());
        // A stalled host skips ticks; the next one is still exact.
        let events = view.on_tick(t0() + Duration::hours(30));
        assert_eq!(view.ticks(), 2);
        assert_eq!(view.clean_time().days, 3);
        assert_eq!(view.clean_time().hours, 6);
        assert_eq!(view.clean_time().amount_accrued, 150);
        assert!(matches!(events[0], Event::CleanTimeUpdated { .. }));
    }

    #[test]
    fn sos_view_reports_phase_changes_and_messages() {
        let mut view = SosView::with_rng(Mcg128Xsl64::seed_from_u64(3));
        view.on_mount(t0());
        assert_eq!(view.phase(), BreathPhase::Inhale);
        assert_eq!(view.instruction(), "נשום פנימה...");
        assert_eq!(view.scale(), 1.0);

        let mut changes = Vec::new();
        let mut messages = 0;
        for second in 1..=10 {
            for event in view.on_tick(t0() + Duration::seconds(second)) {
                match event {
                    Event::BreathPhaseChanged { phase, .. } => changes.push(phase),
                    Event::CalmingMessage { .. } => messages += 1,
                    other => panic!("unexpected event {other:?}"),
                }
            }
        }
        assert_eq!(changes, vec![BreathPhase::Hold, BreathPhase::Exhale]);
        assert_eq!(messages, 1);
        assert_eq!(view.remaining_secs(), 4);
        // 2s into Exhale.
        assert!((view.scale() - (1.5 - 0.5 / 3.0)).abs() < 1e-9);
    }
}
