//! Calming-message rotation for the SOS view.
//!
//! Every ten seconds a message is drawn uniformly at random from the pool,
//! with replacement: the same message may come up twice in a row.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::content::CALMING_MESSAGES;

pub const ROTATION_INTERVAL_SECS: i64 = 10;

#[derive(Debug, Clone)]
pub struct MessageRotator<R> {
    messages: &'static [&'static str],
    current: usize,
    last_rotated_at: Option<DateTime<Utc>>,
    rng: R,
}

impl<R: Rng> MessageRotator<R> {
    /// Rotator over the built-in calming messages, showing the first one.
    pub fn new(rng: R) -> Self {
        Self::with_messages(CALMING_MESSAGES, rng)
    }

    pub fn with_messages(messages: &'static [&'static str], rng: R) -> Self {
        Self {
            messages,
            current: 0,
            last_rotated_at: None,
            rng,
        }
    }

    pub fn current(&self) -> &'static str {
        self.messages.get(self.current).copied().unwrap_or_default()
    }

    /// Anchor the rotation schedule at `now`.
    pub fn start_at(&mut self, now: DateTime<Utc>) {
        self.last_rotated_at = Some(now);
    }

    /// Draw a new message if a rotation is due at `now`.
    ///
    /// Missed rotations collapse into one draw; the schedule stays aligned to
    /// its anchor.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<&'static str> {
        if self.messages.is_empty() {
            return None;
        }
        let Some(last) = self.last_rotated_at else {
            self.last_rotated_at = Some(now);
            return None;
        };

        let interval = Duration::seconds(ROTATION_INTERVAL_SECS);
        let due = (now - last).num_milliseconds() / interval.num_milliseconds();
        if due <= 0 {
            return None;
        }

        self.last_rotated_at = Some(last + Duration::milliseconds(due * interval.num_milliseconds()));
        self.current = self.rng.gen_range(0..self.messages.len());
        Some(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 22, 0, 0).unwrap()
    }

    #[test]
    fn shows_first_message_until_ten_seconds() {
        let mut rotator = MessageRotator::new(Mcg128Xsl64::seed_from_u64(7));
        rotator.start_at(t0());
        assert_eq!(rotator.current(), CALMING_MESSAGES[0]);
        assert!(rotator.poll(t0() + Duration::seconds(9)).is_none());
        assert!(rotator.poll(t0() + Duration::seconds(10)).is_some());
        assert!(rotator.poll(t0() + Duration::seconds(19)).is_none());
        assert!(rotator.poll(t0() + Duration::seconds(20)).is_some());
    }

    #[test]
    fn missed_rotations_draw_once_and_stay_aligned() {
        let mut rotator = MessageRotator::new(Mcg128Xsl64::seed_from_u64(7));
        rotator.start_at(t0());
        assert!(rotator.poll(t0() + Duration::seconds(35)).is_some());
        // Next slot is 40s, not 45s.
        assert!(rotator.poll(t0() + Duration::seconds(39)).is_none());
        assert!(rotator.poll(t0() + Duration::seconds(40)).is_some());
    }

    #[test]
    fn stall_beyond_i32_slots_stays_aligned() {
        let mut rotator = MessageRotator::new(Mcg128Xsl64::seed_from_u64(7));
        rotator.start_at(t0());
        let slots = i64::from(i32::MAX) + 1;
        let resumed = t0() + Duration::seconds(ROTATION_INTERVAL_SECS * slots);
        assert!(rotator.poll(resumed + Duration::seconds(5)).is_some());
        assert!(rotator.poll(resumed + Duration::seconds(9)).is_none());
        assert!(rotator.poll(resumed + Duration::seconds(10)).is_some());
    }

    #[test]
    fn same_seed_same_sequence() {
        let draw = |seed| {
            let mut rotator = MessageRotator::new(Mcg128Xsl64::seed_from_u64(seed));
            rotator.start_at(t0());
            (1..=20)
                .filter_map(|i| rotator.poll(t0() + Duration::seconds(10 * i)))
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(42), draw(42));
        assert_eq!(draw(42).len(), 20);
        assert!(draw(42).iter().all(|m| CALMING_MESSAGES.contains(m)));
    }

    #[test]
    fn draws_with_replacement() {
        static TWO: &[&str] = &["a", "b"];
        let mut rotator = MessageRotator::with_messages(TWO, Mcg128Xsl64::seed_from_u64(1));
        rotator.start_at(t0());
        let drawn: Vec<_> = (1..=64)
            .filter_map(|i| rotator.poll(t0() + Duration::seconds(10 * i)))
            .collect();
        let repeats = drawn.windows(2).filter(|w| w[0] == w[1]).count();
        assert!(repeats > 0);
    }
}
